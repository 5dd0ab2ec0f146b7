//! JSON subtitle scripts: named style profiles plus the groups that use them.

use std::{
    collections::{BTreeMap, HashSet},
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::foundation::core::{Rgba8, Vec2};
use crate::foundation::error::{SubsError, SubsResult};
use crate::model::{
    Alignment, FontSpec, OutlineSpec, Push, StrokeSpec, StyleProfile, Subtitle, SubtitleGroup,
    TextboxSpec,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ScriptDef {
    #[serde(default)]
    pub(crate) profiles: BTreeMap<String, ProfileDef>,
    #[serde(default)]
    pub(crate) groups: Vec<GroupDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ProfileDef {
    pub(crate) font_data: FontDataDef,
    #[serde(default)]
    pub(crate) outline_data_1: Option<OutlineDataDef>,
    #[serde(default)]
    pub(crate) outline_data_2: Option<OutlineDataDef>,
    pub(crate) textbox_data: TextboxDataDef,
    #[serde(default)]
    pub(crate) background_image_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FontDataDef {
    pub(crate) style: PathBuf,
    pub(crate) size: f32,
    #[serde(default)]
    pub(crate) color: Rgba8,
    #[serde(default)]
    pub(crate) stroke_size: Option<f32>,
    #[serde(default)]
    pub(crate) stroke_color: Option<Rgba8>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct OutlineDataDef {
    #[serde(default)]
    pub(crate) color: Rgba8,
    pub(crate) radius: f32,
    #[serde(default)]
    pub(crate) blur_strength: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TextboxDataDef {
    #[serde(default)]
    pub(crate) alignment: Option<String>,
    #[serde(default)]
    pub(crate) anchor_point: AnchorDef,
    pub(crate) box_width: usize,
    #[serde(default)]
    pub(crate) push: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub(crate) struct AnchorDef {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl<'de> Deserialize<'de> for AnchorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Arr([f64; 2]),
            Obj { x: f64, y: f64 },
        }

        match Repr::deserialize(deserializer)? {
            Repr::Arr([x, y]) => Ok(Self { x, y }),
            Repr::Obj { x, y } => Ok(Self { x, y }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct GroupDef {
    pub(crate) image_id: String,
    #[serde(default)]
    pub(crate) subtitles: Vec<SubtitleDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SubtitleDef {
    pub(crate) profile: String,
    #[serde(default)]
    pub(crate) content: Vec<String>,
}

/// A parsed subtitle script.
///
/// Parsing only checks the JSON shape. [`SubtitleScript::validate`] and
/// [`SubtitleScript::into_groups`] resolve profiles, check every value and make sure referenced
/// font and background files exist.
#[derive(Debug, Clone)]
pub struct SubtitleScript {
    def: ScriptDef,
    base_dir: Option<PathBuf>,
    text_id: Option<String>,
}

impl SubtitleScript {
    /// Parse a script; relative paths resolve against the working directory.
    pub fn from_json_str(json: &str) -> SubsResult<Self> {
        let def: ScriptDef = serde_json::from_str(json)
            .map_err(|e| SubsError::serde(format!("parse script json: {e}")))?;
        Ok(Self {
            def,
            base_dir: None,
            text_id: None,
        })
    }

    /// Read and parse a script file; relative paths resolve against its directory and the file
    /// stem becomes the text id.
    pub fn from_path(path: &Path) -> SubsResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            SubsError::configuration(format!("read script \"{}\": {e}", path.display()))
        })?;
        let script =
            Self::from_json_str(&json).map_err(|e| e.in_context(path.display()))?;
        let text_id = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned());
        Ok(Self {
            base_dir: path.parent().map(Path::to_path_buf),
            text_id,
            ..script
        })
    }

    /// Resolve relative paths against `dir`.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Name of the output folder for this script, if known.
    pub fn text_id(&self) -> Option<&str> {
        self.text_id.as_deref()
    }

    /// Override the text id.
    pub fn with_text_id(mut self, text_id: impl Into<String>) -> Self {
        self.text_id = Some(text_id.into());
        self
    }

    /// Names of all declared profiles, sorted.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.def.profiles.keys().map(String::as_str)
    }

    /// Image ids targeted by the script, in document order.
    pub fn image_ids(&self) -> impl Iterator<Item = &str> {
        self.def.groups.iter().map(|g| g.image_id.as_str())
    }

    /// Check every profile and group without rendering anything.
    pub fn validate(&self) -> SubsResult<()> {
        self.build_groups().map(|_| ())
    }

    /// Validate and convert into typed subtitle groups.
    pub fn into_groups(self) -> SubsResult<Vec<SubtitleGroup>> {
        self.build_groups()
    }

    fn build_groups(&self) -> SubsResult<Vec<SubtitleGroup>> {
        let mut profiles = BTreeMap::new();
        for (name, def) in &self.def.profiles {
            let profile = build_profile(def, self.base_dir.as_deref())
                .map_err(|e| e.in_context(format_args!("profile \"{name}\"")))?;
            profiles.insert(name.as_str(), Arc::new(profile));
        }

        let mut seen = HashSet::new();
        let mut groups = Vec::with_capacity(self.def.groups.len());
        for group in &self.def.groups {
            if !seen.insert(group.image_id.as_str()) {
                return Err(SubsError::configuration(format!(
                    "image \"{}\" is targeted by more than one group",
                    group.image_id
                )));
            }
            let subtitles = group
                .subtitles
                .iter()
                .map(|sub| -> SubsResult<Subtitle> {
                    let profile = profiles.get(sub.profile.as_str()).ok_or_else(|| {
                        SubsError::configuration(format!(
                            "image \"{}\": unknown profile \"{}\"",
                            group.image_id, sub.profile
                        ))
                    })?;
                    Ok(Subtitle::new(Arc::clone(profile), sub.content.clone()))
                })
                .collect::<SubsResult<Vec<_>>>()?;
            groups.push(SubtitleGroup::new(group.image_id.clone(), subtitles));
        }
        Ok(groups)
    }
}

fn build_profile(def: &ProfileDef, base_dir: Option<&Path>) -> SubsResult<StyleProfile> {
    let font_path = resolve(base_dir, &def.font_data.style);
    if !font_path.is_file() {
        return Err(SubsError::configuration(format!(
            "font file \"{}\" not found",
            font_path.display()
        )));
    }
    let background = def
        .background_image_path
        .as_deref()
        .map(|p| resolve(base_dir, p));
    if let Some(path) = &background
        && !path.is_file()
    {
        return Err(SubsError::configuration(format!(
            "background image \"{}\" not found",
            path.display()
        )));
    }

    let stroke = def.font_data.stroke_size.map(|width| StrokeSpec {
        color: def.font_data.stroke_color.unwrap_or_default(),
        width,
    });

    let tb = &def.textbox_data;
    let textbox = TextboxSpec {
        alignment: tb
            .alignment
            .as_deref()
            .map(str::parse::<Alignment>)
            .transpose()?
            .unwrap_or_default(),
        anchor: Vec2::new(tb.anchor_point.x, tb.anchor_point.y),
        wrap_columns: tb.box_width,
        push: tb
            .push
            .as_deref()
            .map(str::parse::<Push>)
            .transpose()?
            .unwrap_or_default(),
    };

    StyleProfile::builder(FontSpec::new(font_path, def.font_data.size))
        .fill(def.font_data.color)
        .stroke(stroke)
        .outline_1(def.outline_data_1.as_ref().map(outline_spec))
        .outline_2(def.outline_data_2.as_ref().map(outline_spec))
        .background(background)
        .textbox(textbox)
        .build()
}

fn outline_spec(def: &OutlineDataDef) -> OutlineSpec {
    OutlineSpec {
        color: def.color,
        radius: def.radius,
        blur: def.blur_strength,
    }
}

fn resolve(base_dir: Option<&Path>, p: &Path) -> PathBuf {
    match base_dir {
        Some(base) if p.is_relative() => base.join(p),
        _ => p.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
