use std::{fmt, path::PathBuf, str::FromStr, sync::Arc};

use crate::foundation::{
    core::{Rgba8, Vec2},
    error::{SubsError, SubsResult},
};

/// Horizontal anchoring of each physical line relative to the textbox anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Alignment {
    /// Text grows rightward from the anchor.
    Left,
    /// Text is centred on the anchor.
    #[default]
    Center,
    /// Text grows leftward from the anchor.
    Right,
}

impl FromStr for Alignment {
    type Err = SubsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "center" => Ok(Self::Center),
            "right" => Ok(Self::Right),
            other => Err(SubsError::configuration(format!(
                "invalid alignment value \"{other}\" (expected left, center or right)"
            ))),
        }
    }
}

impl TryFrom<String> for Alignment {
    type Error = SubsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Alignment> for String {
    fn from(value: Alignment) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
        })
    }
}

/// Direction in which a multi-line block grows from its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Push {
    /// Lines stack upward and the last line ends at the anchor.
    #[default]
    Up,
    /// Lines stack downward starting at the anchor.
    Down,
}

impl FromStr for Push {
    type Err = SubsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(SubsError::configuration(format!(
                "invalid push value \"{other}\" (expected up or down)"
            ))),
        }
    }
}

impl TryFrom<String> for Push {
    type Error = SubsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Push> for String {
    fn from(value: Push) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Push {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "up",
            Self::Down => "down",
        })
    }
}

/// Font file and pixel size.
#[derive(Clone, Debug, PartialEq)]
pub struct FontSpec {
    /// Path to a TrueType/OpenType file.
    pub path: PathBuf,
    /// Em size in pixels.
    pub size_px: f32,
}

impl FontSpec {
    /// Build a font reference.
    pub fn new(path: impl Into<PathBuf>, size_px: f32) -> Self {
        Self {
            path: path.into(),
            size_px,
        }
    }
}

/// Stroke fused into the fill pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeSpec {
    /// Stroke color.
    pub color: Rgba8,
    /// Outline growth in pixels on each side of the glyph contour.
    pub width: f32,
}

/// One independently colored (and optionally blurred) outline layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutlineSpec {
    /// Color used for both the glyph body and its stroke.
    pub color: Rgba8,
    /// Stroke radius in pixels.
    pub radius: f32,
    /// Gaussian blur radius applied to the whole layer; `None` or `0` disables blur.
    pub blur: Option<f32>,
}

impl OutlineSpec {
    /// Blur radius when blurring is enabled (set and non-zero).
    pub fn effective_blur(&self) -> Option<f32> {
        self.blur.filter(|b| *b > 0.0)
    }
}

/// Placement rules for the text block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextboxSpec {
    /// Horizontal alignment of every physical line.
    pub alignment: Alignment,
    /// Anchor offset `(dx, dy)` from the canvas centre; positive `dy` moves the block up.
    pub anchor: Vec2,
    /// Maximum characters per physical line.
    pub wrap_columns: usize,
    /// Growth direction of multi-line blocks.
    pub push: Push,
}

impl Default for TextboxSpec {
    fn default() -> Self {
        Self {
            alignment: Alignment::Center,
            anchor: Vec2::ZERO,
            wrap_columns: 40,
            push: Push::Up,
        }
    }
}

/// Full, validated set of style parameters governing one subtitle.
///
/// Built through [`StyleProfile::builder`]; once built, it is immutable.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleProfile {
    font: FontSpec,
    fill: Rgba8,
    stroke: Option<StrokeSpec>,
    outline_1: Option<OutlineSpec>,
    outline_2: Option<OutlineSpec>,
    background: Option<PathBuf>,
    textbox: TextboxSpec,
}

impl StyleProfile {
    /// Start building a profile with the mandatory font.
    pub fn builder(font: FontSpec) -> StyleProfileBuilder {
        StyleProfileBuilder {
            profile: StyleProfile {
                font,
                fill: Rgba8::BLACK,
                stroke: None,
                outline_1: None,
                outline_2: None,
                background: None,
                textbox: TextboxSpec::default(),
            },
        }
    }

    /// Font reference.
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Fill color of the glyph bodies.
    pub fn fill(&self) -> Rgba8 {
        self.fill
    }

    /// Stroke fused into the fill layer.
    pub fn stroke(&self) -> Option<StrokeSpec> {
        self.stroke
    }

    /// Inner outline layer (drawn above outline 2).
    pub fn outline_1(&self) -> Option<OutlineSpec> {
        self.outline_1
    }

    /// Outer outline layer (drawn lowest).
    pub fn outline_2(&self) -> Option<OutlineSpec> {
        self.outline_2
    }

    /// Background image pasted before any text layer.
    pub fn background(&self) -> Option<&PathBuf> {
        self.background.as_ref()
    }

    /// Textbox placement rules.
    pub fn textbox(&self) -> &TextboxSpec {
        &self.textbox
    }
}

/// Builder validating every numeric field of a [`StyleProfile`].
#[derive(Clone, Debug)]
pub struct StyleProfileBuilder {
    profile: StyleProfile,
}

impl StyleProfileBuilder {
    /// Set the fill color.
    pub fn fill(mut self, color: Rgba8) -> Self {
        self.profile.fill = color;
        self
    }

    /// Fuse a stroke into the fill pass.
    pub fn stroke(mut self, stroke: Option<StrokeSpec>) -> Self {
        self.profile.stroke = stroke;
        self
    }

    /// Configure the inner outline layer.
    pub fn outline_1(mut self, outline: Option<OutlineSpec>) -> Self {
        self.profile.outline_1 = outline;
        self
    }

    /// Configure the outer outline layer.
    pub fn outline_2(mut self, outline: Option<OutlineSpec>) -> Self {
        self.profile.outline_2 = outline;
        self
    }

    /// Paste an image under the text layers.
    pub fn background(mut self, path: Option<PathBuf>) -> Self {
        self.profile.background = path;
        self
    }

    /// Set placement rules.
    pub fn textbox(mut self, textbox: TextboxSpec) -> Self {
        self.profile.textbox = textbox;
        self
    }

    /// Validate and freeze the profile.
    pub fn build(self) -> SubsResult<StyleProfile> {
        let p = self.profile;
        if !p.font.size_px.is_finite() || p.font.size_px <= 0.0 {
            return Err(SubsError::configuration(
                "font size must be finite and > 0",
            ));
        }
        if p.font.path.as_os_str().is_empty() {
            return Err(SubsError::configuration("font path must be non-empty"));
        }
        if let Some(s) = p.stroke {
            non_negative("stroke size", s.width)?;
        }
        for (name, outline) in [("outline 1", p.outline_1), ("outline 2", p.outline_2)] {
            let Some(o) = outline else { continue };
            non_negative(&format!("{name} radius"), o.radius)?;
            if let Some(b) = o.blur {
                non_negative(&format!("{name} blur radius"), b)?;
            }
        }
        if p.textbox.wrap_columns == 0 {
            return Err(SubsError::configuration("box width must be >= 1 column"));
        }
        if !p.textbox.anchor.is_finite() {
            return Err(SubsError::configuration("anchor point must be finite"));
        }
        Ok(p)
    }
}

fn non_negative(what: &str, v: f32) -> SubsResult<()> {
    if !v.is_finite() || v < 0.0 {
        return Err(SubsError::configuration(format!(
            "{what} must be finite and >= 0 (got {v})"
        )));
    }
    Ok(())
}

/// One styled block of text applied to a single image.
#[derive(Clone, Debug, PartialEq)]
pub struct Subtitle {
    profile: Arc<StyleProfile>,
    content: Vec<String>,
}

impl Subtitle {
    /// Pair a profile with its logical (pre-wrap) lines.
    pub fn new(profile: Arc<StyleProfile>, content: Vec<String>) -> Self {
        Self { profile, content }
    }

    /// Style governing this subtitle.
    pub fn profile(&self) -> &StyleProfile {
        &self.profile
    }

    /// Logical lines in order.
    pub fn content(&self) -> &[String] {
        &self.content
    }
}

/// Ordered subtitles targeting one image; later entries composite over earlier ones.
#[derive(Clone, Debug, PartialEq)]
pub struct SubtitleGroup {
    /// Target image identifier (its file name in batch runs).
    pub image_id: String,
    /// Subtitles in application order.
    pub subtitles: Vec<Subtitle>,
}

impl SubtitleGroup {
    /// Build a group.
    pub fn new(image_id: impl Into<String>, subtitles: Vec<Subtitle>) -> Self {
        Self {
            image_id: image_id.into(),
            subtitles,
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/model.rs"]
mod tests;
