//! Directory-level driver: applies every script to every image of an input folder.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::Context;
use rayon::prelude::*;

use crate::apply::Applicator;
use crate::foundation::error::{SubsError, SubsResult};
use crate::model::SubtitleGroup;
use crate::script::SubtitleScript;
use crate::text::{engine::VelloTextRasterizer, raster::TextRasterizer};

/// File extensions treated as input images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp", "tif", "tiff"];

/// Apply one or more scripts to a folder of images.
#[derive(Debug, Clone)]
pub struct BatchJob {
    /// Folder holding the source images.
    pub input_dir: PathBuf,
    /// Root folder; each script writes to `output_dir/<text_id>/`.
    pub output_dir: PathBuf,
    /// Scripts keyed by text id.
    pub scripts: Vec<(String, SubtitleScript)>,
    /// Worker threads; `None` uses rayon's default.
    pub threads: Option<usize>,
}

/// One image that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Script the image belonged to.
    pub text_id: String,
    /// Image file name.
    pub image_id: String,
    /// Rendered error message.
    pub error: String,
}

/// Counts for a finished batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Images that had subtitles applied.
    pub processed: usize,
    /// Images copied unchanged because no group targeted them.
    pub copied: usize,
    /// Images that failed.
    pub failed: Vec<BatchFailure>,
}

impl BatchReport {
    /// `true` when no image failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

enum Outcome {
    Processed,
    Copied,
}

impl BatchJob {
    /// Build a job with the default thread count.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            scripts: Vec::new(),
            threads: None,
        }
    }

    /// Add a script; its text id names the output sub-folder.
    pub fn with_script(mut self, text_id: impl Into<String>, script: SubtitleScript) -> Self {
        self.scripts.push((text_id.into(), script));
        self
    }

    /// Every script is validated before any image is touched; per-image failures are recorded in
    /// the report and do not stop the other images.
    #[tracing::instrument(skip(self), fields(input = %self.input_dir.display(), scripts = self.scripts.len()))]
    pub fn run(&self) -> SubsResult<BatchReport> {
        let mut resolved = Vec::with_capacity(self.scripts.len());
        for (text_id, script) in &self.scripts {
            let groups = script
                .clone()
                .into_groups()
                .map_err(|e| e.in_context(format_args!("script \"{text_id}\"")))?;
            let by_image: HashMap<String, SubtitleGroup> = groups
                .into_iter()
                .map(|g| (g.image_id.clone(), g))
                .collect();
            resolved.push((text_id.as_str(), by_image));
        }

        let images = list_images(&self.input_dir)?;
        let pool = build_thread_pool(self.threads)?;
        let n = images.len();
        let mut report = BatchReport::default();

        for (text_id, by_image) in &resolved {
            let out_dir = self.output_dir.join(text_id);
            std::fs::create_dir_all(&out_dir)
                .with_context(|| format!("create output dir {}", out_dir.display()))?;

            for image_id in by_image.keys() {
                if !images.iter().any(|p| file_name(p) == *image_id) {
                    tracing::warn!(%text_id, %image_id, "group targets an image missing from the input folder");
                }
            }

            let outcomes = pool.install(|| {
                images
                    .par_iter()
                    .enumerate()
                    .map_init(Applicator::<VelloTextRasterizer>::default, |app, (i, path)| {
                        let image_id = file_name(path);
                        let out_path = out_dir.join(&image_id);
                        let outcome = match by_image.get(&image_id) {
                            Some(group) => apply_group_to_file(app, path, group, &out_path)
                                .map(|()| Outcome::Processed),
                            None => copy_image(path, &out_path).map(|()| Outcome::Copied),
                        };
                        match &outcome {
                            Ok(_) => tracing::info!(
                                "processed image {}/{n} for text_id {text_id}",
                                i + 1
                            ),
                            Err(e) => tracing::warn!(%image_id, error = %e, "image failed"),
                        }
                        (image_id, outcome)
                    })
                    .collect::<Vec<_>>()
            });

            for (image_id, outcome) in outcomes {
                match outcome {
                    Ok(Outcome::Processed) => report.processed += 1,
                    Ok(Outcome::Copied) => report.copied += 1,
                    Err(e) => report.failed.push(BatchFailure {
                        text_id: (*text_id).to_owned(),
                        image_id,
                        error: e.to_string(),
                    }),
                }
            }
        }

        Ok(report)
    }
}

/// Decode `image_path`, apply `group` and write the result to `out_path`.
pub fn apply_group_to_file<R: TextRasterizer>(
    app: &mut Applicator<R>,
    image_path: &Path,
    group: &SubtitleGroup,
    out_path: &Path,
) -> SubsResult<()> {
    let canvas = app.apply_to_file(image_path, group)?;
    save_image(canvas.into_rgba_image()?, out_path)
}

/// Encode by extension; formats without alpha get the color channels only.
pub fn save_image(img: image::RgbaImage, path: &Path) -> SubsResult<()> {
    let img = image::DynamicImage::ImageRgba8(img);
    let img = if has_extension(path, &["jpg", "jpeg"]) {
        image::DynamicImage::ImageRgb8(img.to_rgb8())
    } else {
        img
    };
    img.save(path)
        .with_context(|| format!("write image {}", path.display()))?;
    Ok(())
}

fn copy_image(from: &Path, to: &Path) -> SubsResult<()> {
    std::fs::copy(from, to)
        .with_context(|| format!("copy {} to {}", from.display(), to.display()))?;
    Ok(())
}

/// Image files directly inside `dir`, sorted by file name.
pub fn list_images(dir: &Path) -> SubsResult<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        SubsError::configuration(format!("read input dir \"{}\": {e}", dir.display()))
    })?;
    let mut images = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("list {}", dir.display()))?
            .path();
        if path.is_file() && has_extension(&path, IMAGE_EXTENSIONS) {
            images.push(path);
        }
    }
    images.sort_by_key(|p| file_name(p));
    Ok(images)
}

fn has_extension(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| exts.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn build_thread_pool(threads: Option<usize>) -> SubsResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SubsError::configuration("threads must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SubsError::render(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
