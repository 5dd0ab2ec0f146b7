use std::path::Path;

use crate::foundation::error::SubsResult;
use crate::layout::positioner::position_lines;
use crate::model::{Subtitle, SubtitleGroup};
use crate::render::{compositor::render_subtitle, surface::Canvas};
use crate::text::{
    engine::VelloTextRasterizer, metrics::measure_block, raster::TextRasterizer, wrap::wrap_lines,
};

/// Applies subtitle groups to canvases with one text backend.
///
/// Holds no per-image state: every call allocates its own layers, so one applicator can be reused
/// across images on the same thread.
pub struct Applicator<R: TextRasterizer> {
    rasterizer: R,
}

impl Default for Applicator<VelloTextRasterizer> {
    fn default() -> Self {
        Self::new(VelloTextRasterizer::new())
    }
}

impl<R: TextRasterizer> Applicator<R> {
    /// Wrap a text backend.
    pub fn new(rasterizer: R) -> Self {
        Self { rasterizer }
    }

    /// The underlying text backend.
    pub fn rasterizer(&self) -> &R {
        &self.rasterizer
    }

    /// Decode `image_path` and apply `group` to it.
    pub fn apply_to_file(&mut self, image_path: &Path, group: &SubtitleGroup) -> SubsResult<Canvas> {
        let canvas = Canvas::open(image_path)?;
        self.apply_group(canvas, group)
    }

    /// Apply every subtitle of `group` in order, each one drawn over the result of the previous.
    ///
    /// The first error aborts the whole group.
    #[tracing::instrument(
        skip(self, canvas, group),
        fields(image_id = %group.image_id, subtitles = group.subtitles.len())
    )]
    pub fn apply_group(&mut self, mut canvas: Canvas, group: &SubtitleGroup) -> SubsResult<Canvas> {
        for subtitle in &group.subtitles {
            self.apply_subtitle(&mut canvas, subtitle)?;
        }
        Ok(canvas)
    }

    /// Wrap, measure, position and composite one subtitle onto `canvas`.
    pub fn apply_subtitle(&mut self, canvas: &mut Canvas, subtitle: &Subtitle) -> SubsResult<()> {
        let profile = subtitle.profile();
        let font = self.rasterizer.load_font(profile.font())?;

        let textbox = profile.textbox();
        let lines = wrap_lines(subtitle.content(), textbox.wrap_columns)?;
        let metrics = measure_block(&mut self.rasterizer, &font, &lines)?;
        let positions = position_lines(
            &metrics.widths,
            metrics.height_basis,
            (canvas.width(), canvas.height()),
            textbox,
        );
        tracing::debug!(
            lines = lines.len(),
            height_basis = metrics.height_basis,
            alignment = %textbox.alignment,
            push = %textbox.push,
            "laid out subtitle"
        );

        render_subtitle(canvas, &mut self.rasterizer, &font, &lines, &positions, profile)
    }
}

#[cfg(test)]
#[path = "../tests/unit/apply.rs"]
mod tests;
