use crate::foundation::core::Point;
use crate::foundation::error::{SubsError, SubsResult};
use crate::model::{OutlineSpec, StyleProfile};
use crate::text::raster::{Pen, TextRasterizer};

use super::blur::blur_layer;
use super::composite::{paste_at, paste_layer};
use super::surface::{Canvas, RenderLayer};

/// One outline pass: its own transparent layer and the pen that draws into it.
struct OutlinePass {
    spec: OutlineSpec,
    pen: Pen,
    layer: RenderLayer,
}

impl OutlinePass {
    fn new(spec: OutlineSpec, width: u32, height: u32) -> SubsResult<Self> {
        Ok(Self {
            pen: Pen::outline(&spec),
            spec,
            layer: RenderLayer::transparent(width, height)?,
        })
    }

    fn finish(mut self, canvas: &mut Canvas) -> SubsResult<()> {
        if let Some(radius) = self.spec.effective_blur() {
            blur_layer(&mut self.layer, radius)?;
        }
        paste_layer(canvas, &self.layer)
    }
}

/// Draw positioned physical lines onto `canvas` with every layer of `profile`.
///
/// Each line is drawn into the outline-2, outline-1 and fill layers, and the accumulated fill
/// layer is pasted right away. Once all lines are drawn the outline layers are blurred and
/// pasted (outline 2 first), and the fill layer is pasted again so it stays on top. A configured
/// background image is pasted at the origin before any text.
pub fn render_subtitle<R: TextRasterizer>(
    canvas: &mut Canvas,
    rasterizer: &mut R,
    font: &R::Font,
    lines: &[String],
    positions: &[Point],
    profile: &StyleProfile,
) -> SubsResult<()> {
    if lines.len() != positions.len() {
        return Err(SubsError::render(format!(
            "{} lines but {} positions",
            lines.len(),
            positions.len()
        )));
    }

    if let Some(path) = profile.background() {
        let background = Canvas::open(path)?;
        paste_at(canvas, &background, 0, 0);
    }

    let (width, height) = (canvas.width(), canvas.height());
    let mut outline_2 = profile
        .outline_2()
        .map(|spec| OutlinePass::new(spec, width, height))
        .transpose()?;
    let mut outline_1 = profile
        .outline_1()
        .map(|spec| OutlinePass::new(spec, width, height))
        .transpose()?;
    let mut fill = RenderLayer::transparent(width, height)?;
    let fill_pen = Pen::with_stroke(profile.fill(), profile.stroke());

    for (line, &origin) in lines.iter().zip(positions) {
        for pass in [outline_2.as_mut(), outline_1.as_mut()].into_iter().flatten() {
            rasterizer.draw_line(font, line, origin, &pass.pen, &mut pass.layer)?;
        }
        rasterizer.draw_line(font, line, origin, &fill_pen, &mut fill)?;
        paste_layer(canvas, &fill)?;
    }

    if let Some(pass) = outline_2 {
        pass.finish(canvas)?;
    }
    if let Some(pass) = outline_1 {
        pass.finish(canvas)?;
    }
    paste_layer(canvas, &fill)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
