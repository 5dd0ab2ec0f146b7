use std::{
    borrow::Cow,
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::{SubsError, SubsResult};
use crate::model::FontSpec;
use crate::render::{composite::over_in_place, surface::RenderLayer};

use super::raster::{Pen, TextRasterizer};

/// A font registered with a [`VelloTextRasterizer`] at a fixed pixel size.
///
/// Cloning is cheap: the font bytes are shared.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    path: PathBuf,
    family: String,
    size_px: f32,
    data: vello_cpu::peniko::FontData,
}

impl LoadedFont {
    /// File the font was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Family name reported by the font.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Em size in pixels.
    pub fn size_px(&self) -> f32 {
        self.size_px
    }
}

struct RegisteredFont {
    family: String,
    data: vello_cpu::peniko::FontData,
}

/// Parley shaping plus vello_cpu glyph rasterization.
///
/// One instance per thread; fonts are registered once per path.
pub struct VelloTextRasterizer {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    fonts: HashMap<PathBuf, RegisteredFont>,
    scratch: Option<(u16, u16, vello_cpu::Pixmap)>,
}

impl Default for VelloTextRasterizer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloTextRasterizer {
    /// Construct a rasterizer with fresh Parley contexts.
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            fonts: HashMap::new(),
            scratch: None,
        }
    }

    fn register(&mut self, path: &Path) -> SubsResult<&RegisteredFont> {
        if !self.fonts.contains_key(path) {
            let bytes = std::fs::read(path).map_err(|e| {
                SubsError::configuration(format!("read font \"{}\": {e}", path.display()))
            })?;

            let families = self
                .font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                SubsError::configuration(format!(
                    "no font families found in \"{}\"",
                    path.display()
                ))
            })?;
            let family = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| SubsError::configuration("registered font family has no name"))?
                .to_string();

            let data =
                vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0);
            tracing::debug!(path = %path.display(), %family, "registered font");
            self.fonts
                .insert(path.to_path_buf(), RegisteredFont { family, data });
        }
        self.fonts
            .get(path)
            .ok_or_else(|| SubsError::render("font cache lost a registered font"))
    }

    fn layout(&mut self, font: &LoadedFont, text: &str) -> parley::Layout<()> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(font.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(font.size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }

    /// Rasterize `layout` into a cleared scratch pixmap of `width` x `height`.
    fn rasterize(
        &mut self,
        font: &LoadedFont,
        layout: &parley::Layout<()>,
        width: u32,
        height: u32,
        origin: Point,
        pen: &Pen,
    ) -> SubsResult<&vello_cpu::Pixmap> {
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| SubsError::render("surface width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| SubsError::render("surface height exceeds u16"))?;

        let mut ctx = vello_cpu::RenderContext::new(width_u16, height_u16);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));

        if let Some(stroke) = pen.visible_stroke() {
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(2.0 * f64::from(stroke.width)));
            ctx.set_paint(to_color(stroke.color));
            draw_glyphs(&mut ctx, &font.data, layout, GlyphMode::Stroke);
        }
        ctx.set_paint(to_color(pen.fill));
        draw_glyphs(&mut ctx, &font.data, layout, GlyphMode::Fill);
        ctx.flush();

        let scratch = match self.scratch.take() {
            Some(s) if s.0 == width_u16 && s.1 == height_u16 => s,
            _ => (
                width_u16,
                height_u16,
                vello_cpu::Pixmap::new(width_u16, height_u16),
            ),
        };
        let (_, _, pixmap) = self.scratch.insert(scratch);
        pixmap.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(pixmap);
        Ok(&*pixmap)
    }
}

#[derive(Clone, Copy)]
enum GlyphMode {
    Fill,
    Stroke,
}

fn draw_glyphs(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    layout: &parley::Layout<()>,
    mode: GlyphMode,
) {
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            // Layout-absolute positions, baseline included.
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            let builder = ctx.glyph_run(font).font_size(run.run().font_size());
            match mode {
                GlyphMode::Fill => builder.fill_glyphs(glyphs),
                GlyphMode::Stroke => builder.stroke_glyphs(glyphs),
            }
        }
    }
}

fn to_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

impl TextRasterizer for VelloTextRasterizer {
    type Font = LoadedFont;

    fn load_font(&mut self, spec: &FontSpec) -> SubsResult<LoadedFont> {
        if !spec.size_px.is_finite() || spec.size_px <= 0.0 {
            return Err(SubsError::configuration(
                "font size must be finite and > 0",
            ));
        }
        let registered = self.register(&spec.path)?;
        Ok(LoadedFont {
            path: spec.path.clone(),
            family: registered.family.clone(),
            size_px: spec.size_px,
            data: registered.data.clone(),
        })
    }

    fn advance(&mut self, font: &LoadedFont, text: &str) -> SubsResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        Ok(self.layout(font, text).full_width())
    }

    fn ink_bottom(&mut self, font: &LoadedFont, text: &str) -> SubsResult<f32> {
        if text.is_empty() {
            return Ok(0.0);
        }
        let layout = self.layout(font, text);
        // Pad every side so overhangs past the line box are not clipped away.
        let pad = font.size_px.ceil() as u32;
        let width = layout.full_width().ceil().max(1.0) as u32 + 2 * pad;
        let height = layout.height().ceil().max(1.0) as u32 + 2 * pad;
        let pen = Pen::fill(Rgba8::BLACK);
        let pixmap = self.rasterize(
            font,
            &layout,
            width,
            height,
            Point::new(f64::from(pad), f64::from(pad)),
            &pen,
        )?;

        let row_len = width as usize * 4;
        let bottom = pixmap
            .data_as_u8_slice()
            .chunks_exact(row_len)
            .rposition(|row| row.chunks_exact(4).any(|px| px[3] != 0))
            .map_or(0, |row| (row + 1).saturating_sub(pad as usize));
        Ok(bottom as f32)
    }

    fn descent(&mut self, font: &LoadedFont) -> SubsResult<f32> {
        let layout = self.layout(font, "l");
        let line = layout
            .lines()
            .next()
            .ok_or_else(|| SubsError::render("reference layout produced no lines"))?;
        Ok(line.metrics().descent.abs())
    }

    fn draw_line(
        &mut self,
        font: &LoadedFont,
        text: &str,
        origin: Point,
        pen: &Pen,
        layer: &mut RenderLayer,
    ) -> SubsResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layout = self.layout(font, text);
        let (width, height) = (layer.width(), layer.height());
        let pixmap = self.rasterize(font, &layout, width, height, origin, pen)?;
        over_in_place(layer.data_mut(), pixmap.data_as_u8_slice())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/engine.rs"]
mod tests;
