use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::SubsResult;
use crate::model::{FontSpec, OutlineSpec, StrokeSpec};
use crate::render::surface::RenderLayer;

/// Colors used for one glyph draw: a fill plus an optional stroke drawn underneath it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pen {
    /// Glyph body color.
    pub fill: Rgba8,
    /// Stroke growing every glyph outline by `width` pixels on each side.
    pub stroke: Option<StrokeSpec>,
}

impl Pen {
    /// Fill-only pen.
    pub fn fill(color: Rgba8) -> Self {
        Self {
            fill: color,
            stroke: None,
        }
    }

    /// Fill with an optional fused stroke.
    pub fn with_stroke(color: Rgba8, stroke: Option<StrokeSpec>) -> Self {
        Self {
            fill: color,
            stroke,
        }
    }

    /// Outline layers paint body and stroke in the same color.
    pub fn outline(spec: &OutlineSpec) -> Self {
        Self {
            fill: spec.color,
            stroke: Some(StrokeSpec {
                color: spec.color,
                width: spec.radius,
            }),
        }
    }

    /// Stroke that actually paints pixels.
    pub fn visible_stroke(&self) -> Option<StrokeSpec> {
        self.stroke.filter(|s| s.width > 0.0)
    }
}

/// Glyph backend used for measuring and drawing text lines.
///
/// Origins passed to [`TextRasterizer::draw_line`] are the top-left of the line box: the glyph
/// baseline sits `ascent` pixels below `origin.y`.
pub trait TextRasterizer {
    /// Backend-specific loaded font.
    type Font;

    /// Resolve and load a font. Unreadable or unusable fonts are configuration errors.
    fn load_font(&mut self, spec: &FontSpec) -> SubsResult<Self::Font>;

    /// Horizontal advance of `text` in pixels.
    fn advance(&mut self, font: &Self::Font, text: &str) -> SubsResult<f32>;

    /// Exclusive bottom row of the inked pixels of `text` drawn at the origin.
    fn ink_bottom(&mut self, font: &Self::Font, text: &str) -> SubsResult<f32>;

    /// Font descent below the baseline, in pixels (positive).
    fn descent(&mut self, font: &Self::Font) -> SubsResult<f32>;

    /// Draw one line of text over `layer` (source-over).
    fn draw_line(
        &mut self,
        font: &Self::Font,
        text: &str,
        origin: Point,
        pen: &Pen,
        layer: &mut RenderLayer,
    ) -> SubsResult<()>;
}
