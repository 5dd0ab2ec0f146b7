//! Line widths and the standardized per-subtitle line height.

use crate::foundation::error::{SubsError, SubsResult};

use super::raster::TextRasterizer;

/// Reference string whose rendered height sets the spacing of every line in a subtitle.
///
/// All lines share this height regardless of their own content. Scripts without Latin
/// ascender/descender metrics get a spacing unrelated to their actual ink.
pub const HEIGHT_REFERENCE: &str = "l";

/// Result of measuring one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LineMeasure {
    /// Integer pixel advance of the line.
    pub width: u32,
    /// Standardized line height, identical for every line of the font.
    pub height_basis: u32,
}

/// Widths for a whole block of physical lines plus their shared height basis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockMetrics {
    /// One width per physical line, in order.
    pub widths: Vec<u32>,
    /// Standardized line height.
    pub height_basis: u32,
}

/// Measure a single line.
pub fn measure<R: TextRasterizer>(
    rasterizer: &mut R,
    font: &R::Font,
    line: &str,
) -> SubsResult<LineMeasure> {
    Ok(LineMeasure {
        width: line_width(rasterizer, font, line)?,
        height_basis: height_basis(rasterizer, font)?,
    })
}

/// Integer pixel advance of `line`.
pub fn line_width<R: TextRasterizer>(
    rasterizer: &mut R,
    font: &R::Font,
    line: &str,
) -> SubsResult<u32> {
    let advance = rasterizer.advance(font, line)?;
    to_pixels("advance", advance)
}

/// Ink bottom of [`HEIGHT_REFERENCE`] plus the rounded font descent.
pub fn height_basis<R: TextRasterizer>(rasterizer: &mut R, font: &R::Font) -> SubsResult<u32> {
    let bottom = to_pixels("reference ink bottom", rasterizer.ink_bottom(font, HEIGHT_REFERENCE)?)?;
    let descent = to_pixels("descent", rasterizer.descent(font)?)?;
    Ok(bottom + descent)
}

/// Measure every physical line; the height basis is computed once.
pub fn measure_block<R: TextRasterizer, S: AsRef<str>>(
    rasterizer: &mut R,
    font: &R::Font,
    lines: &[S],
) -> SubsResult<BlockMetrics> {
    let height_basis = height_basis(rasterizer, font)?;
    let widths = lines
        .iter()
        .map(|line| line_width(rasterizer, font, line.as_ref()))
        .collect::<SubsResult<Vec<_>>>()?;
    Ok(BlockMetrics {
        widths,
        height_basis,
    })
}

fn to_pixels(what: &str, v: f32) -> SubsResult<u32> {
    if !v.is_finite() || v < 0.0 {
        return Err(SubsError::render(format!(
            "{what} must be finite and >= 0 (got {v})"
        )));
    }
    Ok(v.round() as u32)
}

#[cfg(test)]
#[path = "../../tests/unit/text/metrics.rs"]
mod tests;
