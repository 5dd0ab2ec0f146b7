use std::path::Path;

use crate::foundation::core::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place};
use crate::foundation::error::{SubsError, SubsResult};

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// The image a subtitle group is applied to.
///
/// Pixels are kept premultiplied while rendering and converted back to straight alpha when the
/// canvas is handed out as an [`image::RgbaImage`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Fully transparent canvas.
    pub fn new(width: u32, height: u32) -> SubsResult<Self> {
        Ok(Self {
            width,
            height,
            data: vec![0; buffer_len(width, height)?],
        })
    }

    /// Canvas filled with one straight-alpha color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> SubsResult<Self> {
        let mut canvas = Self::new(width, height)?;
        let px = crate::foundation::core::premul_px(rgba);
        for dst in canvas.data.chunks_exact_mut(4) {
            dst.copy_from_slice(&px);
        }
        Ok(canvas)
    }

    /// Take ownership of a straight-alpha image.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut data = img.into_raw();
        premultiply_rgba8_in_place(&mut data);
        Self {
            width,
            height,
            data,
        }
    }

    /// Convert any decoded image.
    pub fn from_dynamic(img: image::DynamicImage) -> Self {
        Self::from_rgba_image(img.into_rgba8())
    }

    /// Decode an image file from disk.
    pub fn open(path: &Path) -> SubsResult<Self> {
        let img = image::open(path).map_err(|e| {
            SubsError::configuration(format!("decode image \"{}\": {e}", path.display()))
        })?;
        Ok(Self::from_dynamic(img))
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Straight-alpha pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let idx = pixel_index(self.width, self.height, x, y)?;
        let px = [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ];
        Some(crate::foundation::core::unpremul_px(px))
    }

    /// Premultiplied pixel bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Convert back to a straight-alpha image.
    pub fn into_rgba_image(self) -> SubsResult<image::RgbaImage> {
        let Self {
            width,
            height,
            mut data,
        } = self;
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(width, height, data)
            .ok_or_else(|| SubsError::render("canvas buffer does not match its dimensions"))
    }
}

/// Canvas-sized transparent scratch buffer holding one visual layer of a subtitle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderLayer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RenderLayer {
    /// Allocate a transparent layer.
    pub fn transparent(width: u32, height: u32) -> SubsResult<Self> {
        Ok(Self {
            width,
            height,
            data: vec![0; buffer_len(width, height)?],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        let idx = pixel_index(self.width, self.height, x, y)?;
        Some([
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ])
    }

    /// Source-over one premultiplied pixel; out-of-bounds writes are dropped.
    pub fn blend_pixel(&mut self, x: i64, y: i64, src: PremulRgba8) {
        if x < 0 || y < 0 {
            return;
        }
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        let Some(idx) = pixel_index(self.width, self.height, x, y) else {
            return;
        };
        let dst = [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ];
        let out = super::composite::over(dst, src);
        self.data[idx..idx + 4].copy_from_slice(&out);
    }

    /// Whether every pixel is fully transparent.
    pub fn is_clear(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == 0)
    }

    /// Premultiplied pixel bytes, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable premultiplied pixel bytes, row-major.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

pub(crate) fn buffer_len(width: u32, height: u32) -> SubsResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| SubsError::render("rgba buffer size overflow"))
}

fn pixel_index(width: u32, height: u32, x: u32, y: u32) -> Option<usize> {
    if x >= width || y >= height {
        return None;
    }
    Some(((y as usize) * (width as usize) + (x as usize)) * 4)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
