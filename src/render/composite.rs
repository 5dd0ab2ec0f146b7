use crate::foundation::error::{SubsError, SubsResult};

use super::surface::{Canvas, PremulRgba8, RenderLayer};

/// Premultiplied source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    let sa = src[3];
    if sa == 0 {
        return dst;
    }
    if sa == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));
    for i in 0..3 {
        out[i] = add_sat_u8(src[i], mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Source-over `src` onto `dst`; both buffers must have the same length.
pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> SubsResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SubsError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Paste a canvas-sized layer using its own alpha as the mask.
pub fn paste_layer(canvas: &mut Canvas, layer: &RenderLayer) -> SubsResult<()> {
    if canvas.width() != layer.width() || canvas.height() != layer.height() {
        return Err(SubsError::render(format!(
            "layer is {}x{} but canvas is {}x{}",
            layer.width(),
            layer.height(),
            canvas.width(),
            canvas.height()
        )));
    }
    over_in_place(canvas.data_mut(), layer.data())
}

/// Paste `src` with its top-left corner at `(x, y)`, clipped to the canvas.
pub fn paste_at(canvas: &mut Canvas, src: &Canvas, x: i64, y: i64) {
    let (dw, dh) = (i64::from(canvas.width()), i64::from(canvas.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let src_data = src.data();
    let dst_data = canvas.data_mut();
    for dy in y0..y1 {
        let sy = dy - y;
        let span = ((x1 - x0) * 4) as usize;
        let d_start = ((dy * dw + x0) * 4) as usize;
        let s_start = ((sy * sw + (x0 - x)) * 4) as usize;
        let d_row = &mut dst_data[d_start..d_start + span];
        let s_row = &src_data[s_start..s_start + span];
        for (d, s) in d_row.chunks_exact_mut(4).zip(s_row.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
    }
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
