use crate::foundation::core::Point;
use crate::model::{Alignment, Push, TextboxSpec};

/// Origin (top-left of the line box) of every physical line.
///
/// `widths` holds one pixel width per line; `height_basis` is the shared line height. Results are
/// not clamped to the canvas, so anchors may push text partially or fully off-canvas.
pub fn position_lines(
    widths: &[u32],
    height_basis: u32,
    canvas_size: (u32, u32),
    textbox: &TextboxSpec,
) -> Vec<Point> {
    let n = widths.len();
    widths
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            Point::new(
                line_x(f64::from(w), canvas_size.0, textbox),
                line_y(i, n, height_basis, canvas_size.1, textbox),
            )
        })
        .collect()
}

fn line_x(w: f64, canvas_width: u32, textbox: &TextboxSpec) -> f64 {
    let cw = f64::from(canvas_width);
    let dx = textbox.anchor.x;
    match textbox.alignment {
        Alignment::Left => (cw + w) / 2.0 + dx - w / 2.0,
        Alignment::Center => cw / 2.0 + dx - w / 2.0,
        Alignment::Right => (cw - w) / 2.0 + dx - w / 2.0,
    }
}

fn line_y(i: usize, n: usize, height_basis: u32, canvas_height: u32, textbox: &TextboxSpec) -> f64 {
    let h = f64::from(height_basis);
    let top = f64::from(canvas_height) / 2.0 - textbox.anchor.y;
    match textbox.push {
        Push::Up => top - h * (n - i) as f64,
        Push::Down => top + h * i as f64,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/positioner.rs"]
mod tests;
