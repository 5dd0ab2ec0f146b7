use super::*;
use crate::foundation::core::Vec2;

fn textbox(alignment: Alignment, push: Push, anchor: (f64, f64)) -> TextboxSpec {
    TextboxSpec {
        alignment,
        anchor: Vec2::new(anchor.0, anchor.1),
        wrap_columns: 40,
        push,
    }
}

#[test]
fn horizontal_formulas_without_offset() {
    let w = 60u32;
    let at = |a| position_lines(&[w], 10, (200, 100), &textbox(a, Push::Up, (0.0, 0.0)))[0].x;
    assert_eq!(at(Alignment::Center), 100.0 - 30.0);
    assert_eq!(at(Alignment::Left), 130.0 - 30.0);
    assert_eq!(at(Alignment::Right), 70.0 - 30.0);
}

#[test]
fn left_grows_right_and_right_grows_left_from_anchor() {
    let tb = |a| textbox(a, Push::Up, (-40.0, 0.0));
    let left = position_lines(&[10, 80], 10, (200, 100), &tb(Alignment::Left));
    assert_eq!(left[0].x, left[1].x);
    assert_eq!(left[0].x, 60.0);

    let right = position_lines(&[10, 80], 10, (200, 100), &tb(Alignment::Right));
    assert_eq!(right[0].x + 10.0, right[1].x + 80.0);
    assert_eq!(right[0].x + 10.0, 60.0);
}

#[test]
fn push_up_ends_the_block_at_the_anchor() {
    let pos = position_lines(&[5, 5, 5], 20, (100, 300), &textbox(Alignment::Center, Push::Up, (0.0, 0.0)));
    let ys: Vec<f64> = pos.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![150.0 - 60.0, 150.0 - 40.0, 150.0 - 20.0]);
}

#[test]
fn push_down_starts_the_block_at_the_anchor() {
    let pos = position_lines(&[5, 5, 5], 20, (100, 300), &textbox(Alignment::Center, Push::Down, (0.0, 50.0)));
    let ys: Vec<f64> = pos.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![100.0, 120.0, 140.0]);
}

#[test]
fn off_canvas_positions_are_not_clamped() {
    let pos = position_lines(&[50], 20, (100, 100), &textbox(Alignment::Center, Push::Up, (500.0, -500.0)));
    assert_eq!(pos[0], Point::new(525.0, 530.0));
}

#[test]
fn single_line_end_to_end_origin() {
    let pos = position_lines(&[100], 20, (200, 100), &textbox(Alignment::Center, Push::Up, (0.0, 0.0)));
    assert_eq!(pos, vec![Point::new(50.0, 30.0)]);
}

#[test]
fn no_lines_no_positions() {
    assert!(position_lines(&[], 20, (10, 10), &TextboxSpec::default()).is_empty());
}
