use super::*;
use crate::test_support::{BlockRasterizer, block_font};

#[test]
fn width_is_the_rounded_advance() {
    let mut r = BlockRasterizer::default();
    let font = r.load_font(&block_font(20.0)).unwrap();
    let m = measure(&mut r, &font, "HELLO").unwrap();
    assert_eq!(m.width, 100);
    assert_eq!(m.height_basis, 20);
}

#[test]
fn height_basis_ignores_line_content() {
    let mut r = BlockRasterizer::default();
    let font = r.load_font(&block_font(10.0)).unwrap();
    let block = measure_block(&mut r, &font, &["a", "", "longer line"]).unwrap();
    assert_eq!(block.widths, vec![10, 0, 110]);
    assert_eq!(block.height_basis, 10);
    assert_eq!(
        measure(&mut r, &font, "").unwrap().height_basis,
        block.height_basis
    );
}

struct Broken;

impl TextRasterizer for Broken {
    type Font = ();

    fn load_font(&mut self, _: &crate::model::FontSpec) -> SubsResult<()> {
        Ok(())
    }
    fn advance(&mut self, _: &(), _: &str) -> SubsResult<f32> {
        Ok(f32::NAN)
    }
    fn ink_bottom(&mut self, _: &(), _: &str) -> SubsResult<f32> {
        Ok(12.4)
    }
    fn descent(&mut self, _: &()) -> SubsResult<f32> {
        Ok(3.6)
    }
    fn draw_line(
        &mut self,
        _: &(),
        _: &str,
        _: crate::foundation::core::Point,
        _: &crate::text::raster::Pen,
        _: &mut crate::render::surface::RenderLayer,
    ) -> SubsResult<()> {
        Ok(())
    }
}

#[test]
fn non_finite_advance_is_a_render_error() {
    let err = line_width(&mut Broken, &(), "x").unwrap_err();
    assert!(matches!(err, SubsError::Render(_)));
}

#[test]
fn height_basis_rounds_each_part() {
    assert_eq!(height_basis(&mut Broken, &()).unwrap(), 12 + 4);
}
