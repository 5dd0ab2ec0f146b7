use super::*;

fn dejavu(size_px: f32) -> FontSpec {
    FontSpec::new(
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts/DejaVuSans.ttf"),
        size_px,
    )
}

#[test]
fn missing_font_is_a_configuration_error() {
    let mut r = VelloTextRasterizer::new();
    let err = r
        .load_font(&FontSpec::new("no/such/font.ttf", 12.0))
        .unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn garbage_font_bytes_are_rejected() {
    let dir = std::env::temp_dir().join(format!("kksubs-engine-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("garbage.ttf");
    std::fs::write(&path, b"not a font at all").unwrap();

    let mut r = VelloTextRasterizer::new();
    assert!(r.load_font(&FontSpec::new(&path, 12.0)).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn loads_font_once_and_reports_family() {
    let mut r = VelloTextRasterizer::new();
    let a = r.load_font(&dejavu(20.0)).unwrap();
    let b = r.load_font(&dejavu(40.0)).unwrap();
    assert_eq!(a.family(), b.family());
    assert!(a.family().contains("DejaVu"));
    assert_eq!(r.fonts.len(), 1);
    assert_eq!(b.size_px(), 40.0);
}

#[test]
fn advance_grows_with_text_and_size() {
    let mut r = VelloTextRasterizer::new();
    let small = r.load_font(&dejavu(20.0)).unwrap();
    let big = r.load_font(&dejavu(40.0)).unwrap();

    let one = r.advance(&small, "HELLO").unwrap();
    let two = r.advance(&small, "HELLO HELLO").unwrap();
    assert!(one > 0.0);
    assert!(two > one * 1.5);
    assert!(r.advance(&big, "HELLO").unwrap() > one * 1.5);
    assert_eq!(r.advance(&small, "").unwrap(), 0.0);
}

#[test]
fn reference_glyph_metrics_are_plausible() {
    let mut r = VelloTextRasterizer::new();
    let font = r.load_font(&dejavu(32.0)).unwrap();
    let bottom = r.ink_bottom(&font, "l").unwrap();
    let descent = r.descent(&font).unwrap();
    assert!(bottom > 16.0 && bottom <= 40.0, "bottom = {bottom}");
    assert!(descent > 2.0 && descent < 16.0, "descent = {descent}");
}

#[test]
fn draw_line_inks_only_inside_its_box() {
    let mut r = VelloTextRasterizer::new();
    let font = r.load_font(&dejavu(24.0)).unwrap();
    let mut layer = RenderLayer::transparent(200, 80).unwrap();

    r.draw_line(
        &font,
        "Hi",
        Point::new(100.0, 10.0),
        &Pen::fill(Rgba8::rgb(255, 0, 0)),
        &mut layer,
    )
    .unwrap();

    assert!(!layer.is_clear());
    for y in 0..80 {
        for x in 0..95 {
            assert_eq!(layer.pixel(x, y).unwrap()[3], 0, "ink left of origin at ({x}, {y})");
        }
    }
}

#[test]
fn stroke_widens_the_ink() {
    let mut r = VelloTextRasterizer::new();
    let font = r.load_font(&dejavu(24.0)).unwrap();
    let count = |layer: &RenderLayer| layer.data().chunks_exact(4).filter(|p| p[3] != 0).count();

    let mut plain = RenderLayer::transparent(120, 60).unwrap();
    r.draw_line(&font, "Hi", Point::new(10.0, 10.0), &Pen::fill(Rgba8::BLACK), &mut plain)
        .unwrap();

    let mut stroked = RenderLayer::transparent(120, 60).unwrap();
    let pen = Pen::with_stroke(
        Rgba8::BLACK,
        Some(crate::model::StrokeSpec {
            color: Rgba8::rgb(255, 255, 255),
            width: 3.0,
        }),
    );
    r.draw_line(&font, "Hi", Point::new(10.0, 10.0), &pen, &mut stroked)
        .unwrap();

    assert!(count(&stroked) > count(&plain));
}

#[test]
fn oversized_layer_is_a_render_error() {
    let mut r = VelloTextRasterizer::new();
    let font = r.load_font(&dejavu(12.0)).unwrap();
    let mut layer = RenderLayer::transparent(70_000, 1).unwrap();
    let err = r
        .draw_line(&font, "x", Point::ZERO, &Pen::fill(Rgba8::BLACK), &mut layer)
        .unwrap_err();
    assert!(!err.is_configuration());
}

fn ink_box(layer: &RenderLayer) -> Option<(u32, u32, u32, u32)> {
    let mut out: Option<(u32, u32, u32, u32)> = None;
    for y in 0..layer.height() {
        for x in 0..layer.width() {
            if layer.pixel(x, y).unwrap()[3] == 0 {
                continue;
            }
            out = Some(match out {
                None => (x, y, x + 1, y + 1),
                Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
            });
        }
    }
    out
}

#[test]
fn glyphs_advance_along_the_line() {
    let mut r = VelloTextRasterizer::new();
    let font = r.load_font(&dejavu(24.0)).unwrap();
    let advance = r.advance(&font, "HELLO").unwrap();
    let mut layer = RenderLayer::transparent(200, 60).unwrap();
    r.draw_line(
        &font,
        "HELLO",
        Point::new(20.0, 10.0),
        &Pen::fill(Rgba8::BLACK),
        &mut layer,
    )
    .unwrap();

    let (x0, _, x1, _) = ink_box(&layer).unwrap();
    let ink = (x1 - x0) as f32;
    assert!(ink >= advance * 0.85 && ink <= advance + 2.0, "ink {ink} advance {advance}");
}

#[test]
fn baseline_sits_below_the_origin() {
    let mut r = VelloTextRasterizer::new();
    let font = r.load_font(&dejavu(24.0)).unwrap();
    let mut layer = RenderLayer::transparent(120, 80).unwrap();
    r.draw_line(&font, "l", Point::new(10.0, 20.0), &Pen::fill(Rgba8::BLACK), &mut layer)
        .unwrap();

    let (_, y0, _, y1) = ink_box(&layer).unwrap();
    assert!(y0 >= 20, "ink starts above the line box at {y0}");
    let bottom = r.ink_bottom(&font, "l").unwrap();
    assert!((y1 as f32 - 20.0 - bottom).abs() <= 1.0, "y1 {y1} bottom {bottom}");
}

#[test]
fn height_basis_exceeds_the_descent() {
    let mut r = VelloTextRasterizer::new();
    let font = r.load_font(&dejavu(24.0)).unwrap();
    let descent = r.descent(&font).unwrap();
    let basis = crate::text::metrics::height_basis(&mut r, &font).unwrap();
    assert!(basis as f32 > descent + 12.0, "basis {basis} descent {descent}");
    assert!(basis <= 32, "basis {basis}");
}
