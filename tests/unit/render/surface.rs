use super::*;

#[test]
fn rgba_image_round_trip_keeps_opaque_pixels() {
    let mut img = image::RgbaImage::new(2, 1);
    img.put_pixel(0, 0, image::Rgba([10, 20, 30, 255]));
    img.put_pixel(1, 0, image::Rgba([99, 99, 99, 0]));

    let canvas = Canvas::from_rgba_image(img);
    assert_eq!(canvas.pixel(0, 0), Some([10, 20, 30, 255]));
    assert_eq!(canvas.pixel(1, 0), Some([0, 0, 0, 0]));
    assert_eq!(canvas.pixel(2, 0), None);

    let back = canvas.into_rgba_image().unwrap();
    assert_eq!(back.get_pixel(0, 0).0, [10, 20, 30, 255]);
    assert_eq!(back.get_pixel(1, 0).0, [0, 0, 0, 0]);
}

#[test]
fn filled_canvas_is_premultiplied_internally() {
    let canvas = Canvas::filled(1, 1, [200, 0, 0, 128]).unwrap();
    assert_eq!(canvas.data()[3], 128);
    assert!(canvas.data()[0] < 200);
}

#[test]
fn layer_blend_clips_out_of_bounds() {
    let mut layer = RenderLayer::transparent(3, 2).unwrap();
    assert!(layer.is_clear());

    layer.blend_pixel(-1, 0, [255, 0, 0, 255]);
    layer.blend_pixel(3, 0, [255, 0, 0, 255]);
    layer.blend_pixel(0, 2, [255, 0, 0, 255]);
    assert!(layer.is_clear());

    layer.blend_pixel(2, 1, [0, 0, 255, 255]);
    assert_eq!(layer.pixel(2, 1), Some([0, 0, 255, 255]));
    assert!(!layer.is_clear());
}

#[test]
fn missing_image_is_a_configuration_error() {
    let err = Canvas::open(std::path::Path::new("definitely/not/here.png")).unwrap_err();
    assert!(err.is_configuration());
}
