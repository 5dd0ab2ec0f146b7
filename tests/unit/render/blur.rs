use super::*;

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    let out = blur_rgba8_premul(&src, 1, 2, 0, 1.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn zero_radius_layer_is_bit_identical() {
    let mut layer = RenderLayer::transparent(4, 4).unwrap();
    layer.blend_pixel(1, 2, [40, 50, 60, 200]);
    let before = layer.clone();
    blur_layer(&mut layer, 0.0).unwrap();
    assert_eq!(layer, before);
}

#[test]
fn negative_radius_is_rejected() {
    let mut layer = RenderLayer::transparent(1, 1).unwrap();
    assert!(blur_layer(&mut layer, -2.0).unwrap_err().is_configuration());
}

#[test]
fn half_width_covers_three_sigma() {
    assert_eq!(kernel_half_width(1.0), 3);
    assert_eq!(kernel_half_width(2.5), 8);
    assert_eq!(kernel_half_width(0.1), 1);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let px = [10u8, 20u8, 30u8, 40u8];
    let src = px.repeat((w * h) as usize);
    let out = blur_rgba8_premul(&src, w, h, 3, 2.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_layer_spreads_energy_from_single_pixel() {
    let mut layer = RenderLayer::transparent(9, 9).unwrap();
    layer.blend_pixel(4, 4, [255, 255, 255, 255]);
    blur_layer(&mut layer, 1.0).unwrap();

    let nonzero = layer.data().chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = layer.data().chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 8);
    assert!(layer.pixel(4, 4).unwrap()[3] < 255);
}
