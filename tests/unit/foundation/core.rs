use super::*;

#[test]
fn parse_hex_and_names() {
    assert_eq!(Rgba8::parse("#ff8000").unwrap(), Rgba8::rgb(255, 128, 0));
    assert_eq!(
        Rgba8::parse("#FF800080").unwrap(),
        Rgba8::rgba(255, 128, 0, 128)
    );
    assert_eq!(Rgba8::parse("White").unwrap(), Rgba8::rgb(255, 255, 255));
    assert!(Rgba8::parse("#12345").is_err());
    assert!(Rgba8::parse("chartreuse-ish").is_err());
}

#[test]
fn deserialize_all_reprs() {
    let c: Rgba8 = serde_json::from_str("\"#000000\"").unwrap();
    assert_eq!(c, Rgba8::BLACK);
    let c: Rgba8 = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(c, Rgba8::rgb(1, 2, 3));
    let c: Rgba8 = serde_json::from_str("[1, 2, 3, 4]").unwrap();
    assert_eq!(c, Rgba8::rgba(1, 2, 3, 4));
    let c: Rgba8 = serde_json::from_str(r#"{"r": 9, "g": 8, "b": 7}"#).unwrap();
    assert_eq!(c, Rgba8::rgb(9, 8, 7));
    assert!(serde_json::from_str::<Rgba8>("[1, 2]").is_err());
}

#[test]
fn premul_then_unpremul_keeps_opaque_and_clears_transparent() {
    assert_eq!(premul_px([10, 20, 30, 255]), [10, 20, 30, 255]);
    assert_eq!(unpremul_px(premul_px([10, 20, 30, 255])), [10, 20, 30, 255]);
    assert_eq!(premul_px([200, 100, 50, 0]), [0, 0, 0, 0]);
    assert_eq!(unpremul_px([0, 0, 0, 0]), [0, 0, 0, 0]);
}

#[test]
fn premul_half_alpha() {
    assert_eq!(
        Rgba8::rgba(200, 100, 0, 128).to_premul(),
        [
            ((200u16 * 128 + 127) / 255) as u8,
            ((100u16 * 128 + 127) / 255) as u8,
            0,
            128
        ]
    );
}
