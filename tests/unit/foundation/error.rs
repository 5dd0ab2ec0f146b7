use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SubsError::configuration("x")
            .to_string()
            .contains("configuration error:")
    );
    assert!(SubsError::render("x").to_string().contains("render error:"));
    assert!(
        SubsError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn only_configuration_reports_is_configuration() {
    assert!(SubsError::configuration("bad push").is_configuration());
    assert!(!SubsError::render("bad glyph").is_configuration());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SubsError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn in_context_keeps_the_variant() {
    let err = SubsError::configuration("bad push").in_context("profile \"main\"");
    assert!(err.is_configuration());
    assert_eq!(
        err.to_string(),
        "configuration error: profile \"main\": bad push"
    );

    let other = SubsError::Other(anyhow::anyhow!("disk full")).in_context("write out.png");
    assert!(other.to_string().contains("write out.png"));
}
