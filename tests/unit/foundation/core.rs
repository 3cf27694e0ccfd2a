use super::*;

#[test]
fn parse_hex_rgb_is_opaque() {
    let c = Rgba8::parse_hex("#FF3B30").unwrap();
    assert_eq!(c, Rgba8::rgb(0xFF, 0x3B, 0x30));
    assert_eq!(c.a, 255);
}

#[test]
fn parse_hex_accepts_lowercase_and_alpha() {
    let c: Rgba8 = "#b0c4de80".parse().unwrap();
    assert_eq!(c, Rgba8::new(0xB0, 0xC4, 0xDE, 0x80));
    assert_eq!(c.to_hex(), "#B0C4DE80");
}

#[test]
fn parse_hex_rejects_malformed() {
    for bad in ["FF0000", "#FF00", "#GG0000", "#FF00000", ""] {
        let err = Rgba8::parse_hex(bad).unwrap_err();
        assert!(matches!(err, DiaryError::InvalidInput(_)), "{bad}");
    }
}

#[test]
fn color_serde_uses_hex_strings() {
    let json = serde_json::to_string(&Rgba8::rgb(0, 122, 255)).unwrap();
    assert_eq!(json, "\"#007AFF\"");
    let back: Rgba8 = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Rgba8::rgb(0, 122, 255));
    assert!(serde_json::from_str::<Rgba8>("\"blue\"").is_err());
}

#[test]
fn canvas_contains_is_half_open() {
    let c = Canvas::new(4, 3);
    assert!(c.contains(0, 0));
    assert!(c.contains(3, 2));
    assert!(!c.contains(4, 0));
    assert!(!c.contains(0, 3));
    assert!(!c.contains(-1, 1));
    assert_eq!(c.area(), 12);
    assert!(Canvas::new(0, 5).is_empty());
}
