use idscan_core::config::{EditorConfig, ScanConfig};
use idscan_core::consts::MAX_DECODE_PIXELS;
use idscan_core::error::IdScanError;
use idscan_core::frame::{EditorLayout, FrameKind};

#[test]
fn test_default_values() {
    let c = EditorConfig::default();
    assert_eq!(c.selection_box, 60.0);
    assert_eq!(c.viewport_margin, 0.0);
    assert!(c.raster.smooth_first_pass);
    assert_eq!(c.scan.scales, vec![1.0, 2.0, 4.0, 0.5]);
    assert!(c.scan.try_inverted);
    assert!(c.scan.fallback_to_full_image);
    assert_eq!(c.scan.max_decode_pixels, MAX_DECODE_PIXELS);
    assert!(c.validate().is_ok());
}

#[test]
fn test_empty_document_gives_defaults() {
    assert_eq!(EditorConfig::from_toml("").unwrap(), EditorConfig::default());
}

#[test]
fn test_toml_round_trip() {
    let mut c = EditorConfig::default();
    c.selection_box = 80.0;
    c.raster.smooth_first_pass = false;
    c.scan.scales = vec![1.0, 3.0];
    let text = c.to_toml().unwrap();
    assert_eq!(EditorConfig::from_toml(&text).unwrap(), c);
}

#[test]
fn test_partial_document() {
    let c = EditorConfig::from_toml("[scan]\ntry_inverted = false\n").unwrap();
    assert!(!c.scan.try_inverted);
    assert_eq!(c.scan.scales, ScanConfig::default().scales);
    assert_eq!(c.selection_box, 60.0);
}

#[test]
fn test_validation_errors() {
    for doc in [
        "selection_box = 0.0",
        "viewport_margin = -1.0",
        "[scan]\nscales = []",
        "[scan]\nscales = [1.0, -2.0]",
        "[scan]\nmax_decode_pixels = 0",
    ] {
        assert!(
            matches!(EditorConfig::from_toml(doc), Err(IdScanError::Config(_))),
            "{doc}"
        );
    }
}

#[test]
fn test_syntax_error() {
    assert!(matches!(
        EditorConfig::from_toml("selection_box = "),
        Err(IdScanError::TomlParse(_))
    ));
}

// ---------------------------------------------------------------------------
// Frames
// ---------------------------------------------------------------------------

#[test]
fn test_frame_names_round_trip() {
    for &kind in FrameKind::ALL {
        assert_eq!(kind.to_string().parse::<FrameKind>().unwrap(), kind);
    }
    assert_eq!("ID-CARD".parse::<FrameKind>().unwrap(), FrameKind::IdCard);
    assert!(matches!(
        "passport".parse::<FrameKind>(),
        Err(IdScanError::UnknownFrame(_))
    ));
}

#[test]
fn test_margin_grows_viewport() {
    let layout = EditorLayout::centered(FrameKind::Plate, 10.0);
    assert_eq!(layout.viewport.width, 420.0);
    assert_eq!(layout.viewport.height, 320.0);
    assert_eq!(layout.frame.x, 10.0);
    assert_eq!(layout.frame_center(), layout.viewport_center());
}
