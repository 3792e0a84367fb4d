#[allow(dead_code)]
mod common;

use std::sync::Mutex;

use image::{Rgba, RgbaImage};

use idscan_core::config::ScanConfig;
use idscan_core::qr::{
    decode_plan, decode_plane, decode_qr, DecodeOutcome, LumaPlane, Polarity, RqrrDecoder,
    SymbolDecoder,
};

// ---------------------------------------------------------------------------
// Scripted decoder
// ---------------------------------------------------------------------------

/// Records each attempt as (plane width, top-left luma) and succeeds only on
/// the configured one.
struct ScriptedDecoder {
    succeed_on: Option<(usize, u8)>,
    calls: Mutex<Vec<(usize, u8)>>,
}

impl ScriptedDecoder {
    fn new(succeed_on: Option<(usize, u8)>) -> Self {
        Self {
            succeed_on,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<(usize, u8)> {
        self.calls.lock().unwrap().clone()
    }
}

impl SymbolDecoder for ScriptedDecoder {
    fn name(&self) -> &str {
        "scripted"
    }

    fn decode(&self, plane: &LumaPlane) -> Option<String> {
        let key = (plane.width(), plane.data[[0, 0]]);
        self.calls.lock().unwrap().push(key);
        (Some(key) == self.succeed_on).then(|| "payload".to_string())
    }
}

/// 8x8 black image: luma 0 normal, 255 inverted.
fn black_8x8() -> RgbaImage {
    RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]))
}

// ---------------------------------------------------------------------------
// Sweep order and early exit
// ---------------------------------------------------------------------------

#[test]
fn test_plan_order_default() {
    let plan = decode_plan(&ScanConfig::default());
    let steps: Vec<(f32, Polarity)> = plan.iter().map(|a| (a.scale, a.polarity)).collect();
    assert_eq!(
        steps,
        vec![
            (1.0, Polarity::Normal),
            (1.0, Polarity::Inverted),
            (2.0, Polarity::Normal),
            (2.0, Polarity::Inverted),
            (4.0, Polarity::Normal),
            (4.0, Polarity::Inverted),
            (0.5, Polarity::Normal),
            (0.5, Polarity::Inverted),
        ]
    );
}

#[test]
fn test_plan_without_inversion() {
    let config = ScanConfig {
        try_inverted: false,
        ..ScanConfig::default()
    };
    assert!(decode_plan(&config).iter().all(|a| a.polarity == Polarity::Normal));
    assert_eq!(decode_plan(&config).len(), 4);
}

#[test]
fn test_sweep_visits_every_attempt_when_nothing_decodes() {
    let decoder = ScriptedDecoder::new(None);
    let out = decode_qr(&black_8x8(), &ScanConfig::default(), &decoder);
    assert_eq!(out, DecodeOutcome::NotFound);
    assert_eq!(
        decoder.calls(),
        vec![(8, 0), (8, 255), (16, 0), (16, 255), (32, 0), (32, 255), (4, 0), (4, 255)]
    );
}

#[test]
fn test_sweep_stops_at_first_success() {
    let decoder = ScriptedDecoder::new(Some((16, 255)));
    let out = decode_qr(&black_8x8(), &ScanConfig::default(), &decoder);
    assert_eq!(
        out,
        DecodeOutcome::Found {
            payload: "payload".into(),
            scale: 2.0,
            polarity: Polarity::Inverted,
        }
    );
    assert_eq!(decoder.calls(), vec![(8, 0), (8, 255), (16, 0), (16, 255)]);
}

#[test]
fn test_sweep_skips_scales_over_pixel_ceiling() {
    // 32x32 = 1024 pixels is over the ceiling; 16x16 = 256 is not.
    let config = ScanConfig {
        max_decode_pixels: 1000,
        ..ScanConfig::default()
    };
    let decoder = ScriptedDecoder::new(None);
    let out = decode_qr(&black_8x8(), &config, &decoder);
    assert_eq!(out, DecodeOutcome::NotFound);
    assert_eq!(
        decoder.calls(),
        vec![(8, 0), (8, 255), (16, 0), (16, 255), (4, 0), (4, 255)]
    );
}

#[test]
fn test_empty_image_is_not_found() {
    let decoder = ScriptedDecoder::new(Some((0, 0)));
    let out = decode_qr(&RgbaImage::new(0, 0), &ScanConfig::default(), &decoder);
    assert_eq!(out, DecodeOutcome::NotFound);
    assert!(decoder.calls().is_empty());
}

// ---------------------------------------------------------------------------
// Real QR codes
// ---------------------------------------------------------------------------

#[test]
fn test_decodes_dark_on_light_at_native_scale() {
    let img = common::qr_image(common::SAMPLE_PAYLOAD, 200);
    let out = decode_qr(&img, &ScanConfig::default(), &RqrrDecoder);
    assert_eq!(out.payload(), Some(common::SAMPLE_PAYLOAD));
    assert!(matches!(out, DecodeOutcome::Found { scale, polarity: Polarity::Normal, .. } if scale == 1.0));
}

#[test]
fn test_decodes_light_on_dark_via_inversion() {
    let img = common::inverted(&common::qr_image("ABC|x|DEF|1/2/2000|0|Hanoi", 160));
    let out = decode_qr(&img, &ScanConfig::default(), &RqrrDecoder);
    assert_eq!(out.payload(), Some("ABC|x|DEF|1/2/2000|0|Hanoi"));
    assert!(matches!(out, DecodeOutcome::Found { polarity: Polarity::Inverted, .. }));
}

#[test]
fn test_inverted_code_not_found_without_inversion() {
    let img = common::inverted(&common::qr_image("ABC|x|DEF|1/2/2000|0|Hanoi", 160));
    let config = ScanConfig {
        try_inverted: false,
        ..ScanConfig::default()
    };
    assert_eq!(decode_qr(&img, &config, &RqrrDecoder), DecodeOutcome::NotFound);
}

#[test]
fn test_blank_image_not_found() {
    let img = RgbaImage::from_pixel(120, 120, Rgba([240, 240, 240, 255]));
    assert_eq!(
        decode_qr(&img, &ScanConfig::default(), &RqrrDecoder),
        DecodeOutcome::NotFound
    );
}

#[test]
fn test_decode_is_deterministic() {
    let img = common::qr_image(common::SAMPLE_PAYLOAD, 150);
    let plane = LumaPlane::from_rgba(&img);
    let config = ScanConfig::default();
    let first = decode_plane(&plane, &config, &RqrrDecoder);
    for _ in 0..3 {
        assert_eq!(decode_plane(&plane, &config, &RqrrDecoder), first);
    }

    let blank = LumaPlane::from_rgba(&RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255])));
    let miss = decode_plane(&blank, &config, &RqrrDecoder);
    assert_eq!(miss, DecodeOutcome::NotFound);
    assert_eq!(decode_plane(&blank, &config, &RqrrDecoder), miss);
}
