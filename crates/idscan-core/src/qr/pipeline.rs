use image::RgbaImage;
use tracing::{debug, info};

use crate::config::ScanConfig;

use super::decoder::SymbolDecoder;
use super::luma::LumaPlane;

/// Bit polarity of a decode attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Dark modules on a light background, as captured.
    Normal,
    /// Light modules on a dark background.
    Inverted,
}

/// Result of a decode sweep. Not finding a code is a normal outcome.
#[derive(Clone, Debug, PartialEq)]
pub enum DecodeOutcome {
    Found {
        payload: String,
        scale: f32,
        polarity: Polarity,
    },
    NotFound,
}

impl DecodeOutcome {
    pub fn payload(&self) -> Option<&str> {
        match self {
            Self::Found { payload, .. } => Some(payload),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// One (scale, polarity) step of the sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecodeAttempt {
    pub scale: f32,
    pub polarity: Polarity,
}

/// The ordered attempts a sweep makes under `config`.
///
/// For each scale: normal polarity first, then (if enabled) the inverted
/// plane. The "both polarities" retry re-tries normal polarity on the same
/// plane, which is deterministic, so only its inverted half is issued.
pub fn decode_plan(config: &ScanConfig) -> Vec<DecodeAttempt> {
    let mut plan = Vec::with_capacity(config.scales.len() * 2);
    for &scale in &config.scales {
        plan.push(DecodeAttempt {
            scale,
            polarity: Polarity::Normal,
        });
        if config.try_inverted {
            plan.push(DecodeAttempt {
                scale,
                polarity: Polarity::Inverted,
            });
        }
    }
    plan
}

/// Multi-scale, multi-polarity QR decode. Stops at the first success.
pub fn decode_qr(image: &RgbaImage, config: &ScanConfig, decoder: &dyn SymbolDecoder) -> DecodeOutcome {
    if image.width() == 0 || image.height() == 0 {
        return DecodeOutcome::NotFound;
    }
    decode_plane(&LumaPlane::from_rgba(image), config, decoder)
}

/// Same sweep as [`decode_qr`] on an already converted plane.
pub fn decode_plane(plane: &LumaPlane, config: &ScanConfig, decoder: &dyn SymbolDecoder) -> DecodeOutcome {
    if plane.is_empty() {
        return DecodeOutcome::NotFound;
    }

    let mut scaled: Option<(f32, LumaPlane)> = None;
    for attempt in decode_plan(config) {
        let (w, h) = plane.rescaled_dims(attempt.scale);
        if w.saturating_mul(h) > config.max_decode_pixels {
            debug!(scale = attempt.scale, width = w, height = h, "Scale skipped, plane too large");
            continue;
        }
        let stale = scaled.as_ref().map_or(true, |(s, _)| *s != attempt.scale);
        if stale {
            scaled = Some((attempt.scale, plane.rescaled(attempt.scale)));
        }
        let Some((_, plane_at_scale)) = scaled.as_ref() else {
            continue;
        };

        let result = match attempt.polarity {
            Polarity::Normal => decoder.decode(plane_at_scale),
            Polarity::Inverted => decoder.decode(&plane_at_scale.inverted()),
        };
        debug!(
            decoder = decoder.name(),
            scale = attempt.scale,
            polarity = ?attempt.polarity,
            width = plane_at_scale.width(),
            height = plane_at_scale.height(),
            found = result.is_some(),
            "QR decode attempt"
        );

        if let Some(payload) = result {
            info!(scale = attempt.scale, polarity = ?attempt.polarity, "QR code decoded");
            return DecodeOutcome::Found {
                payload,
                scale: attempt.scale,
                polarity: attempt.polarity,
            };
        }
    }

    DecodeOutcome::NotFound
}
