use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IdScanError;
use crate::geometry::{Point, Rect, Size};

/// Fixed output window an edited image must fill exactly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameKind {
    /// Portrait 3x4 photo (avatar / registration photo).
    Photo3x4,
    /// National ID card, ISO/IEC 7810 ID-1 aspect.
    IdCard,
    /// Vehicle licence plate photo.
    Plate,
}

impl FrameKind {
    pub const ALL: &'static [Self] = &[Self::Photo3x4, Self::IdCard, Self::Plate];

    /// Display size of the frame in pixels.
    pub fn size(&self) -> Size {
        match self {
            Self::Photo3x4 => Size::new(300.0, 400.0),
            Self::IdCard => Size::new(428.0, 270.0),
            Self::Plate => Size::new(400.0, 300.0),
        }
    }

    /// Whether the frame carries a QR scan box.
    pub fn has_scan_box(&self) -> bool {
        matches!(self, Self::IdCard)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Photo3x4 => "photo-3x4",
            Self::IdCard => "id-card",
            Self::Plate => "plate",
        }
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrameKind {
    type Err = IdScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| IdScanError::UnknownFrame(s.to_string()))
    }
}

/// Editor viewport geometry: the viewport rect and the frame inside it,
/// both in display pixels relative to the viewport's top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorLayout {
    pub viewport: Size,
    pub frame: Rect,
}

impl EditorLayout {
    /// Viewport that surrounds the frame with `margin` pixels on every side.
    pub fn centered(kind: FrameKind, margin: f64) -> Self {
        let frame = kind.size();
        let margin = margin.max(0.0);
        Self {
            viewport: Size::new(frame.width + 2.0 * margin, frame.height + 2.0 * margin),
            frame: Rect::new(margin, margin, frame.width, frame.height),
        }
    }

    pub fn viewport_center(&self) -> Point {
        self.viewport.center()
    }

    pub fn frame_center(&self) -> Point {
        self.frame.center()
    }

    /// Scale at which the whole image fits inside the frame.
    pub fn fit_scale(&self, image_width: u32, image_height: u32) -> f64 {
        (self.frame.width / image_width as f64).min(self.frame.height / image_height as f64)
    }
}
