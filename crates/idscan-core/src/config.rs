use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_SCAN_SCALES, MAX_DECODE_PIXELS, SELECTION_BOX_SIZE};
use crate::error::{IdScanError, Result};

/// Top-level editor configuration, loadable from TOML.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// Edge length of the QR scan box, in display pixels.
    #[serde(default = "default_selection_box")]
    pub selection_box: f64,
    /// Space between the frame and the viewport edge, in display pixels.
    #[serde(default)]
    pub viewport_margin: f64,
    #[serde(default)]
    pub raster: RasterConfig,
    #[serde(default)]
    pub scan: ScanConfig,
}

fn default_selection_box() -> f64 {
    SELECTION_BOX_SIZE
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            selection_box: SELECTION_BOX_SIZE,
            viewport_margin: 0.0,
            raster: RasterConfig::default(),
            scan: ScanConfig::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: EditorConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.selection_box.is_finite() && self.selection_box > 0.0) {
            return Err(IdScanError::Config(format!(
                "selection_box must be > 0 (got {})",
                self.selection_box
            )));
        }
        if !(self.viewport_margin.is_finite() && self.viewport_margin >= 0.0) {
            return Err(IdScanError::Config(format!(
                "viewport_margin must be >= 0 (got {})",
                self.viewport_margin
            )));
        }
        self.scan.validate()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RasterConfig {
    /// Bilinear sampling in the frame-resolution pass. The upscale pass is
    /// always nearest-neighbour.
    #[serde(default = "default_true")]
    pub smooth_first_pass: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            smooth_first_pass: true,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ScanConfig {
    /// Scale factors tried in order; the first successful decode wins.
    #[serde(default = "default_scales")]
    pub scales: Vec<f32>,
    /// Retry each scale with inverted polarity.
    #[serde(default = "default_true")]
    pub try_inverted: bool,
    /// Scan the whole edited image when the scan box yields nothing.
    #[serde(default = "default_true")]
    pub fallback_to_full_image: bool,
    /// Scales whose rescaled plane would exceed this many pixels are skipped.
    #[serde(default = "default_max_decode_pixels")]
    pub max_decode_pixels: usize,
}

fn default_scales() -> Vec<f32> {
    DEFAULT_SCAN_SCALES.to_vec()
}

fn default_max_decode_pixels() -> usize {
    MAX_DECODE_PIXELS
}

fn default_true() -> bool {
    true
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            scales: default_scales(),
            try_inverted: true,
            fallback_to_full_image: true,
            max_decode_pixels: MAX_DECODE_PIXELS,
        }
    }
}

impl ScanConfig {
    pub fn validate(&self) -> Result<()> {
        if self.scales.is_empty() {
            return Err(IdScanError::Config("scan.scales must not be empty".into()));
        }
        if self.max_decode_pixels == 0 {
            return Err(IdScanError::Config("scan.max_decode_pixels must be > 0".into()));
        }
        if let Some(bad) = self.scales.iter().find(|s| !(s.is_finite() && **s > 0.0)) {
            return Err(IdScanError::Config(format!(
                "scan.scales entries must be > 0 (got {bad})"
            )));
        }
        Ok(())
    }
}
