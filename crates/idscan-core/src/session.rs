use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::consts::ZOOM_DEFAULT_PERCENT;
use crate::error::Result;
use crate::geometry::{Point, Size};
use crate::selection::SelectionRegion;
use crate::transform::TransformState;

/// Persisted editor state for one logical image slot.
///
/// The fit scale is image-derived and recomputed on open, so it is not
/// stored here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditSession {
    #[serde(default = "default_zoom")]
    pub zoom_percent: i32,
    #[serde(default)]
    pub rotation_degrees: i32,
    #[serde(default)]
    pub pan_offset: Point,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection: Option<SelectionRegion>,
}

fn default_zoom() -> i32 {
    ZOOM_DEFAULT_PERCENT
}

impl Default for EditSession {
    fn default() -> Self {
        Self {
            zoom_percent: ZOOM_DEFAULT_PERCENT,
            rotation_degrees: 0,
            pan_offset: Point::ZERO,
            selection: None,
        }
    }
}

impl EditSession {
    pub fn capture(transform: &TransformState, selection: Option<&SelectionRegion>) -> Self {
        Self {
            zoom_percent: transform.zoom_percent(),
            rotation_degrees: transform.rotation_degrees(),
            pan_offset: transform.pan_offset(),
            selection: selection.copied(),
        }
    }

    /// Rebuild a transform for an image with the given fit scale. Stored
    /// values go through the same clamping as live input.
    pub fn transform(&self, fit_scale: f64, viewport: Size) -> TransformState {
        TransformState::restored(
            fit_scale,
            self.zoom_percent,
            self.rotation_degrees,
            self.pan_offset,
            viewport,
        )
    }
}

/// Edit sessions keyed by image slot name (e.g. `"front-id-photo"`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionStore {
    #[serde(default)]
    pub slots: BTreeMap<String, EditSession>,
}

impl SessionStore {
    /// Load a store from a TOML file. A missing file yields an empty store.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No session file, starting empty");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        debug!(path = %path.display(), slots = self.slots.len(), "Session file saved");
        Ok(())
    }

    pub fn get(&self, slot: &str) -> Option<&EditSession> {
        self.slots.get(slot)
    }

    pub fn insert(&mut self, slot: impl Into<String>, session: EditSession) {
        self.slots.insert(slot.into(), session);
    }

    pub fn remove(&mut self, slot: &str) -> Option<EditSession> {
        self.slots.remove(slot)
    }
}
