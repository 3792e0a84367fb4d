use crate::consts::{
    ROTATION_SLIDER_MAX, ZOOM_DEFAULT_PERCENT, ZOOM_MAX_PERCENT, ZOOM_MIN_PERCENT,
};
use crate::geometry::{Point, Size};

/// Pan, zoom and rotation of the image inside the editor viewport.
///
/// Setters clamp instead of rejecting, so every value held here is valid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformState {
    zoom_percent: i32,
    fit_scale: f64,
    rotation_degrees: i32,
    pan_offset: Point,
}

impl TransformState {
    /// Defaults for a freshly loaded image with the given fit scale.
    ///
    /// A non-positive or non-finite fit scale falls back to 1.0.
    pub fn new(fit_scale: f64) -> Self {
        let fit_scale = if fit_scale.is_finite() && fit_scale > 0.0 {
            fit_scale
        } else {
            1.0
        };
        Self {
            zoom_percent: ZOOM_DEFAULT_PERCENT,
            fit_scale,
            rotation_degrees: 0,
            pan_offset: Point::ZERO,
        }
    }

    pub fn zoom_percent(&self) -> i32 {
        self.zoom_percent
    }

    pub fn fit_scale(&self) -> f64 {
        self.fit_scale
    }

    /// Raw rotation, possibly outside `[0, 360)` after repeated button steps.
    pub fn rotation_degrees(&self) -> i32 {
        self.rotation_degrees
    }

    /// Rotation reduced into `[0, 360)`.
    pub fn normalized_rotation(&self) -> i32 {
        self.rotation_degrees.rem_euclid(360)
    }

    pub fn pan_offset(&self) -> Point {
        self.pan_offset
    }

    /// Native-to-display scale: fit scale times zoom.
    pub fn effective_scale(&self) -> f64 {
        self.fit_scale * self.zoom_percent as f64 / 100.0
    }

    pub fn set_zoom(&mut self, percent: i32) {
        self.zoom_percent = percent.clamp(ZOOM_MIN_PERCENT, ZOOM_MAX_PERCENT);
    }

    /// Relative rotation; no clamping.
    pub fn rotate_by(&mut self, delta_degrees: i32) {
        self.rotation_degrees = self.rotation_degrees.wrapping_add(delta_degrees);
    }

    /// Absolute rotation from the slider, clamped to `[0, 360]`.
    pub fn set_rotation(&mut self, degrees: i32) {
        self.rotation_degrees = degrees.clamp(0, ROTATION_SLIDER_MAX);
    }

    /// Set the pan offset, clamped to half the viewport on each axis.
    pub fn set_pan(&mut self, pan: Point, viewport: Size) {
        let half_w = (viewport.width / 2.0).max(0.0);
        let half_h = (viewport.height / 2.0).max(0.0);
        self.pan_offset = Point::new(pan.x.clamp(-half_w, half_w), pan.y.clamp(-half_h, half_h));
    }

    /// Back to zoom 100, rotation 0, no pan. The fit scale is kept.
    pub fn reset(&mut self) {
        self.zoom_percent = ZOOM_DEFAULT_PERCENT;
        self.rotation_degrees = 0;
        self.pan_offset = Point::ZERO;
    }

    /// Rebuild from persisted values, passing each through its setter.
    pub(crate) fn restored(
        fit_scale: f64,
        zoom_percent: i32,
        rotation_degrees: i32,
        pan_offset: Point,
        viewport: Size,
    ) -> Self {
        let mut state = Self::new(fit_scale);
        state.set_zoom(zoom_percent);
        state.rotation_degrees = rotation_degrees;
        state.set_pan(pan_offset, viewport);
        state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamps() {
        let mut s = TransformState::new(0.5);
        s.set_zoom(10);
        assert_eq!(s.zoom_percent(), ZOOM_MIN_PERCENT);
        s.set_zoom(1000);
        assert_eq!(s.zoom_percent(), ZOOM_MAX_PERCENT);
        assert!((s.effective_scale() - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_rotation_normalizes_negative() {
        let mut s = TransformState::new(1.0);
        s.rotate_by(-90);
        assert_eq!(s.rotation_degrees(), -90);
        assert_eq!(s.normalized_rotation(), 270);
        s.rotate_by(900);
        assert_eq!(s.normalized_rotation(), 90);
    }

    #[test]
    fn test_invalid_fit_scale_falls_back() {
        assert_eq!(TransformState::new(0.0).fit_scale(), 1.0);
        assert_eq!(TransformState::new(f64::NAN).fit_scale(), 1.0);
    }
}
