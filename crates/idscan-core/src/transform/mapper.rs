use crate::frame::EditorLayout;
use crate::geometry::{Point, Rect, Size};

use super::state::TransformState;

/// Maps between display space (editor viewport pixels under the current
/// transform) and native space (pixels of the original bitmap).
///
/// Display = rotate(native - image_center) * scale + viewport_center + pan.
#[derive(Clone, Copy, Debug)]
pub struct CoordinateMapper {
    scale: f64,
    rotation: f64,
    pan: Point,
    viewport_center: Point,
    image: Size,
}

impl CoordinateMapper {
    pub fn new(state: &TransformState, layout: &EditorLayout, image_width: u32, image_height: u32) -> Self {
        Self {
            scale: state.effective_scale(),
            rotation: state.normalized_rotation() as f64,
            pan: state.pan_offset(),
            viewport_center: layout.viewport_center(),
            image: Size::new(image_width as f64, image_height as f64),
        }
    }

    /// Native point to display point.
    pub fn to_display(&self, native: Point) -> Point {
        (native - self.image.center()).rotated(self.rotation) * self.scale
            + self.viewport_center
            + self.pan
    }

    /// Display point to native point, unclamped.
    ///
    /// Exact inverse of [`to_display`](Self::to_display); may land outside
    /// the image when the display point is not covered by it.
    pub fn to_native(&self, display: Point) -> Point {
        let offset = display - self.viewport_center - self.pan;
        offset.rotated(-self.rotation) / self.scale + self.image.center()
    }

    /// Display point to native point, clamped into the image bounds.
    pub fn to_native_clamped(&self, display: Point) -> Point {
        let p = self.to_native(display);
        Point::new(p.x.clamp(0.0, self.image.width), p.y.clamp(0.0, self.image.height))
    }

    /// Map a display rectangle to a native rectangle clamped to the image.
    ///
    /// Only the center goes through the rotation; the extents are divided by
    /// the scale and stay axis-aligned. Exact for rotations that are
    /// multiples of 180 degrees and for square boxes at multiples of 90.
    pub fn rect_to_native(&self, display: &Rect) -> Rect {
        let center = self.to_native(display.center());
        let width = display.width / self.scale;
        let height = display.height / self.scale;
        Rect::from_center(center, width, height).clamped_to(self.image.width, self.image.height)
    }

    /// Map a native rectangle to display space (center rotated, extents scaled).
    pub fn rect_to_display(&self, native: &Rect) -> Rect {
        let center = self.to_display(native.center());
        Rect::from_center(center, native.width * self.scale, native.height * self.scale)
    }
}
