use tracing::debug;

use crate::consts::{ROTATION_STEP_DEGREES, ZOOM_STEP_PERCENT};
use crate::frame::EditorLayout;
use crate::geometry::Point;
use crate::selection::SelectionRegion;
use crate::transform::{CoordinateMapper, TransformState};

/// User input understood by the editor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorEvent {
    PointerDown(Point),
    PointerMove(Point),
    PointerUp,
    ZoomIn,
    ZoomOut,
    /// Zoom slider, in percent.
    SetZoom(i32),
    RotateLeft,
    RotateRight,
    /// Rotation slider, in degrees.
    SetRotation(i32),
    Reset,
}

/// Drag gesture in progress.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Panning the image; remembers where the drag started.
    Panning { start_pointer: Point, start_pan: Point },
    /// Moving the scan box; remembers its top-left at drag start.
    MovingBox { start_pointer: Point, start_box: Point },
}

/// Everything an event may read or mutate.
pub struct EditTarget<'a> {
    pub transform: &'a mut TransformState,
    pub selection: Option<&'a mut SelectionRegion>,
    pub layout: &'a EditorLayout,
    pub image_width: u32,
    pub image_height: u32,
}

/// Turns pointer, slider and button events into transform and selection
/// updates. One drag at a time: a pointer-down during a drag is ignored.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    gesture: Gesture,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture != Gesture::Idle
    }

    /// Apply one event. Returns `true` if the transform or selection changed.
    pub fn dispatch(&mut self, event: EditorEvent, target: EditTarget<'_>) -> bool {
        let EditTarget {
            transform,
            selection,
            layout,
            image_width,
            image_height,
        } = target;

        match event {
            EditorEvent::PointerDown(p) => {
                self.pointer_down(p, transform, selection.as_deref(), layout, image_width, image_height);
                false
            }
            EditorEvent::PointerMove(p) => self.pointer_move(p, transform, selection, layout),
            EditorEvent::PointerUp => {
                self.gesture = Gesture::Idle;
                false
            }
            EditorEvent::ZoomIn => zoom_by(transform, ZOOM_STEP_PERCENT),
            EditorEvent::ZoomOut => zoom_by(transform, -ZOOM_STEP_PERCENT),
            EditorEvent::SetZoom(percent) => {
                let before = transform.zoom_percent();
                transform.set_zoom(percent);
                before != transform.zoom_percent()
            }
            EditorEvent::RotateLeft => {
                transform.rotate_by(-ROTATION_STEP_DEGREES);
                true
            }
            EditorEvent::RotateRight => {
                transform.rotate_by(ROTATION_STEP_DEGREES);
                true
            }
            EditorEvent::SetRotation(degrees) => {
                let before = transform.rotation_degrees();
                transform.set_rotation(degrees);
                before != transform.rotation_degrees()
            }
            EditorEvent::Reset => {
                self.gesture = Gesture::Idle;
                let before = *transform;
                transform.reset();
                before != *transform
            }
        }
    }

    fn pointer_down(
        &mut self,
        p: Point,
        transform: &TransformState,
        selection: Option<&SelectionRegion>,
        layout: &EditorLayout,
        image_width: u32,
        image_height: u32,
    ) {
        if self.is_dragging() {
            return;
        }

        // The box is hit-tested before the image.
        if let Some(sel) = selection.filter(|s| s.contains(p)) {
            self.gesture = Gesture::MovingBox {
                start_pointer: p,
                start_box: Point::new(sel.x, sel.y),
            };
            debug!(x = p.x, y = p.y, "Scan box drag started");
            return;
        }

        let mapper = CoordinateMapper::new(transform, layout, image_width, image_height);
        let native = mapper.to_native(p);
        let inside = native.x >= 0.0
            && native.y >= 0.0
            && native.x < image_width as f64
            && native.y < image_height as f64;
        if inside {
            self.gesture = Gesture::Panning {
                start_pointer: p,
                start_pan: transform.pan_offset(),
            };
            debug!(x = p.x, y = p.y, "Pan drag started");
        }
    }

    fn pointer_move(
        &mut self,
        p: Point,
        transform: &mut TransformState,
        selection: Option<&mut SelectionRegion>,
        layout: &EditorLayout,
    ) -> bool {
        match self.gesture {
            Gesture::Idle => false,
            Gesture::Panning {
                start_pointer,
                start_pan,
            } => {
                let before = transform.pan_offset();
                transform.set_pan(start_pan + (p - start_pointer), layout.viewport);
                before != transform.pan_offset()
            }
            Gesture::MovingBox {
                start_pointer,
                start_box,
            } => match selection {
                Some(sel) => {
                    let before = *sel;
                    sel.move_to(start_box + (p - start_pointer), layout.viewport);
                    before != *sel
                }
                None => {
                    self.gesture = Gesture::Idle;
                    false
                }
            },
        }
    }
}

fn zoom_by(transform: &mut TransformState, step: i32) -> bool {
    let before = transform.zoom_percent();
    transform.set_zoom(before + step);
    before != transform.zoom_percent()
}
