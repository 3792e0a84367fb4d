use std::sync::Arc;

use image::RgbaImage;
use tracing::info;

use crate::config::EditorConfig;
use crate::error::Result;
use crate::extract::{selection_to_native, NativeRect};
use crate::frame::{EditorLayout, FrameKind};
use crate::geometry::Point;
use crate::interaction::{EditTarget, EditorEvent, InteractionController};
use crate::io::{encode_png, ensure_non_empty};
use crate::qr::{RqrrDecoder, SymbolDecoder};
use crate::raster::rasterize;
use crate::scan::{scan_identity, ScanOutcome, ScanRequest};
use crate::selection::SelectionRegion;
use crate::session::EditSession;
use crate::transform::TransformState;

/// What the caller supplies to open the editor on one image slot.
pub struct EditorRequest {
    /// Owned by the caller and never modified by the editor.
    pub original: Arc<RgbaImage>,
    pub frame: FrameKind,
    /// Present: restore that state. Absent: start from defaults.
    pub prior_session: Option<EditSession>,
    pub config: EditorConfig,
}

/// Result of confirming an edit.
#[derive(Clone, Debug)]
pub struct EditOutcome {
    pub edited: RgbaImage,
    /// `edited` encoded as PNG.
    pub png: Vec<u8>,
    /// Scan box in native coordinates of the original, when it covers the image.
    pub selection_native: Option<NativeRect>,
    pub session: EditSession,
}

/// One editor instance for one (frame, bitmap) pairing.
///
/// Works on its own transform and selection; the caller sees changes only
/// through [`Editor::confirm`]. Dropping the editor (or [`Editor::cancel`])
/// discards everything.
pub struct Editor {
    original: Arc<RgbaImage>,
    frame: FrameKind,
    layout: EditorLayout,
    transform: TransformState,
    selection: Option<SelectionRegion>,
    controller: InteractionController,
    config: EditorConfig,
    decoder: Box<dyn SymbolDecoder>,
}

impl Editor {
    pub fn open(request: EditorRequest) -> Result<Self> {
        let EditorRequest {
            original,
            frame,
            prior_session,
            config,
        } = request;

        ensure_non_empty(&original)?;
        config.validate()?;

        let layout = EditorLayout::centered(frame, config.viewport_margin);
        let fit_scale = layout.fit_scale(original.width(), original.height());

        let (transform, selection) = match prior_session {
            Some(session) => {
                let transform = session.transform(fit_scale, layout.viewport);
                let selection = restored_selection(frame, &layout, &config, session.selection);
                info!(frame = %frame, zoom = transform.zoom_percent(), "Editor restored from session");
                (transform, selection)
            }
            None => {
                info!(frame = %frame, fit_scale, "Editor opened with defaults");
                (
                    TransformState::new(fit_scale),
                    initial_selection(frame, &layout, &config),
                )
            }
        };

        Ok(Self {
            original,
            frame,
            layout,
            transform,
            selection,
            controller: InteractionController::new(),
            config,
            decoder: Box::new(RqrrDecoder),
        })
    }

    /// Replace the QR decoder used by [`Editor::scan`].
    pub fn with_decoder(mut self, decoder: Box<dyn SymbolDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn frame(&self) -> FrameKind {
        self.frame
    }

    pub fn layout(&self) -> &EditorLayout {
        &self.layout
    }

    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    pub fn selection(&self) -> Option<&SelectionRegion> {
        self.selection.as_ref()
    }

    pub fn original(&self) -> &RgbaImage {
        &self.original
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Feed one input event. Returns `true` if the view changed.
    pub fn handle(&mut self, event: EditorEvent) -> bool {
        let target = EditTarget {
            transform: &mut self.transform,
            selection: self.selection.as_mut(),
            layout: &self.layout,
            image_width: self.original.width(),
            image_height: self.original.height(),
        };
        self.controller.dispatch(event, target)
    }

    pub fn pointer_down(&mut self, p: Point) -> bool {
        self.handle(EditorEvent::PointerDown(p))
    }

    pub fn pointer_move(&mut self, p: Point) -> bool {
        self.handle(EditorEvent::PointerMove(p))
    }

    pub fn pointer_up(&mut self) -> bool {
        self.handle(EditorEvent::PointerUp)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.handle(EditorEvent::ZoomIn)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.handle(EditorEvent::ZoomOut)
    }

    pub fn set_zoom(&mut self, percent: i32) -> bool {
        self.handle(EditorEvent::SetZoom(percent))
    }

    pub fn rotate_left(&mut self) -> bool {
        self.handle(EditorEvent::RotateLeft)
    }

    pub fn rotate_right(&mut self) -> bool {
        self.handle(EditorEvent::RotateRight)
    }

    pub fn set_rotation(&mut self, degrees: i32) -> bool {
        self.handle(EditorEvent::SetRotation(degrees))
    }

    pub fn reset(&mut self) -> bool {
        self.handle(EditorEvent::Reset)
    }

    /// Set the pan offset directly (clamped), as when replaying a stored edit.
    pub fn set_pan(&mut self, pan: Point) {
        self.transform.set_pan(pan, self.layout.viewport);
    }

    /// Place the scan box's top-left corner (clamped). No-op without a box.
    pub fn move_selection(&mut self, top_left: Point) {
        if let Some(sel) = self.selection.as_mut() {
            sel.move_to(top_left, self.layout.viewport);
        }
    }

    /// Current state as a persistable session.
    pub fn session(&self) -> EditSession {
        EditSession::capture(&self.transform, self.selection.as_ref())
    }

    /// Scan box mapped onto the original bitmap.
    pub fn selection_native(&self) -> Option<NativeRect> {
        let sel = self.selection.as_ref()?;
        selection_to_native(
            sel,
            &self.transform,
            &self.layout,
            self.original.width(),
            self.original.height(),
        )
        .ok()
    }

    /// Rasterize the frame and package the session for the caller.
    pub fn confirm(&self) -> Result<EditOutcome> {
        let edited = rasterize(&self.original, &self.transform, &self.layout, &self.config.raster);
        let png = encode_png(&edited)?;
        info!(
            frame = %self.frame,
            width = edited.width(),
            height = edited.height(),
            png_bytes = png.len(),
            "Edit confirmed"
        );
        Ok(EditOutcome {
            edited,
            png,
            selection_native: self.selection_native(),
            session: self.session(),
        })
    }

    /// Run the autofill scan on the original bitmap under the current scan
    /// box, falling back to `edited` when given.
    pub fn scan(&self, edited: Option<&RgbaImage>) -> ScanOutcome {
        let request = ScanRequest {
            original: &self.original,
            selection: self.selection.as_ref(),
            transform: &self.transform,
            layout: &self.layout,
            fallback: edited,
        };
        scan_identity(&request, &self.config.scan, self.decoder.as_ref())
    }

    /// Close without confirming.
    pub fn cancel(self) {
        info!(frame = %self.frame, "Edit cancelled");
    }
}

/// Only the stored position is trusted; the size always comes from the
/// config, and frames without a scan box never get one back.
fn restored_selection(
    frame: FrameKind,
    layout: &EditorLayout,
    config: &EditorConfig,
    stored: Option<SelectionRegion>,
) -> Option<SelectionRegion> {
    let mut sel = initial_selection(frame, layout, config)?;
    if let Some(prev) = stored.filter(|p| p.x.is_finite() && p.y.is_finite()) {
        sel.move_to(Point::new(prev.x, prev.y), layout.viewport);
    }
    Some(sel)
}

fn initial_selection(
    frame: FrameKind,
    layout: &EditorLayout,
    config: &EditorConfig,
) -> Option<SelectionRegion> {
    frame
        .has_scan_box()
        .then(|| SelectionRegion::initial(&layout.frame, config.selection_box, layout.viewport))
}
