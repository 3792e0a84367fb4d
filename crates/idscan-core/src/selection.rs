use serde::{Deserialize, Serialize};

use crate::consts::SELECTION_BOX_INSET;
use crate::geometry::{Point, Rect, Size};

/// The QR scan box, in display pixels relative to the viewport's top-left.
///
/// Fixed size; only the position moves, and it always stays inside the
/// viewport.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectionRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionRegion {
    /// Square box of edge `size` at the top-right corner of `frame`, clamped
    /// into the viewport.
    pub fn initial(frame: &Rect, size: f64, viewport: Size) -> Self {
        let x = frame.right() - size - SELECTION_BOX_INSET;
        let y = frame.y + SELECTION_BOX_INSET;
        Self {
            x,
            y,
            width: size,
            height: size,
        }
        .clamped_to(viewport)
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn contains(&self, p: Point) -> bool {
        self.rect().contains(p)
    }

    /// Move the top-left corner, keeping the box inside the viewport.
    pub fn move_to(&mut self, top_left: Point, viewport: Size) {
        self.x = top_left.x;
        self.y = top_left.y;
        *self = self.clamped_to(viewport);
    }

    /// Clamp position into `[0, vw - w] x [0, vh - h]`.
    ///
    /// A box larger than the viewport is pinned to the top-left.
    pub fn clamped_to(&self, viewport: Size) -> Self {
        let max_x = (viewport.width - self.width).max(0.0);
        let max_y = (viewport.height - self.height).max(0.0);
        Self {
            x: self.x.clamp(0.0, max_x),
            y: self.y.clamp(0.0, max_y),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_box_top_right() {
        let frame = Rect::new(0.0, 0.0, 428.0, 270.0);
        let sel = SelectionRegion::initial(&frame, 60.0, Size::new(428.0, 270.0));
        assert_eq!(sel.x, 428.0 - 60.0 - SELECTION_BOX_INSET);
        assert_eq!(sel.y, SELECTION_BOX_INSET);
        assert_eq!((sel.width, sel.height), (60.0, 60.0));
    }

    #[test]
    fn test_move_clamps_to_viewport() {
        let viewport = Size::new(100.0, 80.0);
        let mut sel = SelectionRegion::initial(&Rect::new(0.0, 0.0, 100.0, 80.0), 20.0, viewport);
        sel.move_to(Point::new(1e6, -1e6), viewport);
        assert_eq!((sel.x, sel.y), (80.0, 0.0));
    }
}
