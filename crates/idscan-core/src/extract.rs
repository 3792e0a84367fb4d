use image::imageops;
use image::RgbaImage;
use tracing::{debug, warn};

use crate::error::GeometryError;
use crate::frame::EditorLayout;
use crate::geometry::Rect;
use crate::selection::SelectionRegion;
use crate::transform::{CoordinateMapper, TransformState};

/// Integer crop rectangle in native pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl NativeRect {
    /// Smallest pixel-aligned rectangle covering `r`, limited to the image.
    fn covering(r: &Rect, image_w: u32, image_h: u32) -> Option<Self> {
        let x0 = r.x.floor().max(0.0) as u32;
        let y0 = r.y.floor().max(0.0) as u32;
        let x1 = (r.right().ceil().max(0.0) as u32).min(image_w);
        let y1 = (r.bottom().ceil().max(0.0) as u32).min(image_h);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        })
    }
}

/// A 1:1 crop of the original bitmap.
#[derive(Clone, Debug)]
pub struct ExtractedRegion {
    pub image: RgbaImage,
    pub native: NativeRect,
}

/// Map the scan box into native space and return the region it covers.
pub fn selection_to_native(
    selection: &SelectionRegion,
    transform: &TransformState,
    layout: &EditorLayout,
    image_width: u32,
    image_height: u32,
) -> Result<NativeRect, GeometryError> {
    let mapper = CoordinateMapper::new(transform, layout, image_width, image_height);
    let mapped = mapper.rect_to_native(&selection.rect());
    if mapped.is_empty() {
        return Err(GeometryError::EmptyRegion);
    }
    NativeRect::covering(&mapped, image_width, image_height).ok_or(GeometryError::EmptyRegion)
}

/// Crop the original, unedited bitmap to the region under the scan box.
///
/// Always reads `original`, never an edited derivative, so repeated edit
/// sessions do not compound resampling loss. No scaling or smoothing.
pub fn extract_region(
    original: &RgbaImage,
    selection: &SelectionRegion,
    transform: &TransformState,
    layout: &EditorLayout,
) -> Result<ExtractedRegion, GeometryError> {
    let (w, h) = original.dimensions();
    let native = match selection_to_native(selection, transform, layout, w, h) {
        Ok(r) => r,
        Err(e) => {
            warn!(x = selection.x, y = selection.y, "Scan box does not cover the image");
            return Err(e);
        }
    };

    let image = imageops::crop_imm(original, native.x, native.y, native.width, native.height).to_image();
    debug!(
        x = native.x,
        y = native.y,
        width = native.width,
        height = native.height,
        "Extracted scan region"
    );
    Ok(ExtractedRegion { image, native })
}
