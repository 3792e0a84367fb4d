/// Lowest zoom the editor accepts, in percent of the fit scale.
pub const ZOOM_MIN_PERCENT: i32 = 50;

/// Highest zoom the editor accepts, in percent of the fit scale.
pub const ZOOM_MAX_PERCENT: i32 = 300;

/// Zoom at which the image exactly fits inside the frame.
pub const ZOOM_DEFAULT_PERCENT: i32 = 100;

/// Zoom change applied by the zoom-in / zoom-out buttons.
pub const ZOOM_STEP_PERCENT: i32 = 10;

/// Rotation change applied by the rotate-left / rotate-right buttons.
pub const ROTATION_STEP_DEGREES: i32 = 90;

/// Upper bound of the rotation slider (lower bound is 0).
pub const ROTATION_SLIDER_MAX: i32 = 360;

/// Edge length of the square QR scan box, in display pixels.
pub const SELECTION_BOX_SIZE: f64 = 60.0;

/// Inset of the initial scan box from the frame corner, in display pixels.
pub const SELECTION_BOX_INSET: f64 = 8.0;

/// Scale factors tried by the QR decode sweep, in order.
pub const DEFAULT_SCAN_SCALES: [f32; 4] = [1.0, 2.0, 4.0, 0.5];

/// Largest plane (w*h) the QR sweep will build; bigger scales are skipped.
pub const MAX_DECODE_PIXELS: usize = 16_000_000;

/// Field delimiter of the ID-card QR payload.
pub const PAYLOAD_DELIMITER: char = '|';

/// Minimum number of delimited fields for a payload to be usable.
pub const PAYLOAD_MIN_FIELDS: usize = 6;

/// Tolerance (display pixels) for display/native round trips.
pub const MAPPING_TOLERANCE: f64 = 1e-3;

/// Minimum pixel count (w*h) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f32 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f32 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f32 = 0.114;
