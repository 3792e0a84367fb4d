use image::{Rgba, RgbaImage};
use qrcode::{Color, QrCode};

/// Quiet zone around a rendered QR code, in modules.
pub const QUIET_ZONE_MODULES: u32 = 4;

/// Image where every pixel encodes its own position.
pub fn coordinate_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, ((x / 256) * 16 + y / 256) as u8, 255])
    })
}

/// Like `coordinate_image` at half resolution, with every pixel doubled into
/// a 2x2 block.
pub fn blocky_image(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let (bx, by) = (x / 2, y / 2);
        Rgba([(bx * 7 % 256) as u8, (by * 13 % 256) as u8, ((bx + by) % 256) as u8, 255])
    })
}

/// Render `data` as a QR code: dark modules on a white quiet zone, as large
/// as fits inside `max_side` pixels.
pub fn qr_image(data: &str, max_side: u32) -> RgbaImage {
    let code = QrCode::new(data.as_bytes()).expect("payload fits in a QR code");
    let modules = code.width() as u32;
    let total = modules + 2 * QUIET_ZONE_MODULES;
    let px = (max_side / total).max(1);
    let colors = code.to_colors();

    RgbaImage::from_fn(total * px, total * px, |x, y| {
        let mx = (x / px) as i64 - QUIET_ZONE_MODULES as i64;
        let my = (y / px) as i64 - QUIET_ZONE_MODULES as i64;
        let dark = mx >= 0
            && my >= 0
            && (mx as u32) < modules
            && (my as u32) < modules
            && colors[my as usize * modules as usize + mx as usize] == Color::Dark;
        if dark {
            Rgba([0, 0, 0, 255])
        } else {
            Rgba([255, 255, 255, 255])
        }
    })
}

/// Invert RGB, keep alpha.
pub fn inverted(img: &RgbaImage) -> RgbaImage {
    RgbaImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0;
        Rgba([255 - r, 255 - g, 255 - b, a])
    })
}

/// Card-like background with `stamp` pasted so its center lands on `(cx, cy)`.
pub fn card_with_stamp(width: u32, height: u32, stamp: &RgbaImage, cx: u32, cy: u32) -> RgbaImage {
    let mut card = RgbaImage::from_pixel(width, height, Rgba([214, 222, 230, 255]));
    let x0 = cx - stamp.width() / 2;
    let y0 = cy - stamp.height() / 2;
    image::imageops::replace(&mut card, stamp, x0 as i64, y0 as i64);
    card
}

/// A well-formed ID payload (ASCII only).
pub const SAMPLE_PAYLOAD: &str = "001090012345|123456789|Nguyen Van A|01011990|Nam|12 Le Loi, Hue";
