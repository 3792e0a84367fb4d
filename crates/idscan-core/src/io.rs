use std::io::Cursor;
use std::path::Path;

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::{IdScanError, Result};

/// Load an image file as 8-bit RGBA.
///
/// Zero-sized images are rejected: nothing downstream can map or crop them.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)?.to_rgba8();
    ensure_non_empty(&img)?;
    Ok(img)
}

/// Decode an in-memory image (PNG, JPEG, ...) as 8-bit RGBA.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    let img = image::load_from_memory(bytes)?.to_rgba8();
    ensure_non_empty(&img)?;
    Ok(img)
}

pub(crate) fn ensure_non_empty(img: &RgbaImage) -> Result<()> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(IdScanError::InvalidDimensions {
            width: w,
            height: h,
        });
    }
    Ok(())
}

/// Encode as lossless PNG at the highest compression setting.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        Cursor::new(&mut buf),
        CompressionType::Best,
        FilterType::Adaptive,
    );
    encoder.write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)?;
    Ok(buf)
}

/// Write an RGBA image as PNG.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let bytes = encode_png(img)?;
    std::fs::write(path, bytes)?;
    Ok(())
}
