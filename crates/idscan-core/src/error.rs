use thiserror::Error;

#[derive(Error, Debug)]
pub enum IdScanError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unknown frame type: {0}")]
    UnknownFrame(String),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IdScanError>;

/// A selection that maps to no pixels of the source bitmap.
///
/// Recovered locally: the scan pipeline reports it the same way as a QR code
/// that could not be found.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryError {
    #[error("Selection maps to an empty region of the image")]
    EmptyRegion,
}
