use thiserror::Error;

pub type Canvas2dResult<T> = Result<T, Canvas2dError>;

#[derive(Debug, Error)]
pub enum Canvas2dError {
    #[error("Surface size {width}x{height} is out of range")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid CSS font: {0}")]
    FontParseError(String),

    #[error("Invalid CSS color: {0}")]
    ColorParseError(String),

    #[error("Gradient stop offset {0} is outside 0..=1")]
    InvalidGradientStop(f64),

    #[error("Failed to encode PNG: {0}")]
    PngError(String),

    #[error("Failed to encode JPEG: {0}")]
    JpegError(String),
}

impl From<png::EncodingError> for Canvas2dError {
    fn from(err: png::EncodingError) -> Self {
        Self::PngError(err.to_string())
    }
}

impl From<image::ImageError> for Canvas2dError {
    fn from(err: image::ImageError) -> Self {
        Self::JpegError(err.to_string())
    }
}
