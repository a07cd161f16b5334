// error.rs - 错误类型

use thiserror::Error;

use crate::buffer::PixelFormat;

/// Errors reported by face rendering and the helpers around it.
///
/// Every variant except `Cancelled` is raised before the first destination
/// pixel is written, so the destination is left untouched.
#[derive(Error, Debug)]
pub enum CubeMapError {
    #[error("{context}: got {width}x{height}")]
    DimensionMismatch {
        context: &'static str,
        width: u32,
        height: u32,
    },
    #[error("Pixel format of panorama ({panorama:?}) and face ({face:?}) differ")]
    FormatMismatch {
        panorama: PixelFormat,
        face: PixelFormat,
    },
    #[error("Unsupported pixel format {0:?}, expected Rgba8888")]
    UnsupportedFormat(PixelFormat),
    #[error("Could not acquire pixels of {target}: {reason}")]
    AcquisitionFailure {
        target: &'static str,
        reason: String,
    },
    #[error("Invalid pixel buffer: {0}")]
    InvalidBuffer(String),
    #[error("Invalid face code {0}, expected 0..=5")]
    InvalidFace(u32),
    #[error("Conversion cancelled after {completed} of 6 faces")]
    Cancelled { completed: usize },
    #[error("Config parse error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CubeMapError>;
