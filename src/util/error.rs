//! Error types for blockmatch.

use crate::image::PixelFormat;
use thiserror::Error;

/// Result alias for blockmatch operations.
pub type BlockMatchResult<T> = std::result::Result<T, BlockMatchError>;

/// Errors that can occur when describing buffers or running the matcher.
///
/// Per-point boundary failures are not errors; they surface as
/// [`Point::SENTINEL`](crate::Point::SENTINEL) results instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockMatchError {
    /// Source and search buffers differ in width or height.
    #[error(
        "dimension mismatch: source is {source_width}x{source_height}, \
         search is {search_width}x{search_height}"
    )]
    DimensionMismatch {
        source_width: usize,
        source_height: usize,
        search_width: usize,
        search_height: usize,
    },
    /// A buffer uses a pixel format the matcher cannot compare.
    #[error("unsupported pixel format: {format:?}")]
    UnsupportedFormat { format: PixelFormat },
    /// Both formats are supported but they differ.
    #[error("pixel format mismatch: source is {source_format:?}, search is {search_format:?}")]
    FormatMismatch {
        source_format: PixelFormat,
        search_format: PixelFormat,
    },
    /// Width or height is zero or overflows address arithmetic.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is shorter than one row of pixels.
    #[error("invalid stride: {stride} bytes < {width} px * {bytes_per_pixel} bytes")]
    InvalidStride {
        width: usize,
        bytes_per_pixel: usize,
        stride: usize,
    },
    /// Backing byte slice cannot hold the described buffer.
    #[error("buffer too small: need {needed} bytes, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Matcher configuration is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
    /// Image decoding failed (`image-io` feature).
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
