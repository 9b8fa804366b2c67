//! Pixel buffer descriptors.
//!
//! `PixelBuffer` is a borrowed, read-only view over raw interleaved pixel
//! bytes. The stride counts *bytes* between the starts of consecutive rows,
//! so a stride larger than `width * bytes_per_pixel` represents padded rows.
//! All addressing goes through [`PixelBuffer::byte_offset`] and
//! [`PixelBuffer::span`], which never read outside the backing slice.

use crate::util::{BlockMatchError, BlockMatchResult};

#[cfg(feature = "image-io")]
pub mod io;
mod owned;

pub use owned::OwnedBuffer;

/// Largest width or height accepted by a buffer descriptor.
///
/// Keeps every reachable coordinate far below the `i32::MAX` sentinel.
pub const MAX_DIMENSION: usize = 1 << 24;

/// Interleaved pixel layouts a buffer may carry.
///
/// Only [`PixelFormat::Gray8`] and [`PixelFormat::Rgb24`] can be matched;
/// the others can be described so callers get a typed rejection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One 8-bit luminance byte per pixel.
    Gray8,
    /// Three 8-bit channels per pixel.
    Rgb24,
    /// One 16-bit luminance sample per pixel.
    Gray16,
    /// Four 8-bit channels per pixel.
    Rgba32,
}

impl PixelFormat {
    /// Returns the pixel element width in bytes.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Gray16 => 2,
            PixelFormat::Rgba32 => 4,
        }
    }

    /// Returns true if the block matcher can compare buffers of this format.
    pub fn is_supported(self) -> bool {
        matches!(self, PixelFormat::Gray8 | PixelFormat::Rgb24)
    }
}

/// Borrowed pixel buffer with an explicit byte stride.
#[derive(Copy, Clone, Debug)]
pub struct PixelBuffer<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
}

impl<'a> PixelBuffer<'a> {
    /// Creates a tightly packed buffer with `stride == width * bytes_per_pixel`.
    pub fn from_slice(
        data: &'a [u8],
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> BlockMatchResult<Self> {
        let stride = width
            .checked_mul(format.bytes_per_pixel())
            .ok_or(BlockMatchError::InvalidDimensions { width, height })?;
        Self::new(data, width, height, stride, format)
    }

    /// Creates a buffer with an explicit row stride in bytes.
    pub fn new(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> BlockMatchResult<Self> {
        let needed = required_len(width, height, stride, format)?;
        if data.len() < needed {
            return Err(BlockMatchError::BufferTooSmall {
                needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
            format,
        })
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in bytes between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the pixel element width in bytes.
    pub fn bytes_per_pixel(&self) -> usize {
        self.format.bytes_per_pixel()
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Byte offset of pixel `(x, y)` using raw row-major addressing.
    ///
    /// `x` is not checked against the width, so an `x` past the right edge
    /// addresses padding or the following row, like pointer arithmetic
    /// over the same memory would. Returns `None` only on overflow.
    pub fn byte_offset(&self, x: usize, y: usize) -> Option<usize> {
        y.checked_mul(self.stride)?
            .checked_add(x.checked_mul(self.bytes_per_pixel())?)
    }

    /// Returns `len` bytes starting at `offset`, if they lie in the backing slice.
    pub fn span(&self, offset: usize, len: usize) -> Option<&'a [u8]> {
        let end = offset.checked_add(len)?;
        self.data.get(offset..end)
    }

    /// Returns the channel bytes of pixel `(x, y)` if it is within bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<&'a [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.span(self.byte_offset(x, y)?, self.bytes_per_pixel())
    }

    /// Returns the `width * bytes_per_pixel` pixel bytes of row `y`.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        self.span(self.byte_offset(0, y)?, self.row_bytes())
    }

    fn row_bytes(&self) -> usize {
        self.width * self.bytes_per_pixel()
    }
}

fn required_len(
    width: usize,
    height: usize,
    stride: usize,
    format: PixelFormat,
) -> BlockMatchResult<usize> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(BlockMatchError::InvalidDimensions { width, height });
    }
    let bytes_per_pixel = format.bytes_per_pixel();
    let row_bytes = width * bytes_per_pixel;
    if stride < row_bytes {
        return Err(BlockMatchError::InvalidStride {
            width,
            bytes_per_pixel,
            stride,
        });
    }
    let needed = (height - 1)
        .checked_mul(stride)
        .and_then(|v| v.checked_add(row_bytes))
        .ok_or(BlockMatchError::InvalidDimensions { width, height })?;
    Ok(needed)
}

#[cfg(test)]
mod tests {
    use super::{PixelBuffer, PixelFormat};

    #[test]
    fn rgb_rows_respect_stride() {
        // 2x2 RGB24 with two padding bytes per row.
        let data: Vec<u8> = (0u8..16).collect();
        let buf = PixelBuffer::new(&data, 2, 2, 8, PixelFormat::Rgb24).unwrap();
        assert_eq!(buf.row(0).unwrap(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(buf.row(1).unwrap(), &[8, 9, 10, 11, 12, 13]);
        assert_eq!(buf.pixel(1, 1).unwrap(), &[11, 12, 13]);
        assert!(buf.pixel(2, 0).is_none());
        assert!(buf.row(2).is_none());
    }

    #[test]
    fn byte_offset_runs_past_the_right_edge() {
        let data = [0u8; 12];
        let buf = PixelBuffer::from_slice(&data, 4, 3, PixelFormat::Gray8).unwrap();
        assert_eq!(buf.byte_offset(5, 1), Some(9));
        assert!(buf.span(9, 3).is_some());
        assert!(buf.span(10, 3).is_none());
    }

    #[test]
    fn only_gray8_and_rgb24_are_supported() {
        assert!(PixelFormat::Gray8.is_supported());
        assert!(PixelFormat::Rgb24.is_supported());
        assert!(!PixelFormat::Gray16.is_supported());
        assert!(!PixelFormat::Rgba32.is_supported());
        assert_eq!(PixelFormat::Rgba32.bytes_per_pixel(), 4);
    }
}
