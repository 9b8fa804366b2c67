//! Owned contiguous pixel storage.

use crate::image::{PixelBuffer, PixelFormat};
use crate::util::{BlockMatchError, BlockMatchResult};

/// Owned, tightly packed pixel buffer.
///
/// Rows are stored back to back (`stride == width * bytes_per_pixel`).
#[derive(Clone, Debug)]
pub struct OwnedBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
    format: PixelFormat,
}

impl OwnedBuffer {
    /// Wraps a tightly packed byte vector.
    pub fn new(
        data: Vec<u8>,
        width: usize,
        height: usize,
        format: PixelFormat,
    ) -> BlockMatchResult<Self> {
        // Reuse the descriptor checks for dimensions and minimum length.
        PixelBuffer::from_slice(&data, width, height, format)?;
        let needed = width * height * format.bytes_per_pixel();
        if data.len() > needed {
            return Err(BlockMatchError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
            format,
        })
    }

    /// Creates a buffer with every byte set to `value`.
    pub fn filled(
        width: usize,
        height: usize,
        format: PixelFormat,
        value: u8,
    ) -> BlockMatchResult<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|v| v.checked_mul(format.bytes_per_pixel()))
            .ok_or(BlockMatchError::InvalidDimensions { width, height })?;
        Self::new(vec![value; len], width, height, format)
    }

    /// Copies a (possibly padded) view into packed storage.
    pub fn from_view(view: PixelBuffer<'_>) -> BlockMatchResult<Self> {
        let width = view.width();
        let height = view.height();
        let row_bytes = width * view.bytes_per_pixel();
        let mut data = Vec::with_capacity(row_bytes * height);
        for y in 0..height {
            let row = view.row(y).ok_or(BlockMatchError::BufferTooSmall {
                needed: (y + 1) * view.stride(),
                got: view.as_slice().len(),
            })?;
            data.extend_from_slice(row);
        }
        Self::new(data, width, height, view.format())
    }

    /// Returns the width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Returns the packed pixel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Writes the channel bytes of pixel `(x, y)`; out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: usize, y: usize, channels: &[u8]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let bpp = self.format.bytes_per_pixel();
        let start = (y * self.width + x) * bpp;
        let n = channels.len().min(bpp);
        self.data[start..start + n].copy_from_slice(&channels[..n]);
    }

    /// Fills the `w x h` rectangle with top-left `(x0, y0)`, clipped to the buffer.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, channels: &[u8]) {
        for y in y0..y0.saturating_add(h).min(self.height) {
            for x in x0..x0.saturating_add(w).min(self.width) {
                self.set_pixel(x, y, channels);
            }
        }
    }

    /// Returns a borrowed view of the buffer.
    pub fn view(&self) -> PixelBuffer<'_> {
        PixelBuffer {
            data: &self.data,
            width: self.width,
            height: self.height,
            stride: self.width * self.format.bytes_per_pixel(),
            format: self.format,
        }
    }
}
