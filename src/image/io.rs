//! Convenience helpers for loading pixel buffers via the `image` crate.
//!
//! Available when the `image-io` feature is enabled.

use crate::image::{OwnedBuffer, PixelBuffer, PixelFormat};
use crate::util::{BlockMatchError, BlockMatchResult};
use std::path::Path;

/// Creates a borrowed Gray8 view from a grayscale image buffer.
pub fn view_from_gray_image(img: &image::GrayImage) -> BlockMatchResult<PixelBuffer<'_>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelBuffer::from_slice(img.as_raw(), width, height, PixelFormat::Gray8)
}

/// Creates a borrowed RGB24 view from an RGB image buffer.
pub fn view_from_rgb_image(img: &image::RgbImage) -> BlockMatchResult<PixelBuffer<'_>> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelBuffer::from_slice(img.as_raw(), width, height, PixelFormat::Rgb24)
}

/// Converts a dynamic image into an owned buffer of the requested format.
pub fn owned_from_dynamic_image(
    img: &image::DynamicImage,
    format: PixelFormat,
) -> BlockMatchResult<OwnedBuffer> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    match format {
        PixelFormat::Gray8 => OwnedBuffer::new(img.to_luma8().into_raw(), width, height, format),
        PixelFormat::Rgb24 => OwnedBuffer::new(img.to_rgb8().into_raw(), width, height, format),
        other => Err(BlockMatchError::UnsupportedFormat { format: other }),
    }
}

fn open(path: &Path) -> BlockMatchResult<image::DynamicImage> {
    image::open(path).map_err(|err| BlockMatchError::ImageIo {
        reason: err.to_string(),
    })
}

/// Loads an image from disk and converts it to Gray8.
pub fn load_gray8<P: AsRef<Path>>(path: P) -> BlockMatchResult<OwnedBuffer> {
    owned_from_dynamic_image(&open(path.as_ref())?, PixelFormat::Gray8)
}

/// Loads an image from disk and converts it to RGB24.
pub fn load_rgb24<P: AsRef<Path>>(path: P) -> BlockMatchResult<OwnedBuffer> {
    owned_from_dynamic_image(&open(path.as_ref())?, PixelFormat::Rgb24)
}
