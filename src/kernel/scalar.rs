//! Scalar sum-of-squared-differences kernel.

use crate::image::PixelBuffer;
use crate::kernel::BlockMetric;

/// Sum of squared per-byte differences.
///
/// Every channel byte counts as an independent sample, so an RGB24 block
/// contributes three differences per pixel with equal weight. The `u64`
/// accumulator holds `block_size^2 * 3 * 255^2` for any accepted block size.
pub struct Ssd;

impl BlockMetric for Ssd {
    fn block_error_capped(
        source: PixelBuffer<'_>,
        source_origin: usize,
        search: PixelBuffer<'_>,
        candidate_origin: usize,
        block_size: usize,
        cap: u64,
    ) -> Option<u64> {
        let row_bytes = block_size.checked_mul(source.bytes_per_pixel())?;
        let mut src_offset = source_origin;
        let mut cand_offset = candidate_origin;
        let mut sse = 0u64;
        for _ in 0..block_size {
            let src_row = source.span(src_offset, row_bytes)?;
            let cand_row = search.span(cand_offset, row_bytes)?;
            sse += row_ssd(src_row, cand_row);
            if sse >= cap {
                return Some(sse);
            }
            src_offset = src_offset.checked_add(source.stride())?;
            cand_offset = cand_offset.checked_add(search.stride())?;
        }
        Some(sse)
    }
}

#[inline]
fn row_ssd(a: &[u8], b: &[u8]) -> u64 {
    a.iter()
        .zip(b)
        .map(|(&a, &b)| {
            let diff = a as i32 - b as i32;
            (diff * diff) as u64
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::Ssd;
    use crate::image::{PixelBuffer, PixelFormat};
    use crate::kernel::BlockMetric;

    #[test]
    fn identical_blocks_have_zero_error() {
        let data: Vec<u8> = (0u8..25).collect();
        let buf = PixelBuffer::from_slice(&data, 5, 5, PixelFormat::Gray8).unwrap();
        let origin = buf.byte_offset(1, 1).unwrap();
        assert_eq!(Ssd::block_error(buf, origin, buf, origin, 3), Some(0));
    }

    #[test]
    fn rgb_channels_are_summed_independently() {
        let a = [10u8, 20, 30];
        let b = [11u8, 18, 33];
        let src = PixelBuffer::from_slice(&a, 1, 1, PixelFormat::Rgb24).unwrap();
        let dst = PixelBuffer::from_slice(&b, 1, 1, PixelFormat::Rgb24).unwrap();
        assert_eq!(Ssd::block_error(src, 0, dst, 0, 1), Some(1 + 4 + 9));
    }

    #[test]
    fn stride_padding_is_skipped() {
        // 2x2 gray blocks; the search buffer carries 3 bytes of padding per row.
        let src_data = [1u8, 2, 3, 4];
        let search_data = [1u8, 2, 200, 200, 200, 3, 5, 200, 200, 200];
        let src = PixelBuffer::from_slice(&src_data, 2, 2, PixelFormat::Gray8).unwrap();
        let search = PixelBuffer::new(&search_data, 2, 2, 5, PixelFormat::Gray8).unwrap();
        assert_eq!(Ssd::block_error(src, 0, search, 0, 2), Some(1));
    }

    #[test]
    fn worst_case_fits_accumulator() {
        let block = 64usize;
        let black = vec![0u8; block * block * 3];
        let white = vec![255u8; block * block * 3];
        let a = PixelBuffer::from_slice(&black, block, block, PixelFormat::Rgb24).unwrap();
        let b = PixelBuffer::from_slice(&white, block, block, PixelFormat::Rgb24).unwrap();
        let expected = (block * block * 3) as u64 * 255 * 255;
        assert_eq!(Ssd::block_error(a, 0, b, 0, block), Some(expected));
    }

    #[test]
    fn capped_error_stops_early_and_out_of_range_rows_fail() {
        let black = [0u8; 16];
        let white = [255u8; 16];
        let a = PixelBuffer::from_slice(&black, 4, 4, PixelFormat::Gray8).unwrap();
        let b = PixelBuffer::from_slice(&white, 4, 4, PixelFormat::Gray8).unwrap();
        let capped = Ssd::block_error_capped(a, 0, b, 0, 4, 1).unwrap();
        assert_eq!(capped, 4 * 255 * 255);
        assert_eq!(Ssd::block_error(a, 0, b, 8, 4), None);
    }
}
