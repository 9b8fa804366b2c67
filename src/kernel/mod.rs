//! Block difference metrics.

use crate::image::PixelBuffer;

/// Dissimilarity between two equally sized square blocks.
///
/// Block origins are byte offsets of the top-left pixel in each buffer; row
/// `r` of a block starts `r * stride` bytes after its origin. Both buffers
/// must share a pixel format.
pub trait BlockMetric {
    /// Computes the full error between the two blocks.
    ///
    /// Returns `None` if any block row falls outside a backing slice.
    fn block_error(
        source: PixelBuffer<'_>,
        source_origin: usize,
        search: PixelBuffer<'_>,
        candidate_origin: usize,
        block_size: usize,
    ) -> Option<u64> {
        Self::block_error_capped(
            source,
            source_origin,
            search,
            candidate_origin,
            block_size,
            u64::MAX,
        )
    }

    /// Like [`BlockMetric::block_error`], but may stop as soon as the running
    /// total reaches `cap`. A returned value `>= cap` is then only a lower
    /// bound; values below `cap` are exact.
    fn block_error_capped(
        source: PixelBuffer<'_>,
        source_origin: usize,
        search: PixelBuffer<'_>,
        candidate_origin: usize,
        block_size: usize,
        cap: u64,
    ) -> Option<u64>;
}

pub mod scalar;

pub use scalar::Ssd;
