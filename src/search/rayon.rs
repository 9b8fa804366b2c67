//! Rayon fan-out over reference points (feature-gated).
//!
//! Each point is an independent task over read-only buffers, and
//! `collect` on an indexed parallel iterator keeps output slots aligned
//! with the input order.

use crate::config::MatchConfig;
use crate::image::PixelBuffer;
use crate::kernel::BlockMetric;
use crate::point::Point;
use crate::search::{search_point, MatchOutcome};
use rayon::prelude::*;

/// Point-parallel equivalent of the sequential driver.
pub(crate) fn search_points_par<M: BlockMetric>(
    cfg: &MatchConfig,
    source: PixelBuffer<'_>,
    points: &[Point],
    search: PixelBuffer<'_>,
) -> Vec<MatchOutcome> {
    points
        .par_iter()
        .map(|&point| search_point::<M>(cfg, source, search, point))
        .collect()
}
