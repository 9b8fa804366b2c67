//! Exhaustive block matching over a bounded search window.
//!
//! For every reference point the matcher cuts a `block_size` square out of
//! the source buffer, scores it against each admissible candidate origin in
//! the search window of the search buffer, and keeps the lowest error.
//! Candidates are visited row-major and only a strictly smaller error
//! replaces the current best, so ties resolve to the first candidate
//! scanned.

#[cfg(feature = "rayon")]
pub(crate) mod rayon;
pub mod window;

use crate::config::{MatchConfig, OutputMode};
use crate::image::PixelBuffer;
use crate::kernel::{BlockMetric, Ssd};
use crate::point::Point;
use crate::trace::{trace_event, trace_span};
use crate::util::{BlockMatchError, BlockMatchResult};
use window::{source_block_origin, SearchWindow};

/// Result of searching one reference point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The source block around the point leaves the source buffer.
    Skipped,
    /// Every candidate in the window was clipped away.
    Unsearched,
    /// Best candidate block center and its error.
    Found { center: Point, error: u64 },
}

impl MatchOutcome {
    /// Encodes the outcome as an output point for `reference`.
    ///
    /// `Skipped` becomes [`Point::SENTINEL`]. `Unsearched` falls back to the
    /// search seed: the reference point itself, or a zero displacement.
    pub fn encode(self, reference: Point, mode: OutputMode) -> Point {
        match (self, mode) {
            (MatchOutcome::Skipped, _) => Point::SENTINEL,
            (MatchOutcome::Unsearched, OutputMode::Absolute) => reference,
            (MatchOutcome::Unsearched, OutputMode::Relative) => Point::ZERO,
            (MatchOutcome::Found { center, .. }, OutputMode::Absolute) => center,
            (MatchOutcome::Found { center, .. }, OutputMode::Relative) => center - reference,
        }
    }

    /// Returns the best error if a candidate was scored.
    pub fn error(self) -> Option<u64> {
        match self {
            MatchOutcome::Found { error, .. } => Some(error),
            _ => None,
        }
    }
}

/// Exhaustive-search block matcher.
///
/// Holds only its configuration; every call is independent.
#[derive(Clone, Debug, Default)]
pub struct BlockMatcher {
    cfg: MatchConfig,
}

impl BlockMatcher {
    /// Creates a matcher with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: MatchConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Sets the block side length in pixels.
    pub fn set_block_size(&mut self, block_size: usize) {
        self.cfg.block_size = block_size;
    }

    /// Sets the search radius in pixels.
    pub fn set_search_radius(&mut self, search_radius: usize) {
        self.cfg.search_radius = search_radius;
    }

    /// Checks the configuration and buffer pair before any per-point work.
    ///
    /// Order: configuration, dimensions, supported formats (source first),
    /// format equality.
    pub fn validate(
        &self,
        source: PixelBuffer<'_>,
        search: PixelBuffer<'_>,
    ) -> BlockMatchResult<()> {
        self.cfg.validate()?;
        if source.width() != search.width() || source.height() != search.height() {
            return Err(BlockMatchError::DimensionMismatch {
                source_width: source.width(),
                source_height: source.height(),
                search_width: search.width(),
                search_height: search.height(),
            });
        }
        for format in [source.format(), search.format()] {
            if !format.is_supported() {
                return Err(BlockMatchError::UnsupportedFormat { format });
            }
        }
        if source.format() != search.format() {
            return Err(BlockMatchError::FormatMismatch {
                source_format: source.format(),
                search_format: search.format(),
            });
        }
        Ok(())
    }

    /// Matches every reference point and encodes the results.
    ///
    /// The output is index-aligned with `points`; skipped points hold
    /// [`Point::SENTINEL`].
    pub fn match_points(
        &self,
        source: PixelBuffer<'_>,
        points: &[Point],
        search: PixelBuffer<'_>,
        mode: OutputMode,
    ) -> BlockMatchResult<Vec<Point>> {
        let outcomes = self.match_outcomes(source, points, search)?;
        Ok(outcomes
            .into_iter()
            .zip(points)
            .map(|(outcome, &reference)| outcome.encode(reference, mode))
            .collect())
    }

    /// Matches every reference point and returns the detailed outcomes.
    pub fn match_outcomes(
        &self,
        source: PixelBuffer<'_>,
        points: &[Point],
        search: PixelBuffer<'_>,
    ) -> BlockMatchResult<Vec<MatchOutcome>> {
        self.validate(source, search)?;

        let _span = trace_span!(
            "match_points",
            points = points.len(),
            block_size = self.cfg.block_size,
            search_radius = self.cfg.search_radius,
            parallel = self.cfg.parallel
        )
        .entered();

        let outcomes = self.dispatch(source, points, search);

        trace_event!(
            "points_matched",
            found = outcomes.iter().filter(|o| o.error().is_some()).count(),
            skipped = outcomes
                .iter()
                .filter(|o| **o == MatchOutcome::Skipped)
                .count(),
            unsearched = outcomes
                .iter()
                .filter(|o| **o == MatchOutcome::Unsearched)
                .count()
        );
        Ok(outcomes)
    }

    /// Matches a single reference point.
    pub fn match_point(
        &self,
        source: PixelBuffer<'_>,
        point: Point,
        search: PixelBuffer<'_>,
    ) -> BlockMatchResult<MatchOutcome> {
        self.validate(source, search)?;
        Ok(search_point::<Ssd>(&self.cfg, source, search, point))
    }

    #[cfg(feature = "rayon")]
    fn dispatch(
        &self,
        source: PixelBuffer<'_>,
        points: &[Point],
        search: PixelBuffer<'_>,
    ) -> Vec<MatchOutcome> {
        if self.cfg.parallel {
            self::rayon::search_points_par::<Ssd>(&self.cfg, source, points, search)
        } else {
            search_points::<Ssd>(&self.cfg, source, points, search)
        }
    }

    #[cfg(not(feature = "rayon"))]
    fn dispatch(
        &self,
        source: PixelBuffer<'_>,
        points: &[Point],
        search: PixelBuffer<'_>,
    ) -> Vec<MatchOutcome> {
        search_points::<Ssd>(&self.cfg, source, points, search)
    }
}

fn search_points<M: BlockMetric>(
    cfg: &MatchConfig,
    source: PixelBuffer<'_>,
    points: &[Point],
    search: PixelBuffer<'_>,
) -> Vec<MatchOutcome> {
    points
        .iter()
        .map(|&point| search_point::<M>(cfg, source, search, point))
        .collect()
}

/// Searches one reference point. Buffers must already be validated.
pub(crate) fn search_point<M: BlockMetric>(
    cfg: &MatchConfig,
    source: PixelBuffer<'_>,
    search: PixelBuffer<'_>,
    point: Point,
) -> MatchOutcome {
    let block_size = cfg.block_size;
    let Some((bx, by)) = source_block_origin(point, block_size, source.width(), source.height())
    else {
        return MatchOutcome::Skipped;
    };
    let Some(source_origin) = source.byte_offset(bx, by) else {
        return MatchOutcome::Skipped;
    };

    let window = SearchWindow::around(point, block_size, cfg.search_radius);
    let mut min_error = u64::MAX;
    let mut best = None;
    for cand_y in window.rows() {
        if !cfg.clip_rule.admits_row(cand_y, block_size, search.height()) {
            continue;
        }
        for cand_x in window.columns() {
            if !cfg
                .clip_rule
                .admits_column(cand_x, cand_y, block_size, search.width())
            {
                continue;
            }
            // Both origins are non-negative once admitted.
            let Some(cand_origin) = search.byte_offset(cand_x as usize, cand_y as usize) else {
                continue;
            };
            let Some(error) = M::block_error_capped(
                source,
                source_origin,
                search,
                cand_origin,
                block_size,
                min_error,
            ) else {
                continue;
            };
            if error < min_error {
                min_error = error;
                best = Some((cand_x, cand_y));
            }
        }
    }

    match best {
        None => MatchOutcome::Unsearched,
        Some((cand_x, cand_y)) => {
            let radius = cfg.block_radius() as i64;
            MatchOutcome::Found {
                center: Point::new((cand_x + radius) as i32, (cand_y + radius) as i32),
                error: min_error,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{search_point, BlockMatcher, MatchOutcome};
    use crate::config::{ClipRule, MatchConfig, OutputMode};
    use crate::image::{OwnedBuffer, PixelFormat};
    use crate::kernel::Ssd;
    use crate::point::Point;

    fn patch_pair() -> (OwnedBuffer, OwnedBuffer) {
        let mut source = OwnedBuffer::filled(10, 10, PixelFormat::Gray8, 0).unwrap();
        let mut search = OwnedBuffer::filled(10, 10, PixelFormat::Gray8, 0).unwrap();
        source.fill_rect(4, 4, 3, 3, &[200]);
        search.fill_rect(5, 5, 3, 3, &[200]);
        (source, search)
    }

    #[test]
    fn encode_covers_every_outcome() {
        let reference = Point::new(5, 5);
        let found = MatchOutcome::Found {
            center: Point::new(6, 7),
            error: 3,
        };
        assert_eq!(found.encode(reference, OutputMode::Absolute), Point::new(6, 7));
        assert_eq!(found.encode(reference, OutputMode::Relative), Point::new(1, 2));
        assert_eq!(
            MatchOutcome::Unsearched.encode(reference, OutputMode::Absolute),
            reference
        );
        assert_eq!(
            MatchOutcome::Unsearched.encode(reference, OutputMode::Relative),
            Point::ZERO
        );
        for mode in [OutputMode::Absolute, OutputMode::Relative] {
            assert_eq!(MatchOutcome::Skipped.encode(reference, mode), Point::SENTINEL);
        }
    }

    #[test]
    fn search_point_finds_shifted_patch_with_zero_error() {
        let (source, search) = patch_pair();
        let cfg = MatchConfig {
            block_size: 3,
            search_radius: 2,
            ..MatchConfig::default()
        };
        let outcome = search_point::<Ssd>(&cfg, source.view(), search.view(), Point::new(5, 5));
        assert_eq!(
            outcome,
            MatchOutcome::Found {
                center: Point::new(6, 6),
                error: 0,
            }
        );
    }

    #[test]
    fn zero_radius_leaves_point_unsearched() {
        let (source, search) = patch_pair();
        let cfg = MatchConfig {
            block_size: 3,
            search_radius: 0,
            clip_rule: ClipRule::Legacy,
            ..MatchConfig::default()
        };
        let outcome = search_point::<Ssd>(&cfg, source.view(), search.view(), Point::new(5, 5));
        assert_eq!(outcome, MatchOutcome::Unsearched);
    }

    #[test]
    fn setters_update_config() {
        let mut matcher = BlockMatcher::new();
        matcher.set_block_size(7);
        matcher.set_search_radius(3);
        assert_eq!(matcher.config().block_size, 7);
        assert_eq!(matcher.config().search_radius, 3);
    }
}
