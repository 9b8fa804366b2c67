//! Per-point block and search window geometry.

use crate::config::ClipRule;
use crate::point::Point;

/// Half the block size, rounded down.
///
/// Even block sizes are therefore not centered: they extend one pixel
/// further on the high side of the reference point.
pub fn block_radius(block_size: usize) -> usize {
    block_size / 2
}

/// Top-left pixel of the source block around `point`, if the block fits.
///
/// A point is skipped when `x - r < 0`, `x + r >= width`, or the same holds
/// for `y` and `height`, where `r = block_size / 2`. For even block sizes the
/// high-side test is one pixel stricter than the block itself requires.
pub fn source_block_origin(
    point: Point,
    block_size: usize,
    width: usize,
    height: usize,
) -> Option<(usize, usize)> {
    let radius = block_radius(block_size) as i64;
    let x = i64::from(point.x);
    let y = i64::from(point.y);
    if x - radius < 0 || x + radius >= width as i64 {
        return None;
    }
    if y - radius < 0 || y + radius >= height as i64 {
        return None;
    }
    Some(((x - radius) as usize, (y - radius) as usize))
}

/// Candidate block origins examined around one reference point.
///
/// The window starts at `point - block_radius - search_radius` and spans
/// `2 * search_radius` offsets per axis, so the offset that reproduces the
/// reference position sits at index `search_radius` and the window reaches
/// one pixel further up/left than down/right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchWindow {
    /// Origin x of the first candidate.
    pub x0: i64,
    /// Origin y of the first candidate.
    pub y0: i64,
    /// Number of candidate offsets per axis.
    pub span: usize,
}

impl SearchWindow {
    /// Builds the window for `point`.
    pub fn around(point: Point, block_size: usize, search_radius: usize) -> Self {
        let reach = (block_radius(block_size) + search_radius) as i64;
        Self {
            x0: i64::from(point.x) - reach,
            y0: i64::from(point.y) - reach,
            span: 2 * search_radius,
        }
    }

    /// Candidate origin y values, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = i64> {
        let y0 = self.y0;
        (0..self.span as i64).map(move |dy| y0 + dy)
    }

    /// Candidate origin x values, left to right.
    pub fn columns(&self) -> impl Iterator<Item = i64> {
        let x0 = self.x0;
        (0..self.span as i64).map(move |dx| x0 + dx)
    }
}

impl ClipRule {
    /// Row test: the candidate must start at or below the top edge and its
    /// `origin + block_size` must stay below `height`.
    pub fn admits_row(self, cand_y: i64, block_size: usize, height: usize) -> bool {
        cand_y >= 0 && cand_y + (block_size as i64) < height as i64
    }

    /// Column test for a candidate whose row already passed [`ClipRule::admits_row`].
    pub fn admits_column(
        self,
        cand_x: i64,
        cand_y: i64,
        block_size: usize,
        width: usize,
    ) -> bool {
        let block = block_size as i64;
        match self {
            ClipRule::Bounded => cand_x >= 0 && cand_x + block < width as i64,
            ClipRule::Legacy => cand_x >= 0 && cand_y + block < width as i64,
        }
    }
}
