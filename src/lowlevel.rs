//! Low-level building blocks for custom block matching pipelines.
//!
//! These expose the metric trait and window geometry behind
//! [`BlockMatcher`](crate::BlockMatcher) for callers that want to drive the
//! scan themselves, e.g. to score a fixed set of candidates.

pub use crate::kernel::{BlockMetric, Ssd};
pub use crate::search::window::{source_block_origin, SearchWindow};
