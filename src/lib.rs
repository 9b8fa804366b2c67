//! blockmatch estimates per-point displacement between two images by
//! exhaustive block matching.
//!
//! A [`BlockMatcher`] takes square blocks around reference points in a
//! source [`PixelBuffer`], scores every candidate position inside a search
//! window of a second buffer by sum of squared differences, and reports the
//! best-matching block center either in absolute coordinates or as a
//! displacement. Points whose block does not fit in the source buffer yield
//! [`Point::SENTINEL`].
//!
//! Reference points can be fanned out over threads with the `rayon` feature.

pub mod config;
pub mod image;
pub mod kernel;
pub mod lowlevel;
pub mod point;
pub mod search;
mod trace;
pub mod util;

pub use crate::config::{ClipRule, MatchConfig, OutputMode};
pub use crate::image::{OwnedBuffer, PixelBuffer, PixelFormat};
pub use crate::point::Point;
pub use crate::search::{BlockMatcher, MatchOutcome};
pub use crate::util::{BlockMatchError, BlockMatchResult};

#[cfg(feature = "image-io")]
pub use crate::image::io;
