//! Matcher configuration.

use crate::search::window::block_radius;
use crate::util::{BlockMatchError, BlockMatchResult};

/// Largest block size or search radius accepted by [`MatchConfig::validate`].
pub const MAX_EXTENT: usize = 1 << 16;

/// Candidate clipping rule applied inside the search window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClipRule {
    /// Reject candidates whose block touches or crosses any buffer edge,
    /// using the same `origin + block_size >= extent` test on both axes.
    #[default]
    Bounded,
    /// Reproduce the historical column test verbatim: the column check only
    /// rejects a negative x origin and compares the candidate's *vertical*
    /// extent against the buffer *width*. Blocks may then run past the
    /// right edge and read into row padding or the next row; candidates
    /// whose bytes fall outside the backing slice are dropped.
    Legacy,
}

/// Encoding of matched points in the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// Absolute coordinates of the matched block center.
    #[default]
    Absolute,
    /// Matched block center minus the reference point.
    Relative,
}

impl OutputMode {
    /// Maps a "relative" flag to a mode.
    pub fn from_relative_flag(relative: bool) -> Self {
        if relative {
            OutputMode::Relative
        } else {
            OutputMode::Absolute
        }
    }
}

/// Block matching configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchConfig {
    /// Side of the square block in pixels.
    pub block_size: usize,
    /// Search radius in pixels; the window spans `2 * search_radius`
    /// candidate offsets per axis.
    pub search_radius: usize,
    /// Candidate clipping rule.
    pub clip_rule: ClipRule,
    /// Fan reference points out over rayon (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            block_size: 16,
            search_radius: 12,
            clip_rule: ClipRule::Bounded,
            parallel: false,
        }
    }
}

impl MatchConfig {
    /// Half the block size, rounded down; see [`block_radius`].
    pub fn block_radius(&self) -> usize {
        block_radius(self.block_size)
    }

    /// Checks the configuration before a match call.
    pub fn validate(&self) -> BlockMatchResult<()> {
        if self.block_size == 0 {
            return Err(BlockMatchError::InvalidConfig {
                reason: "block_size must be at least 1",
            });
        }
        if self.block_size > MAX_EXTENT {
            return Err(BlockMatchError::InvalidConfig {
                reason: "block_size too large",
            });
        }
        if self.search_radius > MAX_EXTENT {
            return Err(BlockMatchError::InvalidConfig {
                reason: "search_radius too large",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ClipRule, MatchConfig, OutputMode, MAX_EXTENT};
    use crate::BlockMatchError;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = MatchConfig::default();
        assert_eq!(cfg.block_size, 16);
        assert_eq!(cfg.search_radius, 12);
        assert_eq!(cfg.clip_rule, ClipRule::Bounded);
        assert!(!cfg.parallel);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn block_radius_floors() {
        let odd = MatchConfig {
            block_size: 5,
            ..MatchConfig::default()
        };
        let even = MatchConfig {
            block_size: 4,
            ..MatchConfig::default()
        };
        assert_eq!(odd.block_radius(), 2);
        assert_eq!(even.block_radius(), 2);
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let zero = MatchConfig {
            block_size: 0,
            ..MatchConfig::default()
        };
        assert_eq!(
            zero.validate(),
            Err(BlockMatchError::InvalidConfig {
                reason: "block_size must be at least 1",
            })
        );
        let wide = MatchConfig {
            search_radius: MAX_EXTENT + 1,
            ..MatchConfig::default()
        };
        assert!(wide.validate().is_err());
        let zero_radius = MatchConfig {
            search_radius: 0,
            ..MatchConfig::default()
        };
        assert!(zero_radius.validate().is_ok());
    }

    #[test]
    fn relative_flag_selects_mode() {
        assert_eq!(OutputMode::from_relative_flag(true), OutputMode::Relative);
        assert_eq!(OutputMode::from_relative_flag(false), OutputMode::Absolute);
    }
}
