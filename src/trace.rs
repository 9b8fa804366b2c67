//! Conditional tracing for match calls.
//!
//! `BlockMatcher::match_outcomes` opens a `match_points` span carrying the
//! point count, block size, search radius and parallel flag, then emits a
//! `points_matched` event with the found / skipped / unsearched counts.
//! With the `tracing` feature these forward to `tracing`; without it they
//! expand to nothing.

/// Opens an info-level span, e.g. `match_points` with per-call parameters.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Emits an info-level event such as `points_matched { found, skipped, unsearched }`.
///
/// Disabled builds still evaluate the outcome counts, which are otherwise
/// only computed for this event.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::info!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::info!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

pub(crate) use trace_event;
pub(crate) use trace_span;

/// Guard returned in place of the `match_points` span without `tracing`.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Mirrors `Span::entered`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
