//! Configuration and track-layout errors

use thiserror::Error;

/// Rejected configuration or invalid explicit track layout.
///
/// Everything else in the sim is a documented no-op rather than an error:
/// dropped jump commands, missing cell visuals, out-of-range landings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("track length must be at least 1 cell")]
    EmptyTrack,
    #[error("track must start on a platform cell")]
    GapAtStart,
    #[error("track cell {0} follows another gap; gaps cannot be adjacent")]
    AdjacentGaps(usize),
    #[error("jump duration must be positive")]
    NonPositiveJumpDuration,
    #[error("input enable delay must not be negative")]
    NegativeEnableDelay,
}
