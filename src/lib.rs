//! Gap Runner - a discrete-step endless runner core
//!
//! Core modules:
//! - `sim`: Deterministic gameplay (track generation, jump movement, session state machine)
//! - `settings`: User-tunable configuration with JSON persistence
//!
//! Rendering, animation playback, UI widgets and raw input capture live on the
//! other side of the [`sim::Presenter`] boundary and are not part of this crate.

pub mod settings;
pub mod sim;

pub use settings::Settings;
pub use sim::{
    AnimationCue, AvatarController, CellKind, ConfigError, JumpEnded, JumpStep, LandingOutcome,
    Presenter, Session, SessionConfig, SessionPhase, Track,
};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep for the demo driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Default track length in cells
    pub const DEFAULT_TRACK_LENGTH: u32 = 50;

    /// Wall-clock duration of every jump, regardless of step length (seconds)
    pub const DEFAULT_JUMP_DURATION: f32 = 0.3;

    /// Delay between entering Playing and accepting input (seconds).
    /// Absorbs the release edge of whatever input started the session.
    pub const DEFAULT_INPUT_ENABLE_DELAY: f32 = 0.1;

    /// Playback rate for the jump animation (it is longer than the jump itself)
    pub const JUMP_ANIM_RATE: f32 = 3.5;

    /// World-space spacing between adjacent track cells along +X
    pub const CELL_SPACING: f32 = 1.0;
}
