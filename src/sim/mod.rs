//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Driven only by explicit commands and a per-frame delta time
//! - Seeded RNG only
//! - No rendering or platform dependencies (those sit behind [`Presenter`])

pub mod avatar;
pub mod error;
pub mod presenter;
pub mod session;
pub mod track;

pub use avatar::{AvatarController, JumpStep};
pub use error::ConfigError;
pub use presenter::{AnimationCue, Presenter};
pub use session::{JumpEnded, LandingOutcome, Session, SessionConfig, SessionPhase};
pub use track::{CellKind, Track};
