//! Boundary to the presentation layer
//!
//! The sim never renders, animates or captures input itself; it narrates what
//! happened through this trait and an engine-side implementation mirrors it
//! into the scene graph, UI and input system. Every method defaults to a
//! no-op, so presenters implement only what they can show - a presenter with
//! no visual asset for a cell kind simply skips it.

use glam::Vec3;

use super::track::CellKind;

/// Named animation cues the avatar triggers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationCue {
    /// Jump animation, sped up to fit inside the jump duration
    Jump { rate: f32 },
    /// Standing idle
    Idle,
}

/// External collaborators: rendering, animation, UI counter, input capture.
///
/// Single-threaded; called synchronously from within session/controller
/// operations, always after the sim state change they describe.
pub trait Presenter {
    /// A cell of the freshly generated track. Called once per cell in index
    /// order; gaps normally spawn nothing.
    fn spawn_cell(&mut self, index: u32, kind: CellKind) {
        let _ = (index, kind);
    }

    /// Remove all spawned cell visuals (track is about to be regenerated)
    fn clear_cells(&mut self) {}

    /// Play an avatar animation
    fn play_cue(&mut self, cue: AnimationCue) {
        let _ = cue;
    }

    /// Avatar position changed
    fn move_avatar(&mut self, position: Vec3) {
        let _ = position;
    }

    /// Update the step counter display
    fn show_steps(&mut self, steps: u32) {
        let _ = steps;
    }

    /// Show or hide the start menu
    fn set_menu_visible(&mut self, visible: bool) {
        let _ = visible;
    }

    /// Enable or disable raw input capture at the device level
    fn set_input_capture(&mut self, enabled: bool) {
        let _ = enabled;
    }
}

/// Null presenter for headless runs and tests
impl Presenter for () {}
