//! Avatar movement controller
//!
//! Turns discrete jump commands into closed-form position interpolation: a
//! jump covers 1 or 2 cells along +X in a fixed wall-clock duration, so speed
//! scales with distance. There is no physics integration and no collision;
//! landing outcomes are the session's business.

use glam::Vec3;

use crate::consts::{CELL_SPACING, JUMP_ANIM_RATE};

use super::presenter::{AnimationCue, Presenter};

/// Distance of one jump command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpStep {
    /// One cell (left-button-equivalent)
    Single,
    /// Two cells (right-button-equivalent)
    Double,
}

impl JumpStep {
    /// Cells covered by this jump
    pub fn cells(self) -> u32 {
        match self {
            JumpStep::Single => 1,
            JumpStep::Double => 2,
        }
    }
}

/// Owns the avatar's motion state and jump timing.
///
/// The cumulative step index only ever grows between resets; it is the track
/// index the avatar occupies or is travelling toward.
#[derive(Debug, Clone)]
pub struct AvatarController {
    input_enabled: bool,
    jumping: bool,
    elapsed: f32,
    jump_duration: f32,
    speed: f32,
    start_pos: Vec3,
    target_pos: Vec3,
    pos: Vec3,
    step_index: u32,
}

impl AvatarController {
    /// `jump_duration` must be positive; the session config validates it.
    pub fn new(jump_duration: f32) -> Self {
        Self {
            input_enabled: false,
            jumping: false,
            elapsed: 0.0,
            jump_duration,
            speed: 0.0,
            start_pos: Vec3::ZERO,
            target_pos: Vec3::ZERO,
            pos: Vec3::ZERO,
            step_index: 0,
        }
    }

    /// Gate for jump commands. A jump already in flight is unaffected: it
    /// still completes and reports even if input is disabled mid-air.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Clear the step index and any in-flight jump. Does not move the avatar;
    /// callers reposition explicitly via [`set_position`](Self::set_position).
    pub fn reset(&mut self) {
        self.step_index = 0;
        self.jumping = false;
        self.elapsed = 0.0;
    }

    pub fn is_jumping(&self) -> bool {
        self.jumping
    }

    /// Track index the avatar occupies or is travelling toward
    pub fn step_index(&self) -> u32 {
        self.step_index
    }

    pub fn position(&self) -> Vec3 {
        self.pos
    }

    /// Scene-transform side channel; mirrors the write to the presenter
    pub fn set_position(&mut self, pos: Vec3, presenter: &mut impl Presenter) {
        self.pos = pos;
        presenter.move_avatar(pos);
    }

    /// Begin a jump. Returns false (command dropped, no queuing) while input
    /// is disabled or another jump is in flight.
    pub fn try_jump(&mut self, step: JumpStep, presenter: &mut impl Presenter) -> bool {
        if !self.input_enabled || self.jumping {
            return false;
        }

        let cells = step.cells();
        let distance = cells as f32 * CELL_SPACING;
        self.elapsed = 0.0;
        self.speed = distance / self.jump_duration;
        self.start_pos = self.pos;
        self.target_pos = self.start_pos + Vec3::new(distance, 0.0, 0.0);
        self.step_index += cells;
        self.jumping = true;

        presenter.play_cue(AnimationCue::Jump {
            rate: JUMP_ANIM_RATE,
        });
        true
    }

    /// Advance the in-flight jump by `dt` seconds. Returns the cumulative
    /// step index exactly once, on the tick the jump completes.
    pub fn advance(&mut self, dt: f32, presenter: &mut impl Presenter) -> Option<u32> {
        if !self.jumping {
            return None;
        }

        self.elapsed += dt;
        if self.elapsed > self.jump_duration {
            // Snap to the exact target so interpolation error never accumulates
            self.set_position(self.target_pos, presenter);
            self.jumping = false;
            presenter.play_cue(AnimationCue::Idle);
            Some(self.step_index)
        } else {
            let pos = self.pos + Vec3::new(self.speed * dt, 0.0, 0.0);
            self.set_position(pos, presenter);
            None
        }
    }
}
