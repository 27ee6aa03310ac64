//! Session state machine
//!
//! Composes a generated [`Track`] with the [`AvatarController`]: gates player
//! commands, consumes jump-ended notifications, applies the landing rule and
//! drives the Init -> Playing -> reset lifecycle.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::avatar::{AvatarController, JumpStep};
use super::error::ConfigError;
use super::presenter::Presenter;
use super::track::{CellKind, Track};
use crate::consts::{DEFAULT_INPUT_ENABLE_DELAY, DEFAULT_JUMP_DURATION, DEFAULT_TRACK_LENGTH};

/// Session lifecycle phase.
///
/// `Ended` is modeled but never dwelt in: every terminal landing routes the
/// session straight back to `Init`. There is deliberately no win state -
/// running off the end of the track resets exactly like falling in a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Track built, avatar parked at the start, input disabled
    Init,
    /// Jump commands accepted (after the enable delay)
    Playing,
    /// Terminal state; transitions pass through without stopping here
    Ended,
}

/// Tunable session parameters
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    /// Track length in cells
    pub track_length: u32,
    /// Wall-clock duration of every jump (seconds)
    pub jump_duration: f32,
    /// Delay between entering Playing and accepting input (seconds)
    pub input_enable_delay: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            track_length: DEFAULT_TRACK_LENGTH,
            jump_duration: DEFAULT_JUMP_DURATION,
            input_enable_delay: DEFAULT_INPUT_ENABLE_DELAY,
        }
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.track_length == 0 {
            return Err(ConfigError::EmptyTrack);
        }
        if self.jump_duration <= 0.0 {
            return Err(ConfigError::NonPositiveJumpDuration);
        }
        if self.input_enable_delay < 0.0 {
            return Err(ConfigError::NegativeEnableDelay);
        }
        Ok(())
    }
}

/// Where a completed jump ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandingOutcome {
    /// On a platform; the session keeps playing
    Landed,
    /// In a gap; the session has reset
    Fell,
    /// At or past the end of the track; the session has reset
    Overshot,
}

/// Outbound notification: a jump finished.
///
/// `step_index` is the raw cumulative index, which may exceed the track
/// length on an overshoot; the counter display is already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpEnded {
    pub step_index: u32,
    pub outcome: LandingOutcome,
}

/// One-shot deferred input enable, stamped with the epoch that scheduled it
#[derive(Debug, Clone, Copy)]
struct PendingEnable {
    remaining: f32,
    epoch: u64,
}

/// One playthrough coordinator. Owns the track, the avatar controller, the
/// session RNG and the phase; everything mutable lives here, no globals.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    phase: SessionPhase,
    track: Track,
    avatar: AvatarController,
    rng: Pcg32,
    /// Bumped on every Init entry; stale deferred callbacks check it
    epoch: u64,
    pending_enable: Option<PendingEnable>,
    steps_shown: u32,
}

impl Session {
    /// Build a session with a freshly generated track.
    pub fn new(
        config: SessionConfig,
        seed: u64,
        presenter: &mut impl Presenter,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let track = Track::generate(config.track_length, &mut rng)?;
        let mut session = Self {
            avatar: AvatarController::new(config.jump_duration),
            config,
            phase: SessionPhase::Init,
            track,
            rng,
            epoch: 0,
            pending_enable: None,
            steps_shown: 0,
        };
        session.present_init(presenter);
        Ok(session)
    }

    /// Build a session over an explicit track layout (scripted levels,
    /// tests). Resets still regenerate randomly at the same length.
    pub fn with_track(
        config: SessionConfig,
        track: Track,
        seed: u64,
        presenter: &mut impl Presenter,
    ) -> Result<Self, ConfigError> {
        let config = SessionConfig {
            track_length: track.len(),
            ..config
        };
        config.validate()?;
        let mut session = Self {
            avatar: AvatarController::new(config.jump_duration),
            config,
            phase: SessionPhase::Init,
            track,
            rng: Pcg32::seed_from_u64(seed),
            epoch: 0,
            pending_enable: None,
            steps_shown: 0,
        };
        session.present_init(presenter);
        Ok(session)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn avatar(&self) -> &AvatarController {
        &self.avatar
    }

    /// Clamped value currently on the step counter display
    pub fn steps_shown(&self) -> u32 {
        self.steps_shown
    }

    /// Start command: Init -> Playing. No-op in any other phase, so a
    /// double-activated start button cannot restart a running session.
    pub fn start(&mut self, presenter: &mut impl Presenter) {
        if self.phase != SessionPhase::Init {
            return;
        }
        self.phase = SessionPhase::Playing;
        presenter.set_menu_visible(false);
        self.steps_shown = 0;
        presenter.show_steps(0);
        // Input stays off for a beat so the release edge of the input that
        // pressed Start is not read as the first jump
        self.pending_enable = Some(PendingEnable {
            remaining: self.config.input_enable_delay,
            epoch: self.epoch,
        });
        log::info!("session started (track length {})", self.track.len());
    }

    /// Jump command from the player. Dropped outside Playing, during the
    /// enable delay, and while a jump is in flight.
    pub fn jump(&mut self, step: JumpStep, presenter: &mut impl Presenter) -> bool {
        if self.phase != SessionPhase::Playing {
            return false;
        }
        self.avatar.try_jump(step, presenter)
    }

    /// Per-frame tick. Fires the deferred input enable when due and advances
    /// any in-flight jump; returns the jump-ended notification, with its
    /// landing outcome, on the tick a jump completes.
    pub fn advance(&mut self, dt: f32, presenter: &mut impl Presenter) -> Option<JumpEnded> {
        if let Some(pending) = &mut self.pending_enable {
            pending.remaining -= dt;
            if pending.remaining <= 0.0 {
                let current = pending.epoch == self.epoch;
                self.pending_enable = None;
                // A reset may have raced the timer; never rearm a session
                // that already restarted
                if current && self.phase == SessionPhase::Playing {
                    self.avatar.set_input_enabled(true);
                    presenter.set_input_capture(true);
                }
            }
        }

        let step_index = self.avatar.advance(dt, presenter)?;

        // The last jump may overshoot with a double step; the display is
        // clamped to the track length before the landing rule runs
        self.steps_shown = step_index.min(self.track.len());
        presenter.show_steps(self.steps_shown);

        let outcome = match self.track.cell(step_index) {
            Some(CellKind::Platform) => LandingOutcome::Landed,
            Some(CellKind::Gap) => LandingOutcome::Fell,
            None => LandingOutcome::Overshot,
        };
        match outcome {
            LandingOutcome::Landed => {}
            LandingOutcome::Fell => {
                log::info!("fell into gap at cell {step_index}");
                self.enter_init(presenter);
            }
            LandingOutcome::Overshot => {
                log::info!(
                    "overshot the track (cell {step_index} of {})",
                    self.track.len()
                );
                self.enter_init(presenter);
            }
        }

        Some(JumpEnded {
            step_index,
            outcome,
        })
    }

    /// Init entry: new epoch, fresh track, everything repositioned and
    /// disarmed. Runs synchronously so an abandoned jump stops consuming
    /// time on the same tick.
    fn enter_init(&mut self, presenter: &mut impl Presenter) {
        self.epoch = self.epoch.wrapping_add(1);
        self.pending_enable = None;
        self.phase = SessionPhase::Init;
        // Length was validated at construction, so regeneration cannot fail
        if let Ok(track) = Track::generate(self.config.track_length, &mut self.rng) {
            self.track = track;
        }
        self.present_init(presenter);
        log::debug!("session reset, new track generated");
    }

    /// Shared tail of construction and Init entry: mirror the track to the
    /// presenter, park and disarm the avatar, clear the counter.
    fn present_init(&mut self, presenter: &mut impl Presenter) {
        presenter.clear_cells();
        for (index, kind) in self.track.cells().enumerate() {
            presenter.spawn_cell(index as u32, kind);
        }
        presenter.set_menu_visible(true);
        self.avatar.set_input_enabled(false);
        presenter.set_input_capture(false);
        self.avatar.reset();
        self.avatar.set_position(Vec3::ZERO, presenter);
        self.steps_shown = 0;
        presenter.show_steps(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::presenter::AnimationCue;

    /// Records presenter calls for assertions
    #[derive(Default)]
    struct Recording {
        steps: Vec<u32>,
        cues: Vec<AnimationCue>,
        capture: Vec<bool>,
        menu: Vec<bool>,
        spawned: Vec<(u32, CellKind)>,
        clears: u32,
    }

    impl Presenter for Recording {
        fn spawn_cell(&mut self, index: u32, kind: CellKind) {
            self.spawned.push((index, kind));
        }
        fn clear_cells(&mut self) {
            self.clears += 1;
        }
        fn play_cue(&mut self, cue: AnimationCue) {
            self.cues.push(cue);
        }
        fn show_steps(&mut self, steps: u32) {
            self.steps.push(steps);
        }
        fn set_menu_visible(&mut self, visible: bool) {
            self.menu.push(visible);
        }
        fn set_input_capture(&mut self, enabled: bool) {
            self.capture.push(enabled);
        }
    }

    fn scripted_session(cells: Vec<CellKind>) -> Session {
        let track = Track::from_cells(cells).unwrap();
        Session::with_track(SessionConfig::default(), track, 7, &mut ()).unwrap()
    }

    /// Start and advance past the input-enable delay
    fn start_and_arm(session: &mut Session) {
        session.start(&mut ());
        for _ in 0..12 {
            session.advance(SIM_DT, &mut ());
        }
        assert!(session.avatar().input_enabled());
    }

    /// Issue a jump and advance until its notification arrives
    fn jump_and_settle(session: &mut Session, step: JumpStep) -> JumpEnded {
        assert!(session.jump(step, &mut ()));
        for _ in 0..60 {
            if let Some(ended) = session.advance(SIM_DT, &mut ()) {
                return ended;
            }
        }
        panic!("jump never completed");
    }

    use CellKind::{Gap, Platform};

    #[test]
    fn test_start_only_from_init() {
        let mut session = scripted_session(vec![Platform, Platform]);
        assert_eq!(session.phase(), SessionPhase::Init);
        session.start(&mut ());
        assert_eq!(session.phase(), SessionPhase::Playing);
        // Debounced against double activation
        session.start(&mut ());
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_input_disabled_in_init() {
        let mut session = scripted_session(vec![Platform, Platform]);
        assert!(!session.jump(JumpStep::Single, &mut ()));
        for _ in 0..30 {
            session.advance(SIM_DT, &mut ());
        }
        assert_eq!(session.avatar().step_index(), 0);
    }

    #[test]
    fn test_enable_delay_gates_early_jumps() {
        let mut session = scripted_session(vec![Platform, Platform, Platform]);
        session.start(&mut ());
        // Release edge arrives on the very next tick - must be dropped
        assert!(!session.jump(JumpStep::Single, &mut ()));
        session.advance(SIM_DT, &mut ());
        assert!(!session.jump(JumpStep::Single, &mut ()));
        assert_eq!(session.avatar().step_index(), 0);

        for _ in 0..12 {
            session.advance(SIM_DT, &mut ());
        }
        assert!(session.jump(JumpStep::Single, &mut ()));
    }

    #[test]
    fn test_landing_on_platform_stays_playing() {
        let mut session = scripted_session(vec![Platform, Platform, Gap, Platform]);
        start_and_arm(&mut session);

        let ended = jump_and_settle(&mut session, JumpStep::Single);
        assert_eq!(ended.step_index, 1);
        assert_eq!(ended.outcome, LandingOutcome::Landed);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.steps_shown(), 1);
    }

    #[test]
    fn test_landing_in_gap_resets() {
        let mut session = scripted_session(vec![Platform, Platform, Gap, Platform]);
        start_and_arm(&mut session);

        jump_and_settle(&mut session, JumpStep::Single);
        let ended = jump_and_settle(&mut session, JumpStep::Single);
        assert_eq!(ended.step_index, 2);
        assert_eq!(ended.outcome, LandingOutcome::Fell);

        assert_eq!(session.phase(), SessionPhase::Init);
        assert_eq!(session.avatar().position(), Vec3::ZERO);
        assert_eq!(session.avatar().step_index(), 0);
        assert!(!session.avatar().input_enabled());
    }

    #[test]
    fn test_overshoot_resets_and_display_clamps() {
        let mut session = scripted_session(vec![Platform, Platform, Gap, Platform]);
        start_and_arm(&mut session);

        jump_and_settle(&mut session, JumpStep::Single); // -> 1
        jump_and_settle(&mut session, JumpStep::Double); // -> 3
        let mut recording = Recording::default();
        assert!(session.jump(JumpStep::Double, &mut recording)); // -> 5, past the end
        let mut ended = None;
        for _ in 0..60 {
            if let Some(e) = session.advance(SIM_DT, &mut recording) {
                ended = Some(e);
                break;
            }
        }

        let ended = ended.expect("jump never completed");
        assert_eq!(ended.step_index, 5);
        assert_eq!(ended.outcome, LandingOutcome::Overshot);
        assert_eq!(session.phase(), SessionPhase::Init);
        // Raw index 5 lands on the display as the track length, then the
        // reset clears it to 0
        assert!(recording.steps.contains(&4));
        assert_eq!(recording.steps.last(), Some(&0));
    }

    #[test]
    fn test_reset_regenerates_valid_track() {
        let mut session = scripted_session(vec![Platform, Gap, Platform]);
        start_and_arm(&mut session);
        jump_and_settle(&mut session, JumpStep::Single); // falls, resets

        let first = session.track().clone();
        assert_eq!(first.len(), 3);
        assert_eq!(first.cell(0), Some(Platform));

        // Reset again; same invariants must hold each time
        start_and_arm(&mut session);
        jump_and_settle(&mut session, JumpStep::Double);
        let landed = session.avatar().step_index();
        if session.phase() == SessionPhase::Init {
            assert_eq!(session.avatar().position(), Vec3::ZERO);
            assert_eq!(session.track().cell(0), Some(Platform));
        } else {
            assert_eq!(session.track().cell(landed), Some(Platform));
        }
    }

    #[test]
    fn test_no_stale_enable_after_reset() {
        let mut session = scripted_session(vec![Platform, Gap, Platform]);
        start_and_arm(&mut session);
        jump_and_settle(&mut session, JumpStep::Single); // falls, resets

        // Any enable scheduled by the dead session must not fire now
        for _ in 0..60 {
            session.advance(SIM_DT, &mut ());
        }
        assert!(!session.avatar().input_enabled());
        assert!(!session.jump(JumpStep::Single, &mut ()));
    }

    #[test]
    fn test_one_notification_per_jump() {
        let mut session = scripted_session(vec![Platform, Platform, Platform]);
        start_and_arm(&mut session);

        assert!(session.jump(JumpStep::Single, &mut ()));
        let mut notifications = 0;
        for _ in 0..120 {
            if session.advance(SIM_DT, &mut ()).is_some() {
                notifications += 1;
            }
        }
        assert_eq!(notifications, 1);
    }

    #[test]
    fn test_presenter_sees_init_effects() {
        let mut recording = Recording::default();
        let track = Track::from_cells(vec![Platform, Gap, Platform]).unwrap();
        let session =
            Session::with_track(SessionConfig::default(), track, 7, &mut recording).unwrap();

        assert_eq!(recording.clears, 1);
        assert_eq!(
            recording.spawned,
            vec![(0, Platform), (1, Gap), (2, Platform)]
        );
        assert_eq!(recording.menu, vec![true]);
        assert_eq!(recording.capture, vec![false]);
        assert_eq!(recording.steps, vec![0]);
        assert_eq!(session.phase(), SessionPhase::Init);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let bad = SessionConfig {
            track_length: 0,
            ..Default::default()
        };
        assert_eq!(
            Session::new(bad, 1, &mut ()).unwrap_err(),
            ConfigError::EmptyTrack
        );

        let bad = SessionConfig {
            jump_duration: 0.0,
            ..Default::default()
        };
        assert_eq!(
            Session::new(bad, 1, &mut ()).unwrap_err(),
            ConfigError::NonPositiveJumpDuration
        );
    }
}
