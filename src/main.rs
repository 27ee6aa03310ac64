//! Gap Runner demo driver
//!
//! Headless harness around the sim: loads settings, then plays a few
//! autopilot sessions at a fixed timestep, logging what a renderer would
//! show. Pass a settings JSON path as the first argument; control verbosity
//! with RUST_LOG.

use std::env;
use std::path::Path;

use gap_runner::consts::SIM_DT;
use gap_runner::sim::{
    AnimationCue, CellKind, JumpStep, LandingOutcome, Presenter, Session, SessionPhase,
};
use gap_runner::Settings;

/// Presenter that narrates to the log instead of a scene graph
struct LogPresenter;

impl Presenter for LogPresenter {
    fn spawn_cell(&mut self, index: u32, kind: CellKind) {
        // A real presenter would instantiate a platform mesh here; gaps get
        // nothing either way
        if kind == CellKind::Platform {
            log::debug!("spawn platform at cell {index}");
        }
    }

    fn clear_cells(&mut self) {
        log::debug!("clear track visuals");
    }

    fn play_cue(&mut self, cue: AnimationCue) {
        match cue {
            AnimationCue::Jump { rate } => log::debug!("play jump animation at {rate}x"),
            AnimationCue::Idle => log::debug!("play idle animation"),
        }
    }

    fn show_steps(&mut self, steps: u32) {
        log::debug!("steps counter: {steps}");
    }

    fn set_menu_visible(&mut self, visible: bool) {
        log::debug!("start menu visible: {visible}");
    }

    fn set_input_capture(&mut self, enabled: bool) {
        log::debug!("raw input capture: {enabled}");
    }
}

/// Safe move for the current position: double over an upcoming gap,
/// otherwise a single step. Steps off the end when the track runs out.
fn pick_step(session: &Session) -> JumpStep {
    let next = session.avatar().step_index() + 1;
    match session.track().cell(next) {
        Some(CellKind::Gap) => JumpStep::Double,
        _ => JumpStep::Single,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let settings = match env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path)),
        None => Settings::default(),
    };
    let config = settings.to_session_config();
    let base_seed: u64 = settings.seed.unwrap_or_else(rand::random);
    log::info!("base seed {base_seed}");

    let mut presenter = LogPresenter;
    for run in 0..settings.runs {
        let seed = base_seed.wrapping_add(run as u64);
        let mut session = Session::new(config, seed, &mut presenter)?;
        session.start(&mut presenter);

        let mut jumps = 0u32;
        loop {
            if let Some(ended) = session.advance(SIM_DT, &mut presenter) {
                if ended.outcome != LandingOutcome::Landed {
                    log::info!(
                        "run {run}: {:?} at cell {} after {jumps} jumps",
                        ended.outcome,
                        ended.step_index
                    );
                    break;
                }
            }

            if session.phase() == SessionPhase::Playing
                && session.avatar().input_enabled()
                && !session.avatar().is_jumping()
                && session.jump(pick_step(&session), &mut presenter)
            {
                jumps += 1;
            }
        }
    }

    Ok(())
}
