//! Game settings and preferences
//!
//! Persisted as a JSON file next to the binary; every field has a default so
//! a partial file (or none at all) still yields a runnable configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_INPUT_ENABLE_DELAY, DEFAULT_JUMP_DURATION, DEFAULT_TRACK_LENGTH};
use crate::sim::SessionConfig;

/// User-tunable settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Track length in cells
    pub track_length: u32,
    /// Wall-clock duration of every jump (seconds)
    pub jump_duration_secs: f32,
    /// Delay before input is accepted after a session starts (seconds)
    pub input_enable_delay_secs: f32,
    /// Fixed RNG seed; omit for a fresh seed per launch
    pub seed: Option<u64>,
    /// Demo sessions to run before the driver exits
    pub runs: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            track_length: DEFAULT_TRACK_LENGTH,
            jump_duration_secs: DEFAULT_JUMP_DURATION,
            input_enable_delay_secs: DEFAULT_INPUT_ENABLE_DELAY,
            seed: None,
            runs: 3,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults if the file
    /// is missing or unreadable. Values are validated later, when the
    /// session is built.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(err) => {
                    log::warn!("Ignoring malformed settings file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::info!("No settings at {} ({err}), using defaults", path.display());
                Self::default()
            }
        }
    }

    /// Write settings back out as pretty JSON
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(path, json) {
                    log::warn!("Failed to save settings to {}: {err}", path.display());
                } else {
                    log::info!("Settings saved to {}", path.display());
                }
            }
            Err(err) => log::warn!("Failed to serialize settings: {err}"),
        }
    }

    /// Bridge into the sim's validated configuration
    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig {
            track_length: self.track_length,
            jump_duration: self.jump_duration_secs,
            input_enable_delay: self.input_enable_delay_secs,
        }
    }
}
