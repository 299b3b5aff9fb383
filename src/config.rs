//! Engine configuration.
//!
//! All speech tunables are centralized here and can be loaded from a TOML
//! file. Any missing or invalid entries fall back to defaults so a caller
//! can always construct an engine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Lowest allowed pitch multiplier (1.0 is the voice's normal tone).
pub const MIN_PITCH: f32 = 0.5;
/// Highest allowed pitch multiplier.
pub const MAX_PITCH: f32 = 2.0;
/// Lowest allowed speech rate (1.0 is normal, 0.5 half speed).
pub const MIN_RATE: f32 = 0.25;
/// Highest allowed speech rate.
pub const MAX_RATE: f32 = 4.0;

/// Speech settings applied to the backend at engine construction;
/// deserializable from TOML.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EngineConfig {
    /// BCP-47 language tag handed to the backend.
    pub language: String,
    pub pitch: f32,
    pub rate: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            language: "en-US".to_string(),
            pitch: 1.0,
            rate: 1.0,
        }
    }
}

impl EngineConfig {
    /// Clamp pitch and rate into their supported ranges.
    pub fn clamped(mut self) -> Self {
        self.pitch = self.pitch.clamp(MIN_PITCH, MAX_PITCH);
        self.rate = self.rate.clamp(MIN_RATE, MAX_RATE);
        self
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
struct ConfigFile {
    speech: EngineConfig,
}

/// Load an [`EngineConfig`] from a TOML file, falling back to defaults if
/// the file is missing or malformed.
pub fn load_config(path: &Path) -> EngineConfig {
    match fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<ConfigFile>(&contents) {
            Ok(file) => {
                tracing::info!(path = %path.display(), "Loaded engine config");
                file.speech.clamped()
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "Invalid engine config TOML: {err}");
                EngineConfig::default()
            }
        },
        Err(err) => {
            tracing::warn!(path = %path.display(), "Falling back to default engine config: {err}");
            EngineConfig::default()
        }
    }
}
