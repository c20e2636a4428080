//! Editing defaults
//!
//! Loaded from a JSON file; any field left out takes its default. CLI flags
//! override individual values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::WavFormat;
use crate::error::{EditError, Result};

/// Default minimum gap between note onsets that counts as a break (seconds)
pub const DEFAULT_MIN_BREAK_SECS: f64 = 2.0;

/// Default longest silence tolerated inside a playing region (seconds)
pub const DEFAULT_REGION_MAX_SILENCE_SECS: f64 = 2.0;

/// Default shortest playing region worth keeping (seconds)
pub const DEFAULT_REGION_MIN_DURATION_SECS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditConfig {
    /// Sample encoding of produced WAV files
    pub output_format: WavFormat,
    /// Minimum onset gap that counts as a break
    pub min_break_secs: f64,
    /// Longest silence tolerated inside a playing region
    pub region_max_silence_secs: f64,
    /// Shortest playing region worth keeping
    pub region_min_duration_secs: f64,
    /// Tempo the player was asked to play at, used to fold tempo estimates
    pub target_bpm: Option<f64>,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            output_format: WavFormat::Float32,
            min_break_secs: DEFAULT_MIN_BREAK_SECS,
            region_max_silence_secs: DEFAULT_REGION_MAX_SILENCE_SECS,
            region_min_duration_secs: DEFAULT_REGION_MIN_DURATION_SECS,
            target_bpm: None,
        }
    }
}

impl EditConfig {
    /// Load a config file
    ///
    /// # Errors
    /// * `FileNotFound` - If the file does not exist
    /// * `Serialization` - If the JSON is malformed
    /// * `ProcessingError` - If a value is out of range
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EditError::FileNotFound {
                path: path.display().to_string(),
                source: None,
            });
        }

        let config: EditConfig = serde_json::from_str(&fs::read_to_string(path)?)?;
        config.validate()?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Load a config file if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Check durations are non-negative and the target tempo is positive
    pub fn validate(&self) -> Result<()> {
        let durations = [
            ("min_break_secs", self.min_break_secs),
            ("region_max_silence_secs", self.region_max_silence_secs),
            ("region_min_duration_secs", self.region_min_duration_secs),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(EditError::ProcessingError {
                    reason: format!("config value {} must be a non-negative number, got {}", name, value),
                });
            }
        }

        if let Some(bpm) = self.target_bpm {
            if !bpm.is_finite() || bpm <= 0.0 {
                return Err(EditError::ProcessingError {
                    reason: format!("config value target_bpm must be positive, got {}", bpm),
                });
            }
        }

        Ok(())
    }
}
