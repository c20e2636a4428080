//! Recorded notes
//!
//! A note needs only `start` and `end` (seconds). Any other fields in the
//! source JSON (pitch, velocity, channel, ...) are carried through untouched.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{EditError, Result};

/// A played note with its onset and release times in seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub start: f64,
    pub end: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    pub fn new(start: f64, end: f64) -> Self {
        Self {
            start,
            end,
            extra: Map::new(),
        }
    }

    /// Attach an extra field
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.extra.insert(key.to_string(), value.into());
        self
    }

    /// MIDI velocity, if the note carries one
    pub fn velocity(&self) -> Option<f64> {
        self.extra.get("velocity").and_then(Value::as_f64)
    }

    /// Copy of this note moved earlier by `seconds` (later for negative values)
    pub fn shifted_earlier(&self, seconds: f64) -> Note {
        Note {
            start: self.start - seconds,
            end: self.end - seconds,
            extra: self.extra.clone(),
        }
    }
}

/// Copy of `notes` sorted by start time; ties keep their input order
pub fn sorted_by_start(notes: &[Note]) -> Vec<Note> {
    let mut sorted = notes.to_vec();
    sorted.sort_by(|a, b| a.start.total_cmp(&b.start));
    sorted
}

/// Load a JSON array of notes
pub fn load_notes(path: &Path) -> Result<Vec<Note>> {
    if !path.exists() {
        return Err(EditError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Save notes as a pretty-printed JSON array
pub fn save_notes(path: &Path, notes: &[Note]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(notes)?)?;
    Ok(())
}
