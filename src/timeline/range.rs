//! Time ranges in seconds

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::engine::buffer::AudioBuffer;
use crate::error::{EditError, Result};

/// A span of time `[start, end)` in seconds
///
/// Serializes as a two-element array `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Length of the range in seconds
    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Check the range is finite, non-negative and not reversed
    pub fn validate(&self) -> Result<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(EditError::invalid_range(self.start, self.end, "bounds must be finite"));
        }
        if self.start < 0.0 {
            return Err(EditError::invalid_range(self.start, self.end, "start is negative"));
        }
        if self.start > self.end {
            return Err(EditError::invalid_range(self.start, self.end, "start is after end"));
        }
        Ok(())
    }

    /// Convert to frame indices and check the range lies inside the buffer
    pub fn to_frames(&self, buffer: &AudioBuffer) -> Result<Range<usize>> {
        self.validate()?;
        let frames = match (buffer.frame_at(self.start), buffer.frame_at(self.end)) {
            (Some(start), Some(end)) => start..end,
            _ => {
                return Err(EditError::invalid_range(
                    self.start,
                    self.end,
                    "cannot be mapped to sample frames",
                ))
            }
        };
        if frames.end > buffer.len() {
            return Err(EditError::invalid_range(
                self.start,
                self.end,
                format!("ends after the recording ({:.6}s)", buffer.duration_secs()),
            ));
        }
        Ok(frames)
    }
}

impl From<(f64, f64)> for TimeRange {
    fn from((start, end): (f64, f64)) -> Self {
        TimeRange::new(start, end)
    }
}

impl From<TimeRange> for (f64, f64) {
    fn from(range: TimeRange) -> Self {
        (range.start, range.end)
    }
}

/// Check every range is valid and that they are ascending and non-overlapping
///
/// Touching ranges (`previous.end == next.start`) are allowed.
pub fn validate_ordered(ranges: &[TimeRange]) -> Result<()> {
    for range in ranges {
        range.validate()?;
    }

    for (index, pair) in ranges.windows(2).enumerate() {
        if pair[1].start < pair[0].end {
            return Err(EditError::UnsortedOrOverlappingRanges {
                index: index + 1,
                start: pair[1].start,
                previous_end: pair[0].end,
            });
        }
    }

    Ok(())
}

/// Total duration covered by a set of ranges
pub fn total_duration(ranges: &[TimeRange]) -> f64 {
    ranges.iter().map(TimeRange::duration).sum()
}
