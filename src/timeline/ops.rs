//! Sample-accurate timeline transforms
//!
//! Each function reads the input buffer and returns a new one; channels are
//! processed independently and keep equal lengths.

use tracing::debug;

use crate::engine::buffer::AudioBuffer;
use crate::error::Result;
use crate::timeline::range::{validate_ordered, TimeRange};

/// Extract `[start, end)` into a new buffer
///
/// # Errors
/// * `InvalidRange` - If the range is reversed, negative or past the end
pub fn cut(buffer: &AudioBuffer, start: f64, end: f64) -> Result<AudioBuffer> {
    let frames = TimeRange::new(start, end).to_frames(buffer)?;
    debug!(start = frames.start, end = frames.end, "cut frames");

    let channels = buffer
        .iter_channels()
        .map(|ch| ch[frames.clone()].to_vec())
        .collect();

    AudioBuffer::from_channels(channels, buffer.sample_rate())
}

/// Insert `end - start` seconds of silence at `start`
///
/// Everything from `start` onwards moves later by the inserted span. Both
/// bounds must lie inside the recording.
///
/// # Errors
/// * `InvalidRange` - If the range is reversed, negative or past the end
pub fn insert_silence(buffer: &AudioBuffer, start: f64, end: f64) -> Result<AudioBuffer> {
    let frames = TimeRange::new(start, end).to_frames(buffer)?;
    let inserted = frames.len();
    debug!(at = frames.start, inserted, "insert silence");

    let channels = buffer
        .iter_channels()
        .map(|ch| {
            let mut out = vec![0.0_f32; ch.len() + inserted];
            out[..frames.start].copy_from_slice(&ch[..frames.start]);
            out[frames.end..].copy_from_slice(&ch[frames.start..]);
            out
        })
        .collect();

    AudioBuffer::from_channels(channels, buffer.sample_rate())
}

/// Remove `[start, end)`, moving everything after it earlier
///
/// # Errors
/// * `InvalidRange` - If the range is reversed, negative or past the end
pub fn remove_slice(buffer: &AudioBuffer, start: f64, end: f64) -> Result<AudioBuffer> {
    remove_slices(buffer, &[TimeRange::new(start, end)])
}

/// Remove several ranges in one pass
///
/// Copies the audio before the first range, each gap between consecutive
/// ranges, and the audio after the last range. The result equals removing the
/// ranges one at a time from last to first.
///
/// # Errors
/// * `InvalidRange` - If any range is reversed, negative or past the end
/// * `UnsortedOrOverlappingRanges` - If the ranges are not ascending and disjoint
pub fn remove_slices(buffer: &AudioBuffer, ranges: &[TimeRange]) -> Result<AudioBuffer> {
    validate_ordered(ranges)?;

    let spans = ranges
        .iter()
        .map(|range| range.to_frames(buffer))
        .collect::<Result<Vec<_>>>()?;

    let removed: usize = spans.iter().map(|span| span.len()).sum();
    let kept = buffer.len() - removed;
    debug!(ranges = spans.len(), removed, kept, "remove slices");

    let channels = buffer
        .iter_channels()
        .map(|ch| {
            let mut out = Vec::with_capacity(kept);
            let mut cursor = 0;
            for span in &spans {
                out.extend_from_slice(&ch[cursor..span.start]);
                cursor = span.end;
            }
            out.extend_from_slice(&ch[cursor..]);
            out
        })
        .collect();

    AudioBuffer::from_channels(channels, buffer.sample_rate())
}
