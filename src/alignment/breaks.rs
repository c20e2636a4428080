//! Gap and activity detection over note onsets

use crate::alignment::note::{sorted_by_start, Note};
use crate::timeline::range::TimeRange;

/// Find practice breaks: gaps between consecutive note onsets of at least `min_gap` seconds
///
/// Notes are sorted by start first. Each break spans from the onset before the
/// gap to the onset after it, so the result is ascending and non-overlapping.
/// Fewer than two notes yield no breaks.
pub fn detect_breaks(notes: &[Note], min_gap: f64) -> Vec<TimeRange> {
    let sorted = sorted_by_start(notes);

    sorted
        .windows(2)
        .filter(|pair| pair[1].start - pair[0].start >= min_gap)
        .map(|pair| TimeRange::new(pair[0].start, pair[1].start))
        .collect()
}

/// Find regions of continuous playing
///
/// Consecutive onsets at most `max_silence` apart belong to the same region.
/// A region spans its first to its last onset; regions shorter than
/// `min_duration` are discarded.
pub fn detect_regions(notes: &[Note], max_silence: f64, min_duration: f64) -> Vec<TimeRange> {
    let sorted = sorted_by_start(notes);
    let mut regions = Vec::new();

    let mut onsets = sorted.iter().map(|n| n.start);
    let Some(first) = onsets.next() else {
        return regions;
    };

    let mut current = TimeRange::new(first, first);
    for onset in onsets {
        if onset - current.end > max_silence {
            regions.push(current);
            current = TimeRange::new(onset, onset);
        } else {
            current.end = onset;
        }
    }
    regions.push(current);

    regions.retain(|r| r.duration() >= min_duration);
    regions
}
