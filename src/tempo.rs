//! Tempo estimation from note onsets
//!
//! Looks at the loudest quarter of the notes (accented beats), converts the
//! gaps between their onsets to BPM and keeps plausible values. With a target
//! tempo, candidates are folded by octaves into ±20% of the target.

use serde::Serialize;

use crate::alignment::note::{sorted_by_start, Note};

/// Lowest plausible tempo (exclusive)
pub const MIN_BPM: f64 = 30.0;

/// Highest plausible tempo (exclusive)
pub const MAX_BPM: f64 = 240.0;

/// Tolerance around a target tempo as a fraction of it
const TARGET_TOLERANCE: f64 = 0.2;

/// Result of a tempo estimate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TempoEstimate {
    /// Every per-interval BPM candidate that survived filtering, in onset order
    pub candidates: Vec<f64>,
    /// Median of `candidates`, if any
    pub median: Option<f64>,
}

impl TempoEstimate {
    fn from_candidates(candidates: Vec<f64>) -> Self {
        let median = median(&candidates);
        Self { candidates, median }
    }
}

/// Estimate BPM candidates from played notes
///
/// Notes without a `velocity` field count as velocity 0.
pub fn estimate_bpm(notes: &[Note], target_bpm: Option<f64>) -> TempoEstimate {
    let mut loudest = notes.to_vec();
    loudest.sort_by(|a, b| {
        b.velocity()
            .unwrap_or(0.0)
            .total_cmp(&a.velocity().unwrap_or(0.0))
    });
    loudest.truncate(notes.len() / 4);

    let onsets: Vec<f64> = sorted_by_start(&loudest).iter().map(|n| n.start).collect();

    let bpms = onsets
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|&delta| delta > 0.0)
        .map(|delta| round_to_tenth(60.0 / delta))
        .filter(|&bpm| bpm > MIN_BPM && bpm < MAX_BPM);

    let candidates: Vec<f64> = match target_bpm {
        Some(target) if target > 0.0 => {
            let lower = (1.0 - TARGET_TOLERANCE) * target;
            let upper = (1.0 + TARGET_TOLERANCE) * target;
            bpms.map(|bpm| fold_into(bpm, lower, upper))
                .filter(|&bpm| bpm > lower && bpm < upper)
                .collect()
        }
        _ => bpms.collect(),
    };

    TempoEstimate::from_candidates(candidates)
}

/// Double or halve `bpm` until it is no longer outside `[lower, upper]`
fn fold_into(mut bpm: f64, lower: f64, upper: f64) -> f64 {
    while bpm < lower {
        bpm *= 2.0;
    }
    while bpm > upper {
        bpm /= 2.0;
    }
    bpm
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}
