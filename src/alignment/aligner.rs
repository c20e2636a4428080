//! Note/audio alignment
//!
//! Removes time from a recording and its note list together so note times
//! keep pointing at the right place in the edited audio.

use tracing::{info, warn};

use crate::alignment::breaks::detect_breaks;
use crate::alignment::note::{sorted_by_start, Note};
use crate::codec::{AudioDecoder, WavDecoder};
use crate::error::Result;
use crate::timeline::range::{total_duration, validate_ordered, TimeRange};
use crate::timeline::TimelineEditor;

/// A note list together with the audio it was recorded against
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRecording {
    pub notes: Vec<Note>,
    /// WAV bytes
    pub audio: Vec<u8>,
}

/// Shift every note earlier by `seconds`
///
/// Notes that started before the cut point end up with negative times; they
/// are kept, not clamped. Input order is preserved.
pub fn shift_notes(notes: &[Note], seconds: f64) -> Vec<Note> {
    notes.iter().map(|n| n.shifted_earlier(seconds)).collect()
}

/// Apply break removal to a note list
///
/// Returns one flat list sorted by start. Notes at or before the first break's
/// start are unchanged; every later note moves earlier by the total length of
/// the breaks that end at or before its start. A note starting exactly at a
/// break's end belongs to the segment after that break. Notes starting strictly
/// inside a break have no place in the edited timeline and are dropped.
///
/// # Errors
/// * `InvalidRange` / `UnsortedOrOverlappingRanges` - If `breaks` is malformed
pub fn cut_note_breaks(notes: &[Note], breaks: &[TimeRange]) -> Result<Vec<Note>> {
    validate_ordered(breaks)?;

    let mut kept = Vec::with_capacity(notes.len());
    let mut dropped = 0usize;

    for note in sorted_by_start(notes) {
        match removed_before(note.start, breaks) {
            Some(shift) => kept.push(note.shifted_earlier(shift)),
            None => dropped += 1,
        }
    }

    if dropped > 0 {
        warn!(dropped, "notes inside removed breaks were discarded");
    }

    Ok(kept)
}

/// Total break time removed before `time`, or None if `time` falls inside a break
fn removed_before(time: f64, breaks: &[TimeRange]) -> Option<f64> {
    let mut removed = 0.0;
    for range in breaks {
        if time <= range.start {
            return Some(removed);
        }
        if time < range.end {
            return None;
        }
        removed += range.duration();
    }
    Some(removed)
}

/// Edits notes and audio in lockstep
#[derive(Debug, Clone)]
pub struct Aligner<D = WavDecoder> {
    editor: TimelineEditor<D>,
}

impl Default for Aligner<WavDecoder> {
    fn default() -> Self {
        Aligner::new(TimelineEditor::default())
    }
}

impl<D: AudioDecoder> Aligner<D> {
    pub fn new(editor: TimelineEditor<D>) -> Self {
        Self { editor }
    }

    /// The editor used for the audio side
    pub fn editor(&self) -> &TimelineEditor<D> {
        &self.editor
    }

    /// Cut `seconds` from the start of both notes and audio
    ///
    /// # Errors
    /// * `InvalidRange` - If `seconds` is negative or longer than the recording
    /// * `DecodeFailure` - If the audio cannot be decoded
    pub fn cut_start(&self, notes: &[Note], audio: &[u8], seconds: f64) -> Result<AlignedRecording> {
        let audio = self.editor.remove_slice(audio, 0.0, seconds)?;
        let notes = shift_notes(notes, seconds);

        info!(seconds, notes = notes.len(), "cut recording start");
        Ok(AlignedRecording { notes, audio })
    }

    /// Remove `breaks` from both notes and audio
    ///
    /// `breaks` must be ascending and non-overlapping. The audio side removes
    /// all breaks in one pass; the note side returns a single flat list.
    ///
    /// # Errors
    /// * `InvalidRange` - If a break is malformed or extends past the recording
    /// * `UnsortedOrOverlappingRanges` - If breaks are out of order or overlap
    /// * `DecodeFailure` - If the audio cannot be decoded
    pub fn cut_breaks(
        &self,
        notes: &[Note],
        audio: &[u8],
        breaks: &[TimeRange],
    ) -> Result<AlignedRecording> {
        let notes = cut_note_breaks(notes, breaks)?;
        let audio = self.editor.remove_slices(audio, breaks)?;

        info!(
            breaks = breaks.len(),
            removed_secs = total_duration(breaks),
            notes = notes.len(),
            "cut recording breaks"
        );
        Ok(AlignedRecording { notes, audio })
    }

    /// Detect breaks of at least `min_gap` seconds and remove them
    pub fn trim_breaks(&self, notes: &[Note], audio: &[u8], min_gap: f64) -> Result<AlignedRecording> {
        let breaks = detect_breaks(notes, min_gap);
        self.cut_breaks(notes, audio, &breaks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode, WavFormat};
    use crate::engine::buffer::AudioBuffer;
    use crate::engine::io::generate_ramp;
    use approx::assert_abs_diff_eq;
    use pretty_assertions::assert_eq;

    fn starts(notes: &[Note]) -> Vec<f64> {
        notes.iter().map(|n| n.start).collect()
    }

    fn aligner() -> Aligner {
        Aligner::default()
    }

    fn recording(seconds: usize) -> (AudioBuffer, Vec<u8>) {
        let buffer = generate_ramp(2, seconds * 100, 100);
        let bytes = encode(&buffer, WavFormat::Float32).unwrap();
        (buffer, bytes)
    }

    #[test]
    fn test_cut_note_breaks_flattens_and_shifts() {
        let notes = vec![Note::new(0.0, 0.5), Note::new(1.0, 1.5), Note::new(5.0, 5.5)];
        let out = cut_note_breaks(&notes, &[TimeRange::new(1.5, 5.0)]).unwrap();

        assert_eq!(starts(&out), vec![0.0, 1.0, 1.5]);
        assert_abs_diff_eq!(out[2].end, 2.0);
    }

    #[test]
    fn test_cut_note_breaks_multiple_segments() {
        let notes = vec![
            Note::new(12.0, 12.5),
            Note::new(0.0, 0.5),
            Note::new(1.0, 1.2),
            Note::new(4.0, 4.5),
            Note::new(5.0, 5.2),
            Note::new(10.0, 10.1),
        ];
        let breaks = [TimeRange::new(1.0, 4.0), TimeRange::new(5.0, 10.0)];
        let out = cut_note_breaks(&notes, &breaks).unwrap();

        // 0 and 1 unshifted, 4 and 5 shifted by 3, 10 and 12 shifted by 8
        assert_eq!(starts(&out), vec![0.0, 1.0, 1.0, 2.0, 2.0, 4.0]);
    }

    #[test]
    fn test_notes_inside_break_dropped() {
        let notes = vec![Note::new(0.0, 0.5), Note::new(2.0, 2.5), Note::new(6.0, 6.5)];
        let out = cut_note_breaks(&notes, &[TimeRange::new(1.0, 5.0)]).unwrap();
        assert_eq!(starts(&out), vec![0.0, 2.0]);
    }

    #[test]
    fn test_cut_note_breaks_no_breaks_sorts_only() {
        let notes = vec![Note::new(3.0, 3.5), Note::new(1.0, 1.5)];
        let out = cut_note_breaks(&notes, &[]).unwrap();
        assert_eq!(starts(&out), vec![1.0, 3.0]);
    }

    #[test]
    fn test_cut_note_breaks_rejects_overlap() {
        let breaks = [TimeRange::new(1.0, 4.0), TimeRange::new(3.0, 6.0)];
        let err = cut_note_breaks(&[], &breaks).unwrap_err();
        assert_eq!(err.error_code(), "UNSORTED_OR_OVERLAPPING_RANGES");
    }

    #[test]
    fn test_shift_notes_allows_negative() {
        let notes = vec![Note::new(1.0, 2.5), Note::new(4.0, 4.5)];
        let out = shift_notes(&notes, 2.0);
        assert_eq!(starts(&out), vec![-1.0, 2.0]);
        assert_eq!(out[0].end, 0.5);
    }

    #[test]
    fn test_cut_start_shortens_audio() {
        let (buffer, bytes) = recording(10);
        let aligner = aligner();
        let notes = vec![Note::new(1.0, 1.5), Note::new(3.0, 3.5)];

        let out = aligner.cut_start(&notes, &bytes, 2.0).unwrap();
        let audio = aligner.editor().decode(&out.audio).unwrap();

        assert_eq!(starts(&out.notes), vec![-1.0, 1.0]);
        assert_eq!(audio.len(), 800);
        assert_eq!(audio.channel(0), &buffer.channel(0)[200..]);
    }

    #[test]
    fn test_cut_start_past_end_fails() {
        let (_, bytes) = recording(1);
        let err = aligner().cut_start(&[], &bytes, 2.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_RANGE");
    }

    #[test]
    fn test_trim_breaks_keeps_notes_on_audio() {
        let (buffer, bytes) = recording(10);
        let notes = vec![Note::new(0.5, 0.6), Note::new(1.0, 1.1), Note::new(6.0, 6.1)];

        let aligner = aligner();
        let out = aligner.trim_breaks(&notes, &bytes, 2.0).unwrap();
        let audio = aligner.editor().decode(&out.audio).unwrap();

        assert_eq!(starts(&out.notes), vec![0.5, 1.0, 1.0]);
        assert_eq!(audio.len(), 500);

        // The third note's onset now lands on the sample that was at 6.0s
        let frame = audio.frame_at(out.notes[2].start).unwrap();
        assert_eq!(audio.channel(1)[frame], buffer.channel(1)[600]);
    }
}
