//! Note/Audio Aligner
//!
//! Detects idle gaps in a recorded performance and excises them from the note
//! list and the paired audio together.

pub mod aligner;
pub mod breaks;
pub mod note;

pub use aligner::{cut_note_breaks, shift_notes, AlignedRecording, Aligner};
pub use breaks::{detect_breaks, detect_regions};
pub use note::{load_notes, save_notes, sorted_by_start, Note};
pub use crate::timeline::range::TimeRange;
