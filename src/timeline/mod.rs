//! Audio Timeline Editor
//!
//! Cut, insert-silence and removal of time ranges over multi-channel PCM:
//! - `ops`: pure transforms on decoded buffers
//! - `editor`: decode → transform → encode over byte blobs
//! - `range`: time ranges and their validation

pub mod editor;
pub mod ops;
pub mod range;

pub use editor::TimelineEditor;
pub use ops::{cut, insert_silence, remove_slice, remove_slices};
pub use range::{total_duration, validate_ordered, TimeRange};
