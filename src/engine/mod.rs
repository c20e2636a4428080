//! Audio Engine Module
//!
//! Core audio types and file helpers:
//! - Decoded audio buffer
//! - File I/O operations
//! - Test signal generators

pub mod buffer;
pub mod io;

pub use buffer::{AudioBuffer, ChannelLayout};
pub use io::{
    generate_ramp, generate_stereo_test_tone, generate_test_tone, import_audio, read_audio_bytes,
    write_wav_file,
};
