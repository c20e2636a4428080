//! Practice Edit - timeline editing for recorded music practice
//!
//! Cuts, pads and trims recorded practice sessions with sample accuracy while
//! keeping the played notes aligned with the edited audio.
//!
//! # Architecture
//!
//! - `codec`: canonical WAV encoding plus an injectable decoding capability
//! - `timeline`: cut / insert-silence / remove transforms over decoded audio
//! - `alignment`: break detection and lockstep note + audio editing
//! - `tempo`: tempo estimation from note onsets

pub mod alignment;
#[cfg(feature = "async-bridge")]
pub mod bridge;
pub mod cli;
pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod tempo;
pub mod timeline;

pub use error::{EditError, Result};
