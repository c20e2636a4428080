//! WAV Codec
//!
//! Encoding is implemented here; decoding is an injected capability
//! (`AudioDecoder`) with a hound-backed default.

pub mod decoder;
pub mod encoder;
pub mod header;

pub use decoder::{AudioDecoder, WavDecoder};
pub use encoder::{encode, encode_channels};
pub use header::{WavFormat, WavHeader, WAV_HEADER_LEN};
