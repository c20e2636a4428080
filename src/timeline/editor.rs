//! Blob-level timeline editing
//!
//! Decodes encoded audio with an injected [`AudioDecoder`], applies one of the
//! transforms in [`crate::timeline::ops`] and re-encodes the result as WAV.

use tracing::info;

use crate::codec::{encode, AudioDecoder, WavDecoder, WavFormat};
use crate::engine::buffer::{AudioBuffer, ChannelLayout};
use crate::error::{EditError, Result};
use crate::timeline::ops;
use crate::timeline::range::TimeRange;

/// Decode → transform → encode pipeline for audio blobs
#[derive(Debug, Clone)]
pub struct TimelineEditor<D = WavDecoder> {
    decoder: D,
    format: WavFormat,
}

impl Default for TimelineEditor<WavDecoder> {
    fn default() -> Self {
        TimelineEditor::new(WavDecoder::new())
    }
}

impl<D: AudioDecoder> TimelineEditor<D> {
    /// Create an editor producing 32-bit float WAV output
    pub fn new(decoder: D) -> Self {
        Self {
            decoder,
            format: WavFormat::Float32,
        }
    }

    /// Set the sample encoding of the produced WAV bytes
    pub fn with_format(mut self, format: WavFormat) -> Self {
        self.format = format;
        self
    }

    /// Decode a blob and check it can be re-encoded
    ///
    /// # Errors
    /// * `DecodeFailure` - If the decoder rejects the bytes
    /// * `UnsupportedChannelCount` - If the audio is not mono or stereo
    pub fn decode(&self, bytes: &[u8]) -> Result<AudioBuffer> {
        let audio = self.decoder.decode(bytes)?;
        if ChannelLayout::from_count(audio.channels()).is_none() {
            return Err(EditError::UnsupportedChannelCount {
                channels: audio.channels(),
            });
        }
        Ok(audio)
    }

    /// Encode a buffer in the editor's output format
    pub fn encode(&self, audio: &AudioBuffer) -> Result<Vec<u8>> {
        encode(audio, self.format)
    }

    /// Extract `[start, end)` as a new WAV blob
    pub fn cut(&self, bytes: &[u8], start: f64, end: f64) -> Result<Vec<u8>> {
        self.apply("cut", bytes, |audio| ops::cut(audio, start, end))
    }

    /// Insert silence over `[start, end)`, shifting later audio
    pub fn insert_silence(&self, bytes: &[u8], start: f64, end: f64) -> Result<Vec<u8>> {
        self.apply("insert_silence", bytes, |audio| {
            ops::insert_silence(audio, start, end)
        })
    }

    /// Remove `[start, end)`, shifting later audio earlier
    pub fn remove_slice(&self, bytes: &[u8], start: f64, end: f64) -> Result<Vec<u8>> {
        self.apply("remove_slice", bytes, |audio| {
            ops::remove_slice(audio, start, end)
        })
    }

    /// Remove several ascending, non-overlapping ranges in one pass
    pub fn remove_slices(&self, bytes: &[u8], ranges: &[TimeRange]) -> Result<Vec<u8>> {
        self.apply("remove_slices", bytes, |audio| {
            ops::remove_slices(audio, ranges)
        })
    }

    fn apply<F>(&self, operation: &str, bytes: &[u8], transform: F) -> Result<Vec<u8>>
    where
        F: FnOnce(&AudioBuffer) -> Result<AudioBuffer>,
    {
        let audio = self.decode(bytes)?;
        let edited = transform(&audio)?;
        let encoded = self.encode(&edited)?;

        info!(
            operation,
            channels = edited.channels(),
            input_secs = audio.duration_secs(),
            output_secs = edited.duration_secs(),
            "timeline edit complete"
        );

        Ok(encoded)
    }
}
