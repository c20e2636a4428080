//! Audio decoding capability
//!
//! Decoding is a host concern: the editor only needs something that turns a
//! byte blob into an [`AudioBuffer`]. [`WavDecoder`] is the built-in
//! implementation backed by `hound`; tests and embedders can supply their own.

use std::io::Cursor;

use hound::{SampleFormat, WavReader};
use tracing::debug;

use crate::engine::buffer::AudioBuffer;
use crate::error::{EditError, Result};

/// Turns encoded audio bytes into decoded, de-interleaved samples
///
/// Implementations must acquire any decoding context per call and release it
/// before returning, on both the success and the failure path.
pub trait AudioDecoder {
    /// Decode a complete encoded blob
    ///
    /// # Errors
    /// * `DecodeFailure` - If the bytes are corrupt or in an unsupported format
    fn decode(&self, bytes: &[u8]) -> Result<AudioBuffer>;
}

impl<F> AudioDecoder for F
where
    F: Fn(&[u8]) -> Result<AudioBuffer>,
{
    fn decode(&self, bytes: &[u8]) -> Result<AudioBuffer> {
        self(bytes)
    }
}

/// Decoder for RIFF/WAVE data (8/16/24/32-bit integer and 32-bit float)
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

impl WavDecoder {
    pub fn new() -> Self {
        WavDecoder
    }
}

impl AudioDecoder for WavDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AudioBuffer> {
        // The reader borrows `bytes` and is dropped when this call returns
        let reader = WavReader::new(Cursor::new(bytes)).map_err(|e| EditError::DecodeFailure {
            reason: format!("Failed to parse WAV data: {}", e),
            source: Some(Box::new(e)),
        })?;

        let spec = reader.spec();
        let channels = spec.channels as usize;

        let interleaved = read_samples_as_f32(reader, spec.bits_per_sample, spec.sample_format)?;
        let buffer = AudioBuffer::from_interleaved(&interleaved, channels, spec.sample_rate)
            .map_err(|e| EditError::DecodeFailure {
                reason: format!("Invalid sample data: {}", e),
                source: Some(Box::new(e)),
            })?;

        debug!(
            channels,
            frames = buffer.len(),
            sample_rate = spec.sample_rate,
            "decoded wav"
        );

        Ok(buffer)
    }
}

/// Read samples from WAV reader and convert to f32
fn read_samples_as_f32<R: std::io::Read>(
    mut reader: WavReader<R>,
    bits_per_sample: u16,
    sample_format: SampleFormat,
) -> Result<Vec<f32>> {
    fn failed(bits: u16) -> impl Fn(hound::Error) -> EditError {
        move |e| EditError::DecodeFailure {
            reason: format!("Failed to read {}-bit samples: {}", bits, e),
            source: Some(Box::new(e)),
        }
    }

    match (sample_format, bits_per_sample) {
        (SampleFormat::Float, _) => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(failed(bits_per_sample)),
        (SampleFormat::Int, 8) => reader
            .samples::<i8>()
            .map(|s| s.map(|v| v as f32 / 128.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(failed(8)),
        (SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|v| v as f32 / 32768.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(failed(16)),
        // 24-bit stored as i32 in hound
        (SampleFormat::Int, 24) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 8388608.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(failed(24)),
        (SampleFormat::Int, 32) => reader
            .samples::<i32>()
            .map(|s| s.map(|v| v as f32 / 2147483648.0))
            .collect::<std::result::Result<Vec<f32>, _>>()
            .map_err(failed(32)),
        (SampleFormat::Int, bits) => Err(EditError::DecodeFailure {
            reason: format!("{}-bit integer audio is not supported", bits),
            source: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn write_with_hound(spec: WavSpec, samples: &[i32]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_24bit_stereo() {
        let spec = WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 24,
            sample_format: SampleFormat::Int,
        };
        let bytes = write_with_hound(spec, &[4194304, -4194304, 0, 8388607]);

        let buffer = WavDecoder::new().decode(&bytes).unwrap();
        assert_eq!(buffer.channels(), 2);
        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.sample_rate(), 44100);
        assert!((buffer.channel(0)[0] - 0.5).abs() < 1e-6);
        assert!((buffer.channel(1)[0] + 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_decode_keeps_extra_channels() {
        let spec = WavSpec {
            channels: 4,
            sample_rate: 8000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let bytes = write_with_hound(spec, &[0, 1, 2, 3, 4, 5, 6, 7]);

        let buffer = WavDecoder::new().decode(&bytes).unwrap();
        assert_eq!(buffer.channels(), 4);
        assert_eq!(buffer.len(), 2);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = WavDecoder::new().decode(b"definitely not a riff file");
        match result.unwrap_err() {
            EditError::DecodeFailure { source, .. } => assert!(source.is_some()),
            other => panic!("Expected DecodeFailure, got: {:?}", other),
        }
    }

    #[test]
    fn test_closure_as_decoder() {
        let decoder = |_: &[u8]| -> Result<AudioBuffer> { Ok(AudioBuffer::silent(1, 3, 10)) };
        let buffer = decoder.decode(&[]).unwrap();
        assert_eq!(buffer.len(), 3);
    }
}
