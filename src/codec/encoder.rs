//! WAV encoding
//!
//! Serializes de-interleaved float PCM into a canonical WAV byte stream:
//! a 44-byte header followed by interleaved little-endian samples.

use tracing::debug;

use crate::codec::header::{WavFormat, WavHeader, WAV_HEADER_LEN};
use crate::engine::buffer::{AudioBuffer, ChannelLayout};
use crate::error::{EditError, Result};

/// Encode an audio buffer as WAV bytes
///
/// # Errors
/// * `UnsupportedChannelCount` - If the buffer is not mono or stereo
/// * `UnsupportedSampleRate` - If the byte rate does not fit its header field
/// * `OutputTooLarge` - If the data does not fit the WAV size fields
pub fn encode(buffer: &AudioBuffer, format: WavFormat) -> Result<Vec<u8>> {
    let channels: Vec<&[f32]> = buffer.iter_channels().collect();
    encode_channels(&channels, buffer.sample_rate(), format)
}

/// Encode per-channel sample slices as WAV bytes
///
/// Stereo input is interleaved left/right per frame; mono is written as-is.
/// Channel counts other than 1 or 2 are rejected rather than truncated.
///
/// # Errors
/// * `UnsupportedChannelCount` - If `channels` is empty or has more than two entries
/// * `MismatchedChannelLengths` - If the channels differ in length
/// * `OutputTooLarge` - If the data does not fit the WAV size fields
pub fn encode_channels(channels: &[&[f32]], sample_rate: u32, format: WavFormat) -> Result<Vec<u8>> {
    let layout = ChannelLayout::from_count(channels.len()).ok_or(
        EditError::UnsupportedChannelCount {
            channels: channels.len(),
        },
    )?;

    let num_frames = channels[0].len();
    if let Some((channel, data)) = channels
        .iter()
        .enumerate()
        .find(|(_, data)| data.len() != num_frames)
    {
        return Err(EditError::MismatchedChannelLengths {
            channel,
            expected: num_frames,
            actual: data.len(),
        });
    }

    let header = WavHeader::new(format, layout, sample_rate, num_frames)?;

    let mut out = Vec::with_capacity(WAV_HEADER_LEN + header.data_size() as usize);
    out.extend_from_slice(&header.to_bytes());

    match layout {
        ChannelLayout::Mono => {
            for &sample in channels[0] {
                format.write_sample(&mut out, sample);
            }
        }
        ChannelLayout::Stereo => {
            for (&left, &right) in channels[0].iter().zip(channels[1]) {
                format.write_sample(&mut out, left);
                format.write_sample(&mut out, right);
            }
        }
    }

    debug!(
        channels = channels.len(),
        frames = num_frames,
        sample_rate,
        ?format,
        bytes = out.len(),
        "encoded wav"
    );

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{AudioDecoder, WavDecoder};
    use crate::engine::io::{generate_ramp, generate_stereo_test_tone, generate_test_tone};
    use approx::assert_abs_diff_eq;
    use test_case::test_case;

    #[test]
    fn test_stereo_interleaving() {
        let left = [0.5_f32, 0.25];
        let right = [-0.5_f32, -0.25];
        let bytes = encode_channels(&[&left, &right], 48000, WavFormat::Float32).unwrap();

        assert_eq!(bytes.len(), WAV_HEADER_LEN + 16);
        let data: Vec<f32> = bytes[WAV_HEADER_LEN..]
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        assert_eq!(data, vec![0.5, -0.5, 0.25, -0.25]);
    }

    #[test]
    fn test_mono_not_interleaved() {
        let mono = [0.1_f32, 0.2, 0.3];
        let bytes = encode_channels(&[&mono], 8000, WavFormat::Float32).unwrap();
        assert_eq!(bytes.len(), WAV_HEADER_LEN + 12);
        assert_eq!(&bytes[WAV_HEADER_LEN..WAV_HEADER_LEN + 4], &0.1_f32.to_le_bytes());
    }

    #[test_case(0 ; "no channels")]
    #[test_case(3 ; "three channels")]
    #[test_case(6 ; "surround")]
    fn test_unsupported_channel_counts_rejected(count: usize) {
        let data = vec![0.0_f32; 4];
        let channels: Vec<&[f32]> = (0..count).map(|_| data.as_slice()).collect();

        match encode_channels(&channels, 48000, WavFormat::Float32).unwrap_err() {
            EditError::UnsupportedChannelCount { channels } => assert_eq!(channels, count),
            other => panic!("Expected UnsupportedChannelCount, got: {:?}", other),
        }
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let left = [0.0_f32; 4];
        let right = [0.0_f32; 3];
        let result = encode_channels(&[&left, &right], 48000, WavFormat::Float32);
        assert!(matches!(
            result,
            Err(EditError::MismatchedChannelLengths { channel: 1, .. })
        ));
    }

    #[test_case(1, 48000 ; "mono 48k")]
    #[test_case(2, 48000 ; "stereo 48k")]
    #[test_case(1, 44100 ; "mono 44k1")]
    #[test_case(2, 22050 ; "stereo 22k05")]
    fn test_float_round_trip(channels: usize, sample_rate: u32) {
        let original = generate_ramp(channels, 1000, sample_rate);
        let bytes = encode(&original, WavFormat::Float32).unwrap();
        let decoded = WavDecoder::new().decode(&bytes).unwrap();

        assert_eq!(decoded.channels(), original.channels());
        assert_eq!(decoded.sample_rate(), sample_rate);
        assert_eq!(decoded.len(), original.len());
        assert_abs_diff_eq!(decoded.duration_secs(), original.duration_secs());

        for ch in 0..channels {
            for (a, b) in original.channel(ch).iter().zip(decoded.channel(ch)) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_int16_round_trip_within_quantization() {
        let original = generate_stereo_test_tone(440.0, 660.0, 0.1, 48000);
        let bytes = encode(&original, WavFormat::Int16).unwrap();
        let decoded = WavDecoder::new().decode(&bytes).unwrap();

        assert_eq!(decoded.len(), original.len());
        for ch in 0..2 {
            for (a, b) in original.channel(ch).iter().zip(decoded.channel(ch)) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn test_sample_rate_written_from_buffer() {
        let tone = generate_test_tone(440.0, 0.05, 16000);
        let bytes = encode(&tone, WavFormat::Float32).unwrap();
        let rate = u32::from_le_bytes([bytes[24], bytes[25], bytes[26], bytes[27]]);
        assert_eq!(rate, 16000);
    }

    #[test]
    fn test_extreme_sample_rate_rejected() {
        let buffer = AudioBuffer::silent(2, 1, 600_000_000);
        let err = encode(&buffer, WavFormat::Float32).unwrap_err();
        assert_eq!(err.error_code(), "UNSUPPORTED_SAMPLE_RATE");
    }

    #[test]
    fn test_empty_buffer_encodes_header_only() {
        let empty = AudioBuffer::silent(2, 0, 48000);
        let bytes = encode(&empty, WavFormat::Float32).unwrap();
        assert_eq!(bytes.len(), WAV_HEADER_LEN);

        let decoded = WavDecoder::new().decode(&bytes).unwrap();
        assert!(decoded.is_empty());
    }
}
