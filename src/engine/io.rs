//! Audio file I/O for practice-edit
//!
//! Thin file-system helpers around the codec. The editing core works on
//! in-memory byte blobs; these functions are only used at the edges (CLI,
//! batch processing, tests).

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::codec::AudioDecoder;
use crate::engine::buffer::AudioBuffer;
use crate::error::{EditError, Result};

/// Read an audio file into memory as raw bytes
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `Io` - If the file cannot be read
pub fn read_audio_bytes(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(EditError::FileNotFound {
            path: path.display().to_string(),
            source: None,
        });
    }

    let bytes = fs::read(path)?;
    debug!(path = %path.display(), bytes = bytes.len(), "read audio file");
    Ok(bytes)
}

/// Read and decode an audio file with the given decoder
///
/// # Errors
/// * `FileNotFound` - If the file does not exist
/// * `DecodeFailure` - If the decoder rejects the file contents
pub fn import_audio<D: AudioDecoder + ?Sized>(path: &Path, decoder: &D) -> Result<AudioBuffer> {
    let bytes = read_audio_bytes(path)?;
    decoder.decode(&bytes)
}

/// Write encoded WAV bytes to a file, creating parent directories as needed
pub fn write_wav_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote wav file");
    Ok(())
}

/// Generate a test tone (sine wave)
///
/// Creates a mono AudioBuffer containing a sine wave at the specified frequency.
///
/// # Arguments
/// * `frequency` - Frequency of the sine wave in Hz
/// * `duration_secs` - Duration of the tone in seconds
/// * `sample_rate` - Sample rate in Hz
pub fn generate_test_tone(frequency: f32, duration_secs: f32, sample_rate: u32) -> AudioBuffer {
    let num_frames = (duration_secs * sample_rate as f32) as usize;
    let mut buffer = AudioBuffer::silent(1, num_frames, sample_rate);
    fill_sine(buffer.channel_mut(0), frequency, sample_rate);
    buffer
}

/// Generate a stereo test tone with different frequencies per channel
pub fn generate_stereo_test_tone(
    freq_left: f32,
    freq_right: f32,
    duration_secs: f32,
    sample_rate: u32,
) -> AudioBuffer {
    let num_frames = (duration_secs * sample_rate as f32) as usize;
    let mut buffer = AudioBuffer::silent(2, num_frames, sample_rate);
    fill_sine(buffer.channel_mut(0), freq_left, sample_rate);
    fill_sine(buffer.channel_mut(1), freq_right, sample_rate);
    buffer
}

/// Generate a buffer whose samples encode their own frame index
///
/// Channel `c` at frame `i` holds `(i + 1) / len`, negated for odd channels,
/// so every sample is distinct and any misplaced frame is detectable.
pub fn generate_ramp(num_channels: usize, num_frames: usize, sample_rate: u32) -> AudioBuffer {
    let mut buffer = AudioBuffer::silent(num_channels, num_frames, sample_rate);
    let scale = num_frames.max(1) as f32;

    for c in 0..num_channels {
        let sign = if c % 2 == 0 { 1.0 } else { -1.0 };
        for (i, sample) in buffer.channel_mut(c).iter_mut().enumerate() {
            *sample = sign * (i + 1) as f32 / scale;
        }
    }

    buffer
}

fn fill_sine(channel: &mut [f32], frequency: f32, sample_rate: u32) {
    let angular_freq = 2.0 * std::f32::consts::PI * frequency / sample_rate as f32;
    for (i, sample) in channel.iter_mut().enumerate() {
        *sample = (angular_freq * i as f32).sin() * 0.5;
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{encode, WavDecoder, WavFormat};
    use tempfile::tempdir;

    #[test]
    fn test_generate_test_tone() {
        let buffer = generate_test_tone(440.0, 1.0, 48000);

        assert_eq!(buffer.len(), 48000);
        assert_eq!(buffer.channels(), 1);

        // Half a cycle in, the sine is back near zero
        let half_cycle = (48000.0 / 440.0 / 2.0) as usize;
        assert!(buffer.channel(0)[half_cycle].abs() < 0.05);
    }

    #[test]
    fn test_generate_stereo_test_tone() {
        let buffer = generate_stereo_test_tone(440.0, 880.0, 0.5, 48000);

        assert_eq!(buffer.len(), 24000);
        assert_eq!(buffer.channels(), 2);
        assert!((buffer.channel(0)[100] - buffer.channel(1)[100]).abs() > 0.01);
    }

    #[test]
    fn test_generate_ramp_distinct() {
        let buffer = generate_ramp(2, 4, 4);
        assert_eq!(buffer.channel(0), &[0.25, 0.5, 0.75, 1.0]);
        assert_eq!(buffer.channel(1), &[-0.25, -0.5, -0.75, -1.0]);
    }

    #[test]
    fn test_write_then_import() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("tone.wav");

        let original = generate_stereo_test_tone(440.0, 660.0, 0.25, 44100);
        let bytes = encode(&original, WavFormat::Float32).unwrap();
        write_wav_file(&path, &bytes).unwrap();

        let imported = import_audio(&path, &WavDecoder::new()).unwrap();
        assert_eq!(imported, original);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_audio(Path::new("/nonexistent/path/audio.wav"), &WavDecoder::new());

        match result.unwrap_err() {
            EditError::FileNotFound { path, .. } => {
                assert!(path.contains("nonexistent"));
            }
            other => panic!("Expected FileNotFound error, got: {:?}", other),
        }
    }
}
