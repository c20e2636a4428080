//! Audio Buffer Management
//!
//! Provides the decoded, de-interleaved audio type that every timeline edit
//! consumes and produces.

use num_traits::ToPrimitive;

use crate::error::{EditError, Result};

// ============================================================================
// Channel Layout
// ============================================================================

/// Channel configurations the WAV encoder can write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Single channel (mono)
    Mono,
    /// Two channels (stereo: left, right)
    Stereo,
}

impl ChannelLayout {
    /// Returns the number of channels for this layout
    pub fn num_channels(&self) -> usize {
        match self {
            ChannelLayout::Mono => 1,
            ChannelLayout::Stereo => 2,
        }
    }

    /// Create a ChannelLayout from a channel count
    pub fn from_count(count: usize) -> Option<Self> {
        match count {
            1 => Some(ChannelLayout::Mono),
            2 => Some(ChannelLayout::Stereo),
            _ => None,
        }
    }
}

// ============================================================================
// Audio Buffer
// ============================================================================

/// Decoded multi-channel PCM audio
///
/// Stores audio as non-interleaved 32-bit floating point samples in [-1, 1].
/// Each channel is a separate Vec<f32> and all channels have the same length.
///
/// # Example
/// ```
/// use practice_edit::engine::buffer::AudioBuffer;
///
/// // One second of stereo silence at 48kHz
/// let buffer = AudioBuffer::silent(2, 48000, 48000);
/// assert_eq!(buffer.channels(), 2);
/// assert_eq!(buffer.len(), 48000);
/// assert_eq!(buffer.duration_secs(), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Sample data: outer Vec is channels, inner Vec is samples
    samples: Vec<Vec<f32>>,
    /// Sample rate in Hz
    sample_rate: u32,
}

impl AudioBuffer {
    /// Create a zero-filled buffer
    pub fn silent(num_channels: usize, num_frames: usize, sample_rate: u32) -> Self {
        Self {
            samples: vec![vec![0.0_f32; num_frames]; num_channels],
            sample_rate,
        }
    }

    /// Create a buffer from per-channel sample vectors
    ///
    /// # Errors
    /// * `MismatchedChannelLengths` - If channels differ in length
    pub fn from_channels(samples: Vec<Vec<f32>>, sample_rate: u32) -> Result<Self> {
        if let Some(first) = samples.first() {
            let expected = first.len();
            if let Some((channel, data)) = samples
                .iter()
                .enumerate()
                .find(|(_, data)| data.len() != expected)
            {
                return Err(EditError::MismatchedChannelLengths {
                    channel,
                    expected,
                    actual: data.len(),
                });
            }
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create an audio buffer from interleaved sample data
    ///
    /// # Arguments
    /// * `interleaved` - Interleaved sample data (L, R, L, R, ... for stereo)
    /// * `num_channels` - Number of interleaved channels
    /// * `sample_rate` - Sample rate in Hz
    ///
    /// # Errors
    /// * `UnsupportedChannelCount` - If `num_channels` is zero
    /// * `ProcessingError` - If the data does not divide into whole frames
    pub fn from_interleaved(
        interleaved: &[f32],
        num_channels: usize,
        sample_rate: u32,
    ) -> Result<Self> {
        if num_channels == 0 {
            return Err(EditError::UnsupportedChannelCount { channels: 0 });
        }

        if interleaved.len() % num_channels != 0 {
            return Err(EditError::ProcessingError {
                reason: format!(
                    "interleaved length {} is not a multiple of {} channels",
                    interleaved.len(),
                    num_channels
                ),
            });
        }

        let num_frames = interleaved.len() / num_channels;
        let mut samples = vec![Vec::with_capacity(num_frames); num_channels];

        for frame in interleaved.chunks_exact(num_channels) {
            for (ch, &sample) in frame.iter().enumerate() {
                samples[ch].push(sample);
            }
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Get the number of channels
    #[inline]
    pub fn channels(&self) -> usize {
        self.samples.len()
    }

    /// Get the number of frames (samples per channel)
    #[inline]
    pub fn len(&self) -> usize {
        self.samples.first().map(|ch| ch.len()).unwrap_or(0)
    }

    /// Check if the buffer holds no frames
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample rate in Hz
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Get the duration in seconds
    #[inline]
    pub fn duration_secs(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f64 / self.sample_rate as f64
    }

    /// Get a reference to a channel's samples
    ///
    /// # Panics
    /// Panics if channel index is out of bounds
    #[inline]
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.samples[index]
    }

    /// Get a mutable reference to a channel's samples
    ///
    /// # Panics
    /// Panics if channel index is out of bounds
    #[inline]
    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.samples[index]
    }

    /// Iterate over all channels in order
    pub fn iter_channels(&self) -> impl Iterator<Item = &[f32]> {
        self.samples.iter().map(Vec::as_slice)
    }

    /// Convert a time in seconds to the nearest frame index
    ///
    /// Equivalent to `frames × seconds / duration`, computed from the sample
    /// rate so it stays defined for empty buffers and for times past the end.
    /// Rounds to the nearest frame so adjacent edits never leave a one-frame
    /// gap. Returns None for negative or non-finite times.
    pub fn frame_at(&self, seconds: f64) -> Option<usize> {
        if !seconds.is_finite() || seconds < 0.0 {
            return None;
        }
        if self.sample_rate == 0 {
            return (seconds == 0.0).then_some(0);
        }
        (seconds * self.sample_rate as f64).round().to_usize()
    }
}

// ============================================================================
// Tests
// ============================================================================
