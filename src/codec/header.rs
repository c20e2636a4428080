//! Canonical 44-byte RIFF/WAVE header
//!
//! The header is computed purely from buffer metadata and written through a
//! fixed-size buffer with an explicit write cursor.

use serde::{Deserialize, Serialize};

use crate::engine::buffer::ChannelLayout;
use crate::error::{EditError, Result};

/// Size of the canonical header in bytes
pub const WAV_HEADER_LEN: usize = 44;

/// Size of the `fmt ` subchunk body for plain PCM / IEEE float
const FMT_CHUNK_SIZE: u32 = 16;

/// Bytes of the RIFF chunk that precede the sample data, excluding the
/// 8-byte RIFF chunk header itself
const RIFF_OVERHEAD: u32 = (WAV_HEADER_LEN as u32) - 8;

/// Sample encoding written to the data chunk
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum WavFormat {
    /// 32-bit IEEE float (AudioFormat = 3)
    #[default]
    Float32,
    /// 16-bit signed integer PCM (AudioFormat = 1)
    Int16,
}

impl WavFormat {
    /// WAVE format tag stored in the `fmt ` chunk
    pub fn format_tag(&self) -> u16 {
        match self {
            WavFormat::Float32 => 3,
            WavFormat::Int16 => 1,
        }
    }

    /// Bytes per single-channel sample
    pub fn bytes_per_sample(&self) -> u16 {
        match self {
            WavFormat::Float32 => 4,
            WavFormat::Int16 => 2,
        }
    }

    /// Bits per single-channel sample
    pub fn bits_per_sample(&self) -> u16 {
        self.bytes_per_sample() * 8
    }

    /// Append one sample in this encoding, little-endian
    #[inline]
    pub(crate) fn write_sample(&self, out: &mut Vec<u8>, sample: f32) {
        match self {
            WavFormat::Float32 => out.extend_from_slice(&sample.to_le_bytes()),
            WavFormat::Int16 => {
                let scaled = (sample * 32767.0).round().clamp(-32768.0, 32767.0) as i16;
                out.extend_from_slice(&scaled.to_le_bytes());
            }
        }
    }
}

/// Header fields for a canonical WAV file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    format: WavFormat,
    layout: ChannelLayout,
    sample_rate: u32,
    num_frames: u32,
}

impl WavHeader {
    /// Build a header, checking that every derived field fits its 32-bit slot
    ///
    /// # Errors
    /// * `UnsupportedSampleRate` - If the byte rate would overflow its field
    /// * `OutputTooLarge` - If the data chunk would overflow the RIFF size field
    pub fn new(
        format: WavFormat,
        layout: ChannelLayout,
        sample_rate: u32,
        num_frames: usize,
    ) -> Result<Self> {
        let block_align = layout.num_channels() as u64 * format.bytes_per_sample() as u64;
        if sample_rate as u64 * block_align > u32::MAX as u64 {
            return Err(EditError::UnsupportedSampleRate {
                sample_rate,
                block_align: block_align as u16,
            });
        }

        let data_size = num_frames as u64 * block_align;
        if data_size + RIFF_OVERHEAD as u64 > u32::MAX as u64 {
            return Err(EditError::OutputTooLarge {
                bytes: data_size + WAV_HEADER_LEN as u64,
            });
        }

        Ok(Self {
            format,
            layout,
            sample_rate,
            num_frames: num_frames as u32,
        })
    }

    /// NumChannels field
    pub fn num_channels(&self) -> u16 {
        self.layout.num_channels() as u16
    }

    /// Bytes per frame across all channels
    pub fn block_align(&self) -> u16 {
        self.num_channels() * self.format.bytes_per_sample()
    }

    /// Bytes per second of audio
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * self.block_align() as u32
    }

    /// Size of the sample data in bytes (Subchunk2Size)
    pub fn data_size(&self) -> u32 {
        self.num_frames * self.block_align() as u32
    }

    /// Size of the RIFF chunk body (ChunkSize)
    pub fn chunk_size(&self) -> u32 {
        self.data_size() + RIFF_OVERHEAD
    }

    /// Serialize the header, all integers little-endian
    pub fn to_bytes(&self) -> [u8; WAV_HEADER_LEN] {
        let mut w = HeaderWriter::new();

        w.tag(b"RIFF");
        w.u32(self.chunk_size());
        w.tag(b"WAVE");

        w.tag(b"fmt ");
        w.u32(FMT_CHUNK_SIZE);
        w.u16(self.format.format_tag());
        w.u16(self.num_channels());
        w.u32(self.sample_rate);
        w.u32(self.byte_rate());
        w.u16(self.block_align());
        w.u16(self.format.bits_per_sample());

        w.tag(b"data");
        w.u32(self.data_size());

        w.finish()
    }
}

/// Fixed-size byte sink with a write cursor
struct HeaderWriter {
    bytes: [u8; WAV_HEADER_LEN],
    cursor: usize,
}

impl HeaderWriter {
    fn new() -> Self {
        Self {
            bytes: [0; WAV_HEADER_LEN],
            cursor: 0,
        }
    }

    fn put(&mut self, data: &[u8]) {
        let end = self.cursor + data.len();
        self.bytes[self.cursor..end].copy_from_slice(data);
        self.cursor = end;
    }

    fn tag(&mut self, tag: &[u8; 4]) {
        self.put(tag);
    }

    fn u32(&mut self, value: u32) {
        self.put(&value.to_le_bytes());
    }

    fn u16(&mut self, value: u16) {
        self.put(&value.to_le_bytes());
    }

    fn finish(self) -> [u8; WAV_HEADER_LEN] {
        debug_assert_eq!(self.cursor, WAV_HEADER_LEN, "header fields incomplete");
        self.bytes
    }
}
