//! Error handling for practice-edit
//!
//! Every public operation validates its inputs at the boundary and fails
//! with one of these variants before producing any output.

use thiserror::Error;

/// Result type alias for practice-edit operations
pub type Result<T> = std::result::Result<T, EditError>;

/// Main error type for timeline editing, encoding and alignment
#[derive(Error, Debug)]
pub enum EditError {
    // Range Errors
    #[error("Invalid range: {start:.6}s..{end:.6}s ({reason})")]
    InvalidRange { start: f64, end: f64, reason: String },

    #[error("Ranges must be ascending and non-overlapping: range {index} ({start:.6}s) begins before the previous range ends ({previous_end:.6}s)")]
    UnsortedOrOverlappingRanges {
        index: usize,
        start: f64,
        previous_end: f64,
    },

    // Audio Format Errors
    #[error("Unsupported channel count: {channels} (only mono/stereo supported)")]
    UnsupportedChannelCount { channels: usize },

    #[error("Channel {channel} has {actual} samples, expected {expected}")]
    MismatchedChannelLengths {
        channel: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Encoded audio would be {bytes} bytes, exceeding the WAV size limit")]
    OutputTooLarge { bytes: u64 },

    #[error("Sample rate {sample_rate} Hz is too high for a WAV header at {block_align} bytes per frame")]
    UnsupportedSampleRate { sample_rate: u32, block_align: u16 },

    #[error("Failed to decode audio: {reason}")]
    DecodeFailure {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // File Errors
    #[error("File not found: {path}")]
    FileNotFound {
        path: String,
        #[source]
        source: Option<std::io::Error>,
    },

    // Processing Errors
    #[error("Processing error: {reason}")]
    ProcessingError { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization Errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl EditError {
    /// Shorthand for building an `InvalidRange` error
    pub(crate) fn invalid_range(start: f64, end: f64, reason: impl Into<String>) -> Self {
        EditError::InvalidRange {
            start,
            end,
            reason: reason.into(),
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            EditError::InvalidRange { .. } => "INVALID_RANGE",
            EditError::UnsortedOrOverlappingRanges { .. } => "UNSORTED_OR_OVERLAPPING_RANGES",
            EditError::UnsupportedChannelCount { .. } => "UNSUPPORTED_CHANNEL_COUNT",
            EditError::MismatchedChannelLengths { .. } => "MISMATCHED_CHANNEL_LENGTHS",
            EditError::OutputTooLarge { .. } => "OUTPUT_TOO_LARGE",
            EditError::UnsupportedSampleRate { .. } => "UNSUPPORTED_SAMPLE_RATE",
            EditError::DecodeFailure { .. } => "DECODE_FAILURE",
            EditError::FileNotFound { .. } => "FILE_NOT_FOUND",
            EditError::ProcessingError { .. } => "PROCESSING_ERROR",
            EditError::Io(_) => "IO_ERROR",
            EditError::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    /// Check if the caller can reasonably fix the input and try again
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EditError::InvalidRange { .. }
                | EditError::UnsortedOrOverlappingRanges { .. }
                | EditError::FileNotFound { .. }
                | EditError::DecodeFailure { .. }
        )
    }

    /// Get recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            EditError::InvalidRange { .. } => vec![
                "Check that start is not after end",
                "Keep the range within the recording's duration",
            ],
            EditError::UnsortedOrOverlappingRanges { .. } => vec![
                "Sort ranges by start time",
                "Merge ranges that overlap before removing them",
            ],
            EditError::UnsupportedChannelCount { .. } => vec![
                "Downmix the recording to mono or stereo first",
            ],
            EditError::DecodeFailure { .. } => vec![
                "Check if the file plays in another application",
                "Try converting the file to WAV format first",
            ],
            EditError::FileNotFound { .. } => vec![
                "Check the file path is correct",
                "Verify the file hasn't been moved or deleted",
            ],
            EditError::OutputTooLarge { .. } => vec![
                "Split the recording into shorter sections",
                "Use 16-bit output to halve the data size",
            ],
            EditError::UnsupportedSampleRate { .. } => vec![
                "Resample the recording to a standard rate such as 44100 or 48000 Hz",
            ],
            _ => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = EditError::invalid_range(2.0, 1.0, "start after end");
        assert_eq!(err.error_code(), "INVALID_RANGE");

        let err = EditError::UnsupportedChannelCount { channels: 6 };
        assert_eq!(err.error_code(), "UNSUPPORTED_CHANNEL_COUNT");
    }

    #[test]
    fn test_recovery_suggestions() {
        let err = EditError::UnsortedOrOverlappingRanges {
            index: 1,
            start: 0.5,
            previous_end: 1.0,
        };
        assert!(!err.recovery_suggestions().is_empty());
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_channel_count_not_recoverable() {
        let err = EditError::UnsupportedChannelCount { channels: 3 };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_sample_rate_error() {
        let err = EditError::UnsupportedSampleRate {
            sample_rate: 600_000_000,
            block_align: 8,
        };
        assert_eq!(err.error_code(), "UNSUPPORTED_SAMPLE_RATE");
        assert!(err.to_string().contains("600000000"));
        assert!(!err.recovery_suggestions().is_empty());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: EditError = io.into();
        assert_eq!(err.error_code(), "IO_ERROR");
    }
}
