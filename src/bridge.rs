//! Async bridge for host I/O boundaries
//!
//! Decoding and encoding are blocking work. `AsyncEditor` runs each edit on
//! tokio's blocking pool so async callers only suspend at the boundary; the
//! transform itself is unchanged.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::task;

use crate::codec::AudioDecoder;
use crate::error::{EditError, Result};
use crate::timeline::{TimeRange, TimelineEditor};

/// Shares a [`TimelineEditor`] with the blocking pool
#[derive(Debug)]
pub struct AsyncEditor<D> {
    editor: Arc<TimelineEditor<D>>,
}

impl<D> Clone for AsyncEditor<D> {
    fn clone(&self) -> Self {
        Self {
            editor: Arc::clone(&self.editor),
        }
    }
}

impl<D> AsyncEditor<D>
where
    D: AudioDecoder + Send + Sync + 'static,
{
    pub fn new(editor: TimelineEditor<D>) -> Self {
        Self {
            editor: Arc::new(editor),
        }
    }

    pub async fn cut(&self, bytes: Vec<u8>, start: f64, end: f64) -> Result<Vec<u8>> {
        self.run(move |editor| editor.cut(&bytes, start, end)).await
    }

    pub async fn insert_silence(&self, bytes: Vec<u8>, start: f64, end: f64) -> Result<Vec<u8>> {
        self.run(move |editor| editor.insert_silence(&bytes, start, end))
            .await
    }

    pub async fn remove_slice(&self, bytes: Vec<u8>, start: f64, end: f64) -> Result<Vec<u8>> {
        self.run(move |editor| editor.remove_slice(&bytes, start, end))
            .await
    }

    pub async fn remove_slices(&self, bytes: Vec<u8>, ranges: Vec<TimeRange>) -> Result<Vec<u8>> {
        self.run(move |editor| editor.remove_slices(&bytes, &ranges))
            .await
    }

    async fn run<F>(&self, edit: F) -> Result<Vec<u8>>
    where
        F: FnOnce(&TimelineEditor<D>) -> Result<Vec<u8>> + Send + 'static,
    {
        let editor = Arc::clone(&self.editor);
        task::spawn_blocking(move || edit(&editor))
            .await
            .map_err(|e| EditError::ProcessingError {
                reason: format!("edit task failed: {}", e),
            })?
    }
}

/// Read an audio file without blocking the runtime
pub async fn read_audio_bytes(path: PathBuf) -> Result<Vec<u8>> {
    task::spawn_blocking(move || crate::engine::io::read_audio_bytes(&path))
        .await
        .map_err(|e| EditError::ProcessingError {
            reason: format!("read task failed: {}", e),
        })?
}
