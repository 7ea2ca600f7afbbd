//! Sources of captured packet buffers
//!
//! The capture side stores one datagram per file; sources hand those buffers to
//! the converter one at a time. Buffers are complete and immutable but arrive in
//! no particular order, and may repeat.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReadDirStream;
use tracing::{debug, info, trace};

use crate::{Result, TelemetryError};

/// File extension of stored capture buffers.
pub const CAPTURE_EXTENSION: &str = "data";

/// One captured datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedBuffer {
    /// Identifier used for output naming, e.g. the capture file stem
    pub name: String,
    pub data: Vec<u8>,
}

impl CapturedBuffer {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self { name: name.into(), data }
    }
}

/// Trait for sources of captured buffers.
#[async_trait::async_trait]
pub trait BufferSource: Send {
    /// Get the next captured buffer
    ///
    /// Returns:
    /// - `Ok(Some(buffer))` - Buffer available
    /// - `Ok(None)` - Source exhausted
    /// - `Err(e)` - Reading this buffer failed; later buffers may still succeed
    async fn next_buffer(&mut self) -> Result<Option<CapturedBuffer>>;

    /// Buffers not yet handed out, if known.
    fn remaining_hint(&self) -> Option<usize> {
        None
    }
}

/// Reads `*.data` capture files from one directory, in file name order.
#[derive(Debug)]
pub struct DirectorySource {
    root: PathBuf,
    pending: VecDeque<PathBuf>,
}

impl DirectorySource {
    /// List the capture files in `root`. Subdirectories are not searched.
    pub async fn open(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        let entries = tokio::fs::read_dir(&root)
            .await
            .map_err(|e| TelemetryError::file_error(&root, e))?;

        let mut stream = ReadDirStream::new(entries);
        let mut files = Vec::new();
        while let Some(entry) = stream.next().await {
            let entry = entry.map_err(|e| TelemetryError::file_error(&root, e))?;
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == CAPTURE_EXTENSION) {
                continue;
            }
            let file_type =
                entry.file_type().await.map_err(|e| TelemetryError::file_error(&path, e))?;
            if file_type.is_file() {
                files.push(path);
            }
        }
        files.sort();

        info!(dir = %root.display(), files = files.len(), "Opened capture directory");
        Ok(Self { root, pending: files.into() })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait::async_trait]
impl BufferSource for DirectorySource {
    async fn next_buffer(&mut self) -> Result<Option<CapturedBuffer>> {
        let Some(path) = self.pending.pop_front() else {
            debug!(dir = %self.root.display(), "Capture directory exhausted");
            return Ok(None);
        };

        let data = tokio::fs::read(&path).await.map_err(|e| TelemetryError::file_error(&path, e))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();

        trace!(file = %path.display(), bytes = data.len(), "Read capture file");
        Ok(Some(CapturedBuffer { name, data }))
    }

    fn remaining_hint(&self) -> Option<usize> {
        Some(self.pending.len())
    }
}

/// In-memory queue of buffers.
#[derive(Debug, Default, Clone)]
pub struct MemorySource {
    buffers: VecDeque<CapturedBuffer>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, buffer: CapturedBuffer) {
        self.buffers.push_back(buffer);
    }
}

impl FromIterator<CapturedBuffer> for MemorySource {
    fn from_iter<I: IntoIterator<Item = CapturedBuffer>>(iter: I) -> Self {
        Self { buffers: iter.into_iter().collect() }
    }
}

#[async_trait::async_trait]
impl BufferSource for MemorySource {
    async fn next_buffer(&mut self) -> Result<Option<CapturedBuffer>> {
        Ok(self.buffers.pop_front())
    }

    fn remaining_hint(&self) -> Option<usize> {
        Some(self.buffers.len())
    }
}
