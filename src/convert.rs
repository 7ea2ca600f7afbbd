//! Batch converter from captured buffers to JSON
//!
//! Pulls buffers from a [`BufferSource`], classifies and decodes each one, and
//! writes decoded packets to `<output>/<packet name>/<buffer name>.json`.
//! Unsupported packets are counted and skipped. A buffer that fails to read,
//! decode or write is recorded in the report and never stops the batch.

use futures::StreamExt;
use futures::stream;
use std::path::{Path, PathBuf};
use std::pin::pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::catalog::{Classified, DecodedPacket, classify_and_decode};
use crate::schema::preload;
use crate::source::{BufferSource, CapturedBuffer, DirectorySource};
use crate::{Result, TelemetryError};

/// Default number of buffers processed concurrently.
pub const DEFAULT_CONCURRENCY: usize = 32;

/// Converter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Root directory for JSON output
    pub output_dir: PathBuf,
    /// Maximum buffers in flight
    pub concurrency: usize,
    /// Pretty-print JSON
    pub pretty: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            concurrency: DEFAULT_CONCURRENCY,
            pretty: false,
        }
    }
}

impl ConvertOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into(), ..Self::default() }
    }

    /// Set the concurrency bound (at least 1).
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

/// A buffer that could not be converted.
#[derive(Debug)]
pub struct FailedBuffer {
    pub name: String,
    pub error: TelemetryError,
}

/// Summary of one conversion run.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub converted: usize,
    pub unsupported: usize,
    pub failed: Vec<FailedBuffer>,
    pub bytes_written: u64,
    /// The run stopped early on cancellation
    pub cancelled: bool,
}

impl ConversionReport {
    /// Buffers processed, whatever the outcome.
    pub fn total(&self) -> usize {
        self.converted + self.unsupported + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty() && !self.cancelled
    }

    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Converted { bytes } => {
                self.converted += 1;
                self.bytes_written += bytes;
            }
            Outcome::Unsupported => self.unsupported += 1,
            Outcome::Failed(failure) => self.failed.push(failure),
        }
    }
}

enum Outcome {
    Converted { bytes: u64 },
    Unsupported,
    Failed(FailedBuffer),
}

/// Render a decoded packet as JSON.
pub fn render_json(packet: &DecodedPacket, pretty: bool) -> Result<Vec<u8>> {
    let rendered =
        if pretty { serde_json::to_vec_pretty(packet) } else { serde_json::to_vec(packet) };
    rendered.map_err(|e| TelemetryError::serialization(format!("{} packet", packet.name), e))
}

/// Converts captured buffers to JSON files.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Convert every capture file in `input`.
    pub async fn convert_dir(
        &self,
        input: impl AsRef<Path>,
        cancel: CancellationToken,
    ) -> Result<ConversionReport> {
        let source = DirectorySource::open(input).await?;
        self.convert_source(source, cancel).await
    }

    /// Convert every buffer `source` yields, until it is exhausted or `cancel` fires.
    ///
    /// On cancellation no further buffers are pulled from the source; buffers
    /// already in flight still finish and are counted. Only schema defects fail
    /// the whole run, and they surface before any buffer is read.
    pub async fn convert_source<S: BufferSource>(
        &self,
        mut source: S,
        cancel: CancellationToken,
    ) -> Result<ConversionReport> {
        preload()?;

        let started = Instant::now();
        let stopped = AtomicBool::new(false);
        let (cancel, stopped_ref) = (&cancel, &stopped);
        let buffers = stream::unfold(&mut source, move |source| async move {
            let next = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("Conversion cancelled, finishing in-flight buffers");
                    stopped_ref.store(true, Ordering::Relaxed);
                    return None;
                }
                next = source.next_buffer() => next,
            };
            match next {
                Ok(Some(buffer)) => Some((Ok(buffer), source)),
                Ok(None) => None,
                Err(e) => Some((Err(e), source)),
            }
        });

        let mut outcomes = pin!(
            buffers
                .map(|buffer| async move {
                    match buffer {
                        Ok(buffer) => self.convert_buffer(buffer).await,
                        Err(error) => {
                            Outcome::Failed(FailedBuffer { name: source_name(&error), error })
                        }
                    }
                })
                .buffer_unordered(self.options.concurrency)
        );

        let mut report = ConversionReport::default();
        while let Some(outcome) = outcomes.next().await {
            report.record(outcome);
        }
        report.cancelled = stopped.load(Ordering::Relaxed);

        info!(
            converted = report.converted,
            unsupported = report.unsupported,
            failed = report.failed.len(),
            bytes = report.bytes_written,
            cancelled = report.cancelled,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Conversion finished"
        );
        Ok(report)
    }

    async fn convert_buffer(&self, buffer: CapturedBuffer) -> Outcome {
        match self.write_buffer(&buffer).await {
            Ok(Some(bytes)) => Outcome::Converted { bytes },
            Ok(None) => Outcome::Unsupported,
            Err(error) => {
                warn!(buffer = %buffer.name, error = %error, "Buffer conversion failed");
                Outcome::Failed(FailedBuffer { name: buffer.name, error })
            }
        }
    }

    async fn write_buffer(&self, buffer: &CapturedBuffer) -> Result<Option<u64>> {
        let packet = match classify_and_decode(&buffer.data)? {
            Classified::Decoded(packet) => packet,
            Classified::Unsupported { header } => {
                debug!(
                    buffer = %buffer.name,
                    packet_id = header.packet_id,
                    "Skipping unsupported packet"
                );
                return Ok(None);
            }
        };

        let json = render_json(&packet, self.options.pretty)?;
        let dir = self.options.output_dir.join(packet.name);
        tokio::fs::create_dir_all(&dir).await.map_err(|e| TelemetryError::file_error(&dir, e))?;

        let path = dir.join(format!("{}.json", buffer.name));
        tokio::fs::write(&path, &json).await.map_err(|e| TelemetryError::file_error(&path, e))?;

        debug!(
            buffer = %buffer.name,
            packet = packet.name,
            bytes = json.len(),
            "Wrote packet JSON"
        );
        Ok(Some(json.len() as u64))
    }
}

fn source_name(error: &TelemetryError) -> String {
    match error {
        TelemetryError::File { path, .. } => path.display().to_string(),
        _ => String::from("<source>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;
    use crate::test_utils::{header_bytes, session_fixture};

    #[test]
    fn options_builder() {
        let options = ConvertOptions::new("/tmp/out").with_concurrency(0).with_pretty(true);
        assert_eq!(options.concurrency, 1);
        assert!(options.pretty);
        assert_eq!(ConvertOptions::default().concurrency, DEFAULT_CONCURRENCY);
    }

    #[tokio::test]
    async fn memory_batch_reports_each_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let source: MemorySource = [
            CapturedBuffer::new("1", session_fixture()),
            CapturedBuffer::new("2", header_bytes(3)),
            CapturedBuffer::new("3", session_fixture()[..40].to_vec()),
        ]
        .into_iter()
        .collect();

        let converter = Converter::new(ConvertOptions::new(dir.path()));
        let report = converter.convert_source(source, CancellationToken::new()).await.unwrap();

        assert_eq!(report.converted, 1);
        assert_eq!(report.unsupported, 1);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "3");
        assert!(matches!(report.failed[0].error, TelemetryError::UnexpectedEof { .. }));
        assert!(dir.path().join("session/1.json").is_file());
        assert!(!report.is_clean());
    }

    #[tokio::test]
    async fn cancelled_before_start_converts_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source: MemorySource =
            (0..4).map(|i| CapturedBuffer::new(i.to_string(), session_fixture())).collect();

        let cancel = CancellationToken::new();
        cancel.cancel();
        let report = Converter::new(ConvertOptions::new(dir.path()))
            .convert_source(source, cancel)
            .await
            .unwrap();

        assert!(report.cancelled);
        assert_eq!(report.converted, 0);
    }

    /// Fires the token while handing out the buffer at `cancel_at`.
    struct CancellingSource {
        inner: MemorySource,
        handed_out: usize,
        cancel_at: usize,
        cancel: CancellationToken,
    }

    #[async_trait::async_trait]
    impl BufferSource for CancellingSource {
        async fn next_buffer(&mut self) -> Result<Option<CapturedBuffer>> {
            self.handed_out += 1;
            if self.handed_out == self.cancel_at {
                self.cancel.cancel();
            }
            self.inner.next_buffer().await
        }
    }

    #[tokio::test]
    async fn cancellation_finishes_buffers_already_pulled() {
        let dir = tempfile::tempdir().unwrap();
        let cancel = CancellationToken::new();
        let source = CancellingSource {
            inner: (1..=4).map(|i| CapturedBuffer::new(i.to_string(), session_fixture())).collect(),
            handed_out: 0,
            cancel_at: 2,
            cancel: cancel.clone(),
        };

        let report = Converter::new(ConvertOptions::new(dir.path()).with_concurrency(4))
            .convert_source(source, cancel)
            .await
            .unwrap();

        assert!(report.cancelled);
        assert_eq!(report.converted, 2);
        assert!(report.failed.is_empty());
        assert!(dir.path().join("session/1.json").is_file());
        assert!(dir.path().join("session/2.json").is_file());
        assert!(!dir.path().join("session/3.json").exists());
    }

    #[tokio::test]
    async fn exhausted_source_is_not_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let source: MemorySource =
            [CapturedBuffer::new("1", session_fixture())].into_iter().collect();

        let report = Converter::new(ConvertOptions::new(dir.path()))
            .convert_source(source, CancellationToken::new())
            .await
            .unwrap();

        assert!(!report.cancelled);
        assert!(report.is_clean());
    }
}
