//! The capture loop.
//!
//! Pulls raw frames from a [`FrameSource`], decodes them, numbers them,
//! notifies the observer registry and yields each record to the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::capture::{is_fatal_read_error, FrameSource};
use crate::domain::FrameRecord;
use crate::error::{CaptureError, DecodeError};
use crate::parser::FrameDecoder;
use crate::reporter::ObserverRegistry;

/// Back-to-back read failures tolerated before the capture is abandoned.
pub const MAX_CONSECUTIVE_READ_ERRORS: u32 = 16;

/// Shared flag used to stop a running capture from another thread
/// (typically a Ctrl-C handler).
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Iterator over decoded frames from a live capture.
///
/// The sequence is unbounded and ends when the cancellation token fires or
/// the channel stops working (see [`CaptureLoop::last_error`]). The capture
/// channel is dropped as soon as the loop ends (or when the loop itself is
/// dropped), and a finished loop never resumes.
pub struct CaptureLoop {
    source: Option<Box<dyn FrameSource>>,
    decoder: FrameDecoder,
    registry: ObserverRegistry,
    cancel: CancellationToken,
    last_sequence: u64,
    consecutive_errors: u32,
    last_error: Option<CaptureError>,
}

impl CaptureLoop {
    /// Build a loop over an already-open source.
    ///
    /// Observers must be registered before this call; `on_start` is sent to
    /// each of them here.
    pub fn new(
        source: Box<dyn FrameSource>,
        decoder: FrameDecoder,
        mut registry: ObserverRegistry,
        cancel: CancellationToken,
    ) -> Self {
        registry.start(source.interface_name());

        Self {
            source: Some(source),
            decoder,
            registry,
            cancel,
            last_sequence: 0,
            consecutive_errors: 0,
            last_error: None,
        }
    }

    /// Open the capture channel and build a loop over it.
    ///
    /// Permission and interface errors are returned before any frame is read.
    pub fn open(
        interface: Option<&str>,
        decoder: FrameDecoder,
        registry: ObserverRegistry,
        cancel: CancellationToken,
    ) -> Result<Self, CaptureError> {
        let source = crate::capture::open(interface)?;
        Ok(Self::new(source, decoder, registry, cancel))
    }

    /// Number of frames delivered so far.
    pub fn frames_captured(&self) -> u64 {
        self.last_sequence
    }

    /// Returns false once the loop has released its capture channel.
    pub fn is_running(&self) -> bool {
        self.source.is_some()
    }

    /// The read error that ended the capture, if it did not end by
    /// cancellation.
    pub fn last_error(&self) -> Option<&CaptureError> {
        self.last_error.as_ref()
    }

    /// Count a failed read. Returns true when the capture has to stop.
    fn record_read_error(&mut self, err: CaptureError) -> bool {
        self.consecutive_errors += 1;

        let fatal = is_fatal_read_error(&err);
        if !fatal && self.consecutive_errors < MAX_CONSECUTIVE_READ_ERRORS {
            tracing::debug!("Capture error: {}", err);
            return false;
        }

        tracing::warn!(
            "Capture failed after {} consecutive read errors: {}",
            self.consecutive_errors,
            err
        );
        self.last_error = Some(err);
        true
    }

    /// Release the capture channel and tell observers capture is over.
    fn shutdown(&mut self) {
        if let Some(source) = self.source.take() {
            tracing::debug!(
                "Stopping capture on {} after {} frames",
                source.interface_name(),
                self.last_sequence
            );
            drop(source);
            self.registry.stop();
        }
    }
}

impl Iterator for CaptureLoop {
    type Item = FrameRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.cancel.is_cancelled() {
                self.shutdown();
                return None;
            }

            let source = self.source.as_mut()?;
            let raw = match source.next_frame() {
                Ok(Some(raw)) => raw,
                Ok(None) => {
                    self.consecutive_errors = 0;
                    continue;
                }
                Err(e) => {
                    if self.record_read_error(e) {
                        self.shutdown();
                        return None;
                    }
                    continue;
                }
            };
            self.consecutive_errors = 0;

            let sequence_number = self.last_sequence + 1;
            let record = match self.decoder.decode(raw, sequence_number) {
                Ok(record) => record,
                Err(DecodeError::TruncatedFrame { expected, actual }) => {
                    tracing::debug!(
                        "Skipping truncated frame: {} bytes, need {}",
                        actual,
                        expected
                    );
                    continue;
                }
            };

            self.last_sequence = sequence_number;
            self.registry.notify(&record);
            return Some(record);
        }
    }
}

impl Drop for CaptureLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}
