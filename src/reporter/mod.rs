//! Delivery of decoded frames to consumers.
//!
//! This module defines the `FrameObserver` trait, the `ObserverRegistry`
//! that fans each frame out to every registered observer, and a console
//! implementation.

mod console_reporter;
mod registry;

pub use console_reporter::ConsoleReporter;
pub use registry::ObserverRegistry;

use std::sync::{Arc, Mutex};

use crate::domain::FrameRecord;

/// A consumer of decoded frames.
///
/// Implementations receive every captured frame exactly once, in capture
/// order, as a read-only view. A failing update is reported by the
/// registry and does not affect other observers.
pub trait FrameObserver: Send {
    /// Handle one decoded frame.
    fn update(&mut self, record: &FrameRecord) -> anyhow::Result<()>;

    /// Called when capture starts.
    fn on_start(&mut self, _interface: &str) {}

    /// Called when capture stops.
    fn on_stop(&mut self) {}
}

/// A shared observer. Registering clones of one `Arc` registers the same
/// instance several times; it is notified once per registration.
impl<O: FrameObserver> FrameObserver for Arc<Mutex<O>> {
    fn update(&mut self, record: &FrameRecord) -> anyhow::Result<()> {
        let mut observer = self
            .lock()
            .map_err(|_| anyhow::anyhow!("shared observer lock poisoned"))?;
        observer.update(record)
    }

    fn on_start(&mut self, interface: &str) {
        if let Ok(mut observer) = self.lock() {
            observer.on_start(interface);
        }
    }

    fn on_stop(&mut self) {
        if let Ok(mut observer) = self.lock() {
            observer.on_stop();
        }
    }
}
