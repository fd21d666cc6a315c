//! Ordered observer registry.

use super::FrameObserver;
use crate::domain::FrameRecord;

/// Holds observers in registration order and notifies each of them.
///
/// Registration is a setup-time operation: register every observer before
/// handing the registry to the capture loop.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<Box<dyn FrameObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observer. The same consumer may be registered more than
    /// once and is then notified once per registration.
    pub fn register(&mut self, observer: Box<dyn FrameObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver a record to every observer in registration order.
    ///
    /// Returns the number of observers whose update failed. Failures are
    /// logged and never stop delivery to the remaining observers.
    pub fn notify(&mut self, record: &FrameRecord) -> usize {
        let mut failures = 0;

        for (index, observer) in self.observers.iter_mut().enumerate() {
            if let Err(e) = observer.update(record) {
                failures += 1;
                tracing::warn!(
                    "Observer #{} failed on frame #{}: {:#}",
                    index,
                    record.sequence_number(),
                    e
                );
            }
        }

        failures
    }

    pub(crate) fn start(&mut self, interface: &str) {
        for observer in &mut self.observers {
            observer.on_start(interface);
        }
    }

    pub(crate) fn stop(&mut self) {
        for observer in &mut self.observers {
            observer.on_stop();
        }
    }
}
