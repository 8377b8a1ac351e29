//! # Notification Seam
//!
//! Fire-and-forget delivery of the semantic event "tell the shopper why the
//! operation failed". Rendering (toast, banner, sound) is the UI's business;
//! this seam only carries the reason.
//!
//! Successful operations never notify: the UI reflects the new cart state
//! directly.

use std::sync::Mutex;

use tracing::warn;

use cartwheel_core::CartFailure;

/// Receives failure notifications, one per failed operation.
pub trait Notifier: Send + Sync {
    /// Delivers one failure reason. No acknowledgment, no retry.
    fn notify(&self, failure: &CartFailure);
}

/// Notifier that logs through `tracing`.
///
/// The default wiring when no UI toast layer is attached (demo binary,
/// headless runs).
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, failure: &CartFailure) {
        warn!(reason = ?failure, "{}", failure);
    }
}

/// Notifier that records every failure, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<CartFailure>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything notified so far, in order.
    pub fn recorded(&self) -> Vec<CartFailure> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, failure: &CartFailure) {
        self.seen
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(*failure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let notifier = RecordingNotifier::new();
        notifier.notify(&CartFailure::OutOfStock);
        notifier.notify(&CartFailure::RemoveFailed);

        assert_eq!(
            notifier.recorded(),
            vec![CartFailure::OutOfStock, CartFailure::RemoveFailed]
        );
    }
}
