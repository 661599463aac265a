//! Failure notifications.
//!
//! The store reports every failed mutation through a fire-and-forget sink
//! with one of four human-readable strings; the display mechanism (toast,
//! terminal, whatever) lives outside this crate. Success is never announced.

use std::sync::Mutex;

/// "Requested quantity exceeds available stock" - the one specific message.
pub const MSG_OUT_OF_STOCK: &str = "Requested quantity exceeds available stock";
/// Generic add failure.
pub const MSG_ADD_FAILED: &str = "Failed to add product";
/// Generic remove failure.
pub const MSG_REMOVE_FAILED: &str = "Failed to remove product";
/// Generic update failure.
pub const MSG_UPDATE_FAILED: &str = "Failed to update product amount";

/// Fire-and-forget sink for human-readable failure strings.
pub trait Notifier {
    /// Deliver one failure message.
    fn notify(&self, message: &str);
}

/// Notifier that reports through `tracing` at warn level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        tracing::warn!(message, "cart notification");
    }
}

/// Notifier that records messages for later inspection in tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages delivered so far, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// The most recent message, if any.
    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.messages().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(message.to_string());
    }
}

impl<N: Notifier> Notifier for &N {
    fn notify(&self, message: &str) {
        (*self).notify(message);
    }
}
