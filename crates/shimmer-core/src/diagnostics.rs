//! Diagnostic reporting for failures that must never reach the host.
//!
//! The animation loop swallows everything to keep the UI thread stable;
//! this sink makes the swallowed failures observable. The default sink
//! writes to the error stream.

use std::sync::{Arc, Mutex};

/// Destination for non-fatal diagnostics.
pub trait DiagnosticSink: Send + Sync {
    /// Report a diagnostic message.
    fn report(&self, message: &str);
}

/// Sink that writes to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl DiagnosticSink for StderrSink {
    fn report(&self, message: &str) {
        eprintln!("{message}");
    }
}

/// Sink that collects messages in memory, for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink, shareable between a widget and a test.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Snapshot of the collected messages.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Whether nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.lock().map(|m| m.is_empty()).unwrap_or(true)
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
