//! Sink for non-fatal generation warnings

use std::sync::Mutex;

/// Receives human-readable warnings raised while generating wrappers
pub trait Reporter {
    fn report(&self, message: &str);
}

impl<F: Fn(&str)> Reporter for F {
    fn report(&self, message: &str) {
        self(message)
    }
}

/// Forwards warnings to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Keeps every warning in memory, in the order reported
#[derive(Debug, Default)]
pub struct CollectingReporter {
    messages: Mutex<Vec<String>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().map(|m| m.clone()).unwrap_or_default()
    }
}

impl Reporter for CollectingReporter {
    fn report(&self, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push(message.to_string());
        }
    }
}
