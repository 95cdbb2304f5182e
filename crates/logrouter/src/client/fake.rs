//! Fake — test double for the structured-log transport.
//!
//! Provides a deterministic [`RecordingLogger`] that implements
//! [`StructuredLogger`] by keeping every emission in memory. Useful for
//! unit-testing the dispatcher and pipeline without a collector.

use std::io;

use tokio::sync::Mutex;

use crate::client::error::TransportError;
use crate::client::logger::{EmitFuture, StructuredLogger};
use crate::parser::Fields;
use crate::record::Severity;

/// One recorded emission.
#[derive(Clone, Debug, PartialEq)]
pub struct EmittedRecord {
    pub severity: Severity,
    pub message: String,
    pub metadata: Fields,
    /// Static attributes in effect when the record was emitted.
    pub attributes: Vec<(String, String)>,
}

/// A fake transport for deterministic testing.
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<EmittedRecord>>,
    attributes: Vec<(String, String)>,
    failing_messages: Vec<String>,
}

impl RecordingLogger {
    /// Create an empty recording logger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every emission whose text equals `message` fail with a
    /// connection-refused error instead of being recorded.
    pub fn fail_on(mut self, message: &str) -> Self {
        self.failing_messages.push(message.to_string());
        self
    }

    /// Everything emitted so far, in order.
    pub async fn records(&self) -> Vec<EmittedRecord> {
        self.records.lock().await.clone()
    }
}

impl StructuredLogger for RecordingLogger {
    fn emit(&self, severity: Severity, metadata: Fields, message: String) -> EmitFuture<'_> {
        Box::pin(async move {
            if self.failing_messages.contains(&message) {
                return Err(TransportError::Io(io::Error::new(
                    io::ErrorKind::ConnectionRefused,
                    "connection refused",
                )));
            }

            self.records.lock().await.push(EmittedRecord {
                severity,
                message,
                metadata,
                attributes: self.attributes.clone(),
            });
            Ok(())
        })
    }

    fn set_attr(&mut self, name: &str, value: &str) {
        self.attributes.push((name.to_string(), value.to_string()));
    }
}
