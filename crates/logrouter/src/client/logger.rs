//! Logger trait — abstract interface for emitting structured records.

use std::future::Future;
use std::pin::Pin;

use crate::client::error::TransportError;
use crate::parser::Fields;
use crate::record::Severity;

pub type EmitFuture<'a> = Pin<Box<dyn Future<Output = Result<(), TransportError>> + Send + 'a>>;

/// Connection to a structured-log collector.
///
/// Object-safe thanks to `Pin<Box<…>>` returns.
/// One emission operation per severity; each performs exactly one send and
/// never retries.
pub trait StructuredLogger: Send + Sync {
    /// Send one record with `message` as its text and `metadata` attached.
    fn emit(&self, severity: Severity, metadata: Fields, message: String) -> EmitFuture<'_>;

    /// Attach `name=value` to every record sent from now on.
    fn set_attr(&mut self, name: &str, value: &str);

    // ── Per-severity emission ───────────────────────────────────

    fn debug(&self, metadata: Fields, message: String) -> EmitFuture<'_> {
        self.emit(Severity::Debug, metadata, message)
    }

    fn info(&self, metadata: Fields, message: String) -> EmitFuture<'_> {
        self.emit(Severity::Info, metadata, message)
    }

    fn notice(&self, metadata: Fields, message: String) -> EmitFuture<'_> {
        self.emit(Severity::Notice, metadata, message)
    }

    fn warning(&self, metadata: Fields, message: String) -> EmitFuture<'_> {
        self.emit(Severity::Warning, metadata, message)
    }

    fn error(&self, metadata: Fields, message: String) -> EmitFuture<'_> {
        self.emit(Severity::Error, metadata, message)
    }

    fn critical(&self, metadata: Fields, message: String) -> EmitFuture<'_> {
        self.emit(Severity::Critical, metadata, message)
    }

    fn alert(&self, metadata: Fields, message: String) -> EmitFuture<'_> {
        self.emit(Severity::Alert, metadata, message)
    }

    fn emergency(&self, metadata: Fields, message: String) -> EmitFuture<'_> {
        self.emit(Severity::Emergency, metadata, message)
    }
}
