//! Severity dispatch — routes a normalized record to one emission call.

use crate::client::{StructuredLogger, TransportError};
use crate::record::{Record, Severity};

/// What happened to a record handed to [`dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Emitted(Severity),
    /// No recognized severity; carries the raw indicator, if any.
    Dropped(Option<String>),
}

/// Emit `record` through the operation matching its severity.
///
/// Records with an absent or unrecognized indicator are dropped without
/// touching the transport.
pub async fn dispatch<L>(logger: &L, record: Record) -> Result<Dispatch, TransportError>
where
    L: StructuredLogger + ?Sized,
{
    let Record { message, severity, metadata } = record;

    let Some(level) = severity.as_deref().and_then(Severity::from_indicator) else {
        return Ok(Dispatch::Dropped(severity));
    };

    let text = message.render();
    match level {
        Severity::Debug => logger.debug(metadata, text).await?,
        Severity::Info => logger.info(metadata, text).await?,
        Severity::Warning => logger.warning(metadata, text).await?,
        Severity::Error => logger.error(metadata, text).await?,
        Severity::Alert => logger.alert(metadata, text).await?,
        Severity::Critical => logger.critical(metadata, text).await?,
        Severity::Emergency => logger.emergency(metadata, text).await?,
        Severity::Notice => logger.notice(metadata, text).await?,
    }

    Ok(Dispatch::Emitted(level))
}
