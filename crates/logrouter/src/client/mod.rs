//! Client — the "send a structured record at severity S" capability.
//!
//! The pipeline only talks to [`StructuredLogger`].
//! `live.rs` provides the GELF-over-UDP implementation.
//! `fake.rs` provides a test double.

pub mod chunk;
pub mod error;
pub mod fake;
pub mod gelf;
pub mod live;
pub mod logger;

pub use error::TransportError;
pub use fake::RecordingLogger;
pub use gelf::{Compression, GelfEncoder};
pub use live::GelfUdpClient;
pub use logger::{EmitFuture, StructuredLogger};
