//! Error — failures of the GELF transport.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Failed to resolve {address}: {source}")]
    Resolve {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("No address found for {0}")]
    NoAddress(String),
    #[error("Socket error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode GELF message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("GELF message too large: {size} bytes needs {chunks} chunks (max: {max})")]
    MessageTooLarge { size: usize, chunks: usize, max: usize },
}
