//! Error — configuration failures. All of them are fatal at startup.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("You must specify {0}")]
    Missing(&'static str),

    #[error("Unsupported input format '{0}': currently only 'logfmt', 'json', or 'unknown' is supported")]
    UnsupportedInputFormat(String),

    #[error("Unsupported output '{0}': currently only 'graylog' is supported")]
    UnsupportedOutput(String),

    #[error("Invalid Graylog port '{0}': expected a number between 1 and 65535")]
    InvalidPort(String),

    #[error("Invalid attribute '{0}': expected name:value")]
    InvalidAttribute(String),

    #[error("graylog.chunk_size must be between {min} and {max}, got {value}")]
    InvalidChunkSize { value: usize, min: usize, max: usize },

    #[error("max_line_bytes must be > 0")]
    InvalidLineLimit,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
