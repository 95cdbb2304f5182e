use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Decoded representation of one input line, keyed by field name.
pub type Fields = serde_json::Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputFormat {
    /// Logfmt key=value format (popular in Go apps)
    Logfmt,
    /// One JSON object per line
    Json,
    /// Unstructured text, forwarded as-is at notice level
    Unknown,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Logfmt => "logfmt",
            InputFormat::Json => "json",
            InputFormat::Unknown => "unknown",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "logfmt" => Ok(InputFormat::Logfmt),
            "json" => Ok(InputFormat::Json),
            "unknown" => Ok(InputFormat::Unknown),
            other => Err(format!(
                "unsupported input format '{}' (expected logfmt, json or unknown)",
                other
            )),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("Line too large: {0} bytes (max: {1} bytes)")]
    LineTooLarge(usize, usize),

    #[error("Invalid logfmt at column {column}: {reason}")]
    InvalidLogfmt { column: usize, reason: &'static str },

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("JSON is not an object")]
    NotAnObject,
}

/// Output of a [`FieldDecoder`](super::FieldDecoder).
///
/// `message` is only populated by decoders that have no structured `msg`
/// field to offer (the unknown format hands back the raw line here).
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedLine {
    pub fields: Fields,
    pub message: Option<Value>,
}

impl DecodedLine {
    pub fn from_fields(fields: Fields) -> Self {
        Self { fields, message: None }
    }
}
