//! GELF 1.1 payload encoding.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use flate2::write::{GzEncoder, ZlibEncoder};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::client::error::TransportError;
use crate::parser::Fields;
use crate::record::Severity;

pub const GELF_VERSION: &str = "1.1";

/// Sent instead of an empty `short_message`, which collectors reject.
pub const EMPTY_MESSAGE_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compression {
    #[default]
    Gzip,
    Zlib,
    None,
}

impl Compression {
    pub fn as_str(&self) -> &'static str {
        match self {
            Compression::Gzip => "gzip",
            Compression::Zlib => "zlib",
            Compression::None => "none",
        }
    }

    fn apply(&self, payload: Vec<u8>) -> std::io::Result<Vec<u8>> {
        match self {
            Compression::None => Ok(payload),
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
                encoder.write_all(&payload)?;
                encoder.finish()
            }
            Compression::Zlib => {
                let mut encoder = ZlibEncoder::new(Vec::new(), flate2::Compression::default());
                encoder.write_all(&payload)?;
                encoder.finish()
            }
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Compression {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gzip" => Ok(Compression::Gzip),
            "zlib" => Ok(Compression::Zlib),
            "none" => Ok(Compression::None),
            other => Err(format!(
                "unsupported compression '{}' (expected gzip, zlib or none)",
                other
            )),
        }
    }
}

/// Builds GELF payloads for one connection.
///
/// Holds the `host` value and the static attributes attached to every
/// record. Record fields win over attributes with the same name.
#[derive(Debug, Clone)]
pub struct GelfEncoder {
    host: String,
    attributes: Vec<(String, String)>,
    compression: Compression,
}

impl GelfEncoder {
    pub fn new(host: impl Into<String>, compression: Compression) -> Self {
        Self {
            host: host.into(),
            attributes: Vec::new(),
            compression,
        }
    }

    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.attributes.push((name.to_string(), value.to_string())),
        }
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// The uncompressed GELF object for one record.
    pub fn message(
        &self,
        severity: Severity,
        metadata: Fields,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Map<String, Value> {
        let mut gelf = Map::new();
        gelf.insert("version".into(), Value::from(GELF_VERSION));
        gelf.insert("host".into(), Value::from(self.host.as_str()));
        let short_message = if message.is_empty() {
            EMPTY_MESSAGE_PLACEHOLDER
        } else {
            message
        };
        gelf.insert("short_message".into(), Value::from(short_message));
        gelf.insert(
            "timestamp".into(),
            Value::from(timestamp.timestamp_millis() as f64 / 1000.0),
        );
        gelf.insert("level".into(), Value::from(severity.syslog_level()));

        for (name, value) in &self.attributes {
            gelf.insert(additional_field_name(name), Value::from(value.as_str()));
        }
        for (name, value) in metadata {
            gelf.insert(additional_field_name(&name), additional_field_value(value));
        }

        gelf
    }

    /// Serialize and compress one record into a single datagram payload.
    pub fn encode(
        &self,
        severity: Severity,
        metadata: Fields,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Bytes, TransportError> {
        let gelf = self.message(severity, metadata, message, timestamp);
        let json = serde_json::to_vec(&gelf)?;
        Ok(Bytes::from(self.compression.apply(json)?))
    }
}

/// `name` as a GELF additional field: `_` prefixed, restricted to
/// `[A-Za-z0-9_.-]`. `_id` is reserved by GELF so `id` maps to `__id`.
fn additional_field_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized == "id" {
        "__id".to_string()
    } else {
        format!("_{}", sanitized)
    }
}

/// GELF additional fields hold strings or numbers only.
fn additional_field_value(value: Value) -> Value {
    match value {
        Value::String(_) | Value::Number(_) => value,
        other => Value::String(other.to_string()),
    }
}
