//! Model — RouterConfig as read from file and flags, and the validated Settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::attributes::Attributes;
use super::error::ConfigError;
use crate::client::chunk::{DEFAULT_CHUNK_SIZE, MAX_CHUNK_SIZE, MIN_CHUNK_SIZE};
use crate::client::Compression;
use crate::parser::{InputFormat, MAX_LINE_SIZE};

/// Raw configuration. Required values stay optional here so that missing
/// ones can be reported by [`RouterConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    pub input_format: Option<String>,
    pub output: Option<String>,
    pub debug: bool,
    pub max_line_bytes: usize,
    pub graylog: GraylogConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraylogConfig {
    pub address: Option<String>,
    pub port: Option<u16>,
    /// `name:value,name:value`
    pub attributes: Option<String>,
    /// GELF `host` field; detected when unset
    pub host: Option<String>,
    pub compression: Compression,
    pub chunk_size: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            input_format: None,
            output: None,
            debug: false,
            max_line_bytes: MAX_LINE_SIZE,
            graylog: GraylogConfig::default(),
        }
    }
}

impl Default for GraylogConfig {
    fn default() -> Self {
        Self {
            address: None,
            port: None,
            attributes: None,
            host: None,
            compression: Compression::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    Graylog,
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Graylog => f.write_str("graylog"),
        }
    }
}

impl FromStr for OutputTarget {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graylog" => Ok(OutputTarget::Graylog),
            _ => Err(ConfigError::UnsupportedOutput(s.to_string())),
        }
    }
}

/// Validated, typed configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub input_format: InputFormat,
    pub output: OutputTarget,
    pub debug: bool,
    pub max_line_bytes: usize,
    pub graylog: GraylogSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraylogSettings {
    pub address: String,
    pub port: u16,
    pub attributes: Attributes,
    pub host: Option<String>,
    pub compression: Compression,
    pub chunk_size: usize,
}

impl RouterConfig {
    /// Check required values are present and sane, in the order the
    /// options are documented; the first problem found is reported.
    pub fn validate(&self) -> Result<Settings, ConfigError> {
        let input_format = required(&self.input_format, "the input format (logfmt, json or unknown)")?;
        let input_format: InputFormat = input_format
            .parse()
            .map_err(|_| ConfigError::UnsupportedInputFormat(input_format.to_string()))?;

        let output: OutputTarget =
            required(&self.output, "the output destination (graylog)")?.parse()?;

        let address = required(
            &self.graylog.address,
            "the IP address or hostname to connect to Graylog",
        )?;

        let port = match self.graylog.port {
            None => return Err(ConfigError::Missing("the UDP GELF port for Graylog")),
            Some(0) => return Err(ConfigError::InvalidPort("0".to_string())),
            Some(port) => port,
        };

        let attributes = match &self.graylog.attributes {
            Some(list) => list.parse()?,
            None => Attributes::default(),
        };

        let chunk_size = self.graylog.chunk_size;
        if !(MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&chunk_size) {
            return Err(ConfigError::InvalidChunkSize {
                value: chunk_size,
                min: MIN_CHUNK_SIZE,
                max: MAX_CHUNK_SIZE,
            });
        }

        if self.max_line_bytes == 0 {
            return Err(ConfigError::InvalidLineLimit);
        }

        Ok(Settings {
            input_format,
            output,
            debug: self.debug,
            max_line_bytes: self.max_line_bytes,
            graylog: GraylogSettings {
                address: address.to_string(),
                port,
                attributes,
                host: self.graylog.host.clone().filter(|h| !h.trim().is_empty()),
                compression: self.graylog.compression,
                chunk_size,
            },
        })
    }
}

fn required<'a>(value: &'a Option<String>, what: &'static str) -> Result<&'a str, ConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(what))
}
