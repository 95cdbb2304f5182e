//! Record — splits a decoded line into message, severity and metadata.

mod severity;

pub use severity::Severity;

use std::fmt;

use serde_json::Value;

use crate::parser::{DecodedLine, Fields};

pub const MESSAGE_KEY: &str = "msg";
pub const LEVEL_KEY: &str = "level";

/// The message body of a record, in whatever type the input carried.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MessageValue(Option<Value>);

impl MessageValue {
    pub fn new(value: Option<Value>) -> Self {
        Self(value)
    }

    pub fn is_absent(&self) -> bool {
        self.0.is_none()
    }

    /// Default string form: strings as-is, other values as compact JSON,
    /// an absent message as empty text.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for MessageValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => Ok(()),
            Some(Value::String(s)) => f.write_str(s),
            Some(other) => write!(f, "{}", other),
        }
    }
}

/// A normalized record, ready for dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub message: MessageValue,
    /// Raw `level` value; only string values count as an indicator.
    pub severity: Option<String>,
    /// Every decoded field except `msg`. `level` stays in here.
    pub metadata: Fields,
}

/// Pull the message and severity indicator out of a decoded line.
pub fn normalize(decoded: DecodedLine) -> Record {
    let DecodedLine { mut fields, message } = decoded;

    let message = message.or_else(|| fields.remove(MESSAGE_KEY));

    let severity = fields
        .get(LEVEL_KEY)
        .and_then(Value::as_str)
        .map(str::to_string);

    Record {
        message: MessageValue::new(message),
        severity,
        metadata: fields,
    }
}
