use serde_json::Value;

use crate::parser::traits::*;
use crate::parser::{check_size, MAX_LINE_SIZE};

/// JSON decoder.
///
/// The line must hold exactly one JSON object. Each top-level member is
/// kept verbatim, nested objects and arrays included.
pub struct JsonDecoder {
    max_line_bytes: usize,
}

impl JsonDecoder {
    pub fn new() -> Self {
        Self::with_limit(MAX_LINE_SIZE)
    }

    pub fn with_limit(max_line_bytes: usize) -> Self {
        Self { max_line_bytes }
    }
}

impl Default for JsonDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldDecoder for JsonDecoder {
    fn decode(&self, line: &str) -> Result<DecodedLine, DecodeError> {
        check_size(line, self.max_line_bytes)?;

        let value: Value = serde_json::from_str(line)
            .map_err(|e| DecodeError::InvalidJson(e.to_string()))?;

        match value {
            Value::Object(fields) => Ok(DecodedLine::from_fields(fields)),
            _ => Err(DecodeError::NotAnObject),
        }
    }

    fn format(&self) -> InputFormat {
        InputFormat::Json
    }

    fn max_line_bytes(&self) -> Option<usize> {
        Some(self.max_line_bytes)
    }
}
