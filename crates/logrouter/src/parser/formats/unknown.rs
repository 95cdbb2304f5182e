use serde_json::Value;

use crate::parser::traits::*;

/// Severity assigned to every unstructured line.
pub const UNKNOWN_LEVEL: &str = "notice";

/// Unknown-format decoder (pass-through with a fixed severity)
///
/// The whole line becomes the message; the field mapping only carries
/// `level=notice`. Never fails and has no line length limit.
#[derive(Debug, Default)]
pub struct UnknownDecoder;

impl UnknownDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl FieldDecoder for UnknownDecoder {
    fn decode(&self, line: &str) -> Result<DecodedLine, DecodeError> {
        let mut fields = Fields::new();
        fields.insert("level".to_string(), Value::String(UNKNOWN_LEVEL.to_string()));

        Ok(DecodedLine {
            fields,
            message: Some(Value::String(line.to_string())),
        })
    }

    fn format(&self) -> InputFormat {
        InputFormat::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_decoder_wraps_line() {
        let decoder = UnknownDecoder::new();

        let decoded = decoder.decode("hello world").unwrap();

        assert_eq!(decoded.message, Some(Value::String("hello world".to_string())));
        assert_eq!(decoded.fields.len(), 1);
        assert_eq!(decoded.fields["level"], Value::String("notice".to_string()));
    }

    #[test]
    fn test_unknown_decoder_ignores_structure() {
        let decoder = UnknownDecoder::new();

        for line in ["level=error msg=boom", r#"{"level":"debug"}"#, "", "unterminated \"quote"] {
            let decoded = decoder.decode(line).unwrap();
            assert_eq!(decoded.message, Some(Value::String(line.to_string())));
            assert_eq!(decoded.fields["level"], Value::String("notice".to_string()));
            assert!(!decoded.fields.contains_key("msg"));
        }
    }

    #[test]
    fn test_unknown_decoder_accepts_any_length() {
        let decoder = UnknownDecoder::new();
        let long_line = "x".repeat(crate::parser::MAX_LINE_SIZE + 1);

        let decoded = decoder.decode(&long_line).unwrap();

        assert_eq!(decoded.message, Some(Value::String(long_line)));
        assert_eq!(decoded.fields["level"], Value::String("notice".to_string()));
        assert_eq!(decoder.max_line_bytes(), None);
    }
}
