pub use super::model::{DecodeError, DecodedLine, Fields, InputFormat};

pub trait FieldDecoder: Send + Sync {
    /// decode one raw input line into a field mapping
    fn decode(&self, line: &str) -> Result<DecodedLine, DecodeError>;
    fn format(&self) -> InputFormat;

    /// Longest line, in bytes, this decoder accepts. `None` means unbounded.
    fn max_line_bytes(&self) -> Option<usize> {
        None
    }
}
