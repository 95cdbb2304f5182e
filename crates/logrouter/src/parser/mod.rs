/// Input line decoding
///
/// Turns one raw line of a known input encoding into a field mapping.
///
/// # Architecture
///
/// - `traits.rs`: the `FieldDecoder` seam used by the pipeline
/// - `model.rs`: field mapping, input format and error types
/// - `formats/`: one decoder per supported input format
///
/// Decoders never special-case `msg` or `level`; that is the job of
/// `crate::record`.

pub mod traits;
pub mod formats;
pub mod model;

// Re-export commonly used types
pub use traits::FieldDecoder;
pub use model::{DecodeError, DecodedLine, Fields, InputFormat};

// Constants
pub const MAX_LINE_SIZE: usize = 1_048_576; // 1MB

/// Build the decoder for `format`. Structured formats reject lines longer
/// than `max_line_bytes`; unknown input has no limit.
pub fn decoder_for(format: InputFormat, max_line_bytes: usize) -> Box<dyn FieldDecoder> {
    match format {
        InputFormat::Logfmt => Box::new(formats::LogfmtDecoder::with_limit(max_line_bytes)),
        InputFormat::Json => Box::new(formats::JsonDecoder::with_limit(max_line_bytes)),
        InputFormat::Unknown => Box::new(formats::UnknownDecoder::new()),
    }
}

pub(crate) fn check_size(line: &str, limit: usize) -> Result<(), DecodeError> {
    if line.len() > limit {
        return Err(DecodeError::LineTooLarge(line.len(), limit));
    }
    Ok(())
}
