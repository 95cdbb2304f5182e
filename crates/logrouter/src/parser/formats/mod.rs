/// Individual input format decoders

pub mod json;
pub mod logfmt;
pub mod unknown;

// Re-export decoder implementations
pub use json::JsonDecoder;
pub use logfmt::LogfmtDecoder;
pub use unknown::UnknownDecoder;
