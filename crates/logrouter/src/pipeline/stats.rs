use std::fmt;

use serde::Serialize;

/// Per-run line counters.
///
/// Every line read ends up in exactly one of `emitted`, `dropped`,
/// `decode_failures` or `send_failures`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    pub lines: u64,
    pub emitted: u64,
    pub dropped: u64,
    pub decode_failures: u64,
    pub send_failures: u64,
}

impl PipelineStats {
    pub fn failures(&self) -> u64 {
        self.decode_failures + self.send_failures
    }
}

impl fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lines={} emitted={} dropped={} decode_failures={} send_failures={}",
            self.lines, self.emitted, self.dropped, self.decode_failures, self.send_failures
        )
    }
}
