use std::fmt;

use serde::Serialize;

/// Closed set of severities a record can be emitted at.
///
/// Variants are ordered most to least severe, matching syslog numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Emergency,
    Alert,
    Critical,
    Error,
    Warning,
    Notice,
    Info,
    Debug,
}

impl Severity {
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    /// Look up the severity for an input `level` value.
    ///
    /// Matching is exact. Anything outside the table returns `None` and the
    /// record is not emitted.
    pub fn from_indicator(indicator: &str) -> Option<Self> {
        match indicator {
            "debug" => Some(Severity::Debug),
            "info" => Some(Severity::Info),
            "warn" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            "alert" => Some(Severity::Alert),
            "crit" => Some(Severity::Critical),
            "emergency" => Some(Severity::Emergency),
            "notice" => Some(Severity::Notice),
            _ => None,
        }
    }

    /// The input `level` value that selects this severity.
    pub fn indicator(&self) -> &'static str {
        match self {
            Severity::Emergency => "emergency",
            Severity::Alert => "alert",
            Severity::Critical => "crit",
            Severity::Error => "error",
            Severity::Warning => "warn",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }

    /// Syslog severity number, as carried in the GELF `level` field.
    pub fn syslog_level(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.indicator())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indicator_table() {
        let table = [
            ("debug", Severity::Debug, 7),
            ("info", Severity::Info, 6),
            ("notice", Severity::Notice, 5),
            ("warn", Severity::Warning, 4),
            ("error", Severity::Error, 3),
            ("crit", Severity::Critical, 2),
            ("alert", Severity::Alert, 1),
            ("emergency", Severity::Emergency, 0),
        ];

        for (indicator, severity, level) in table {
            assert_eq!(Severity::from_indicator(indicator), Some(severity));
            assert_eq!(severity.indicator(), indicator);
            assert_eq!(severity.syslog_level(), level);
        }
    }

    #[test]
    fn test_unrecognized_indicators() {
        for indicator in ["bogus", "", "INFO", "warning", "critical", "err", " info"] {
            assert_eq!(Severity::from_indicator(indicator), None, "{:?}", indicator);
        }
    }
}
