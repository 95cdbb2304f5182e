//! Attributes — static `name:value` pairs attached to every forwarded record.

use std::str::FromStr;

use super::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromStr for Attributes {
    type Err = ConfigError;

    /// Parse `name:value,name:value`. Each entry is split at its first `:`
    /// and both halves are trimmed; blank entries are skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut pairs = Vec::new();

        for entry in s.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, value) = entry
                .split_once(':')
                .ok_or_else(|| ConfigError::InvalidAttribute(entry.to_string()))?;

            let name = name.trim();
            if name.is_empty() {
                return Err(ConfigError::InvalidAttribute(entry.to_string()));
            }

            pairs.push((name.to_string(), value.trim().to_string()));
        }

        Ok(Attributes(pairs))
    }
}
