//! Hostname detection for the GELF `host` field.

use std::env;

use tracing::{debug, warn};

/// Get the system hostname
///
/// Tries, in order:
/// 1. HOSTNAME environment variable
/// 2. System hostname via `gethostname()`
/// 3. Fallback to "localhost"
#[must_use]
pub fn detect_hostname() -> String {
    if let Ok(hostname) = env::var("HOSTNAME") {
        let hostname = hostname.trim();
        if !hostname.is_empty() {
            return hostname.to_string();
        }
    }

    if let Some(hostname) = system_hostname() {
        return hostname;
    }

    warn!("Could not determine hostname, using 'localhost'");
    "localhost".to_string()
}

#[cfg(unix)]
fn system_hostname() -> Option<String> {
    match nix::unistd::gethostname() {
        Ok(hostname) => hostname
            .to_str()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string),
        Err(e) => {
            debug!("gethostname failed: {}", e);
            None
        }
    }
}

#[cfg(not(unix))]
fn system_hostname() -> Option<String> {
    debug!("No gethostname on this platform, trying COMPUTERNAME");
    env::var("COMPUTERNAME")
        .ok()
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
}
