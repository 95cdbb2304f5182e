//! Cli — command line flags. Every option except `--version` and `--debug`
//! can also come from the environment.

use std::path::PathBuf;

use clap::Parser;

pub const APP_NAME: &str = "LogRouter";

#[derive(Parser, Debug, Default, Clone)]
#[command(
    name = "logrouter",
    about = "Forward logfmt, JSON or plain log lines from a pipe to Graylog as GELF",
    disable_version_flag = true
)]
pub struct Cli {
    /// Display application version
    #[arg(long)]
    pub version: bool,

    /// Specify the input format; e.g. logfmt, json or unknown
    #[arg(long, env = "LOGROUTER_INPUT_FORMAT", value_name = "FORMAT")]
    pub input_format: Option<String>,

    /// Output to? Currently only graylog
    #[arg(long, env = "LOGROUTER_OUTPUT", value_name = "OUTPUT")]
    pub output: Option<String>,

    /// IP address or hostname to connect to Graylog
    #[arg(long, env = "LOGROUTER_GRAYLOG_ADDRESS", value_name = "HOST")]
    pub graylog_address: Option<String>,

    /// UDP GELF port
    #[arg(long, env = "LOGROUTER_GRAYLOG_PORT", value_name = "PORT")]
    pub graylog_port: Option<String>,

    /// Comma separated list of attributes to pass to Graylog in the form name:value
    #[arg(long, env = "LOGROUTER_GRAYLOG_ATTRIBUTES", value_name = "LIST")]
    pub graylog_attributes: Option<String>,

    /// Enable debugging?
    #[arg(long)]
    pub debug: bool,

    /// Optional TOML config file; flags and environment win over it
    #[arg(long, env = "LOGROUTER_CONFIG_FILE", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// `LogRouter v<version> build <build>`, as printed by `--version`.
pub fn version_string() -> String {
    format!(
        "{} v{} build {}",
        APP_NAME,
        env!("CARGO_PKG_VERSION"),
        option_env!("LOGROUTER_BUILD").unwrap_or("dev")
    )
}
