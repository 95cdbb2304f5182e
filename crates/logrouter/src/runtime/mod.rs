//! Runtime module — process lifecycle: logging, boot, input checks, shutdown.

pub mod boot;
pub mod stdin;
pub mod stop;

#[cfg(test)]
pub(crate) mod capture;

use std::io;

use thiserror::Error;
use tokio::io::BufReader;
use tracing::{error, info, Instrument};

use crate::client::TransportError;
use crate::conf::cli::version_string;
use crate::conf::{ConfigError, Settings};

/// Failures that stop the router before or while it runs.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Input must come from a pipe; e.g. `my-service | logrouter ...`")]
    NotAPipe,

    #[error("Unable to connect to Graylog: {0}")]
    Connect(#[from] TransportError),

    #[error("Failed to read input: {0}")]
    Input(#[from] io::Error),
}

impl StartupError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

/// Run the router inside the `app` span and return the process exit status.
///
/// Logging must already be initialised; configuration errors are reported
/// here so they carry the same span as everything else.
pub async fn launch(settings: Result<Settings, ConfigError>) -> i32 {
    async move {
        let result = match settings {
            Ok(settings) => serve(settings).await,
            Err(e) => Err(StartupError::from(e)),
        };

        match result {
            Ok(()) => 0,
            Err(e) => {
                error!("{}", e);
                e.exit_code()
            }
        }
    }
    .instrument(boot::app_span())
    .await
}

async fn serve(settings: Settings) -> Result<(), StartupError> {
    info!("Starting {}", version_string());

    if !stdin::stdin_is_pipe()? {
        return Err(StartupError::NotAPipe);
    }

    let client = boot::boot(&settings).await?;
    let input = BufReader::new(tokio::io::stdin());
    let stats = boot::run(&settings, &client, input, stop::shutdown_signal()).await?;

    if stats.failures() > 0 {
        info!("{} line(s) could not be forwarded", stats.failures());
    }
    Ok(())
}
