//! Conf module — command line, config file, validation and static attributes.

pub mod attributes;
pub mod cli;
pub mod error;
pub mod hostname;
pub mod load;
pub mod model;

pub use attributes::Attributes;
pub use cli::Cli;
pub use error::ConfigError;
pub use model::{GraylogConfig, GraylogSettings, OutputTarget, RouterConfig, Settings};
