//! Load — config loading from file, environment and command line.

use std::fs;
use std::path::Path;

use super::cli::Cli;
use super::error::ConfigError;
use super::model::RouterConfig;

impl RouterConfig {
    /// Build the configuration for this run.
    /// Priority: Command line / Environment Variables > Config File > Defaults
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli)?;
        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Values given on the command line (or through their environment
    /// variables) override whatever the file said.
    pub fn apply_cli(&mut self, cli: &Cli) -> Result<(), ConfigError> {
        if let Some(format) = &cli.input_format {
            self.input_format = Some(format.clone());
        }
        if let Some(output) = &cli.output {
            self.output = Some(output.clone());
        }
        if let Some(address) = &cli.graylog_address {
            self.graylog.address = Some(address.clone());
        }
        if let Some(port) = &cli.graylog_port {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
            self.graylog.port = Some(port);
        }
        if let Some(attributes) = &cli.graylog_attributes {
            self.graylog.attributes = Some(attributes.clone());
        }
        if cli.debug {
            self.debug = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Compression;
    use std::path::PathBuf;

    fn write_config(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("logrouter-{}-{}.toml", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_from_file_full() {
        let path = write_config(
            "full",
            r#"
input_format = "json"
output = "graylog"
debug = true
max_line_bytes = 4096

[graylog]
address = "graylog.internal"
port = 12201
attributes = "env:prod,region:us-east"
host = "web-01"
compression = "zlib"
chunk_size = 8192
"#,
        );

        let config = RouterConfig::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.input_format.as_deref(), Some("json"));
        assert!(config.debug);
        assert_eq!(config.max_line_bytes, 4096);
        assert_eq!(config.graylog.address.as_deref(), Some("graylog.internal"));
        assert_eq!(config.graylog.port, Some(12201));
        assert_eq!(config.graylog.host.as_deref(), Some("web-01"));
        assert_eq!(config.graylog.compression, Compression::Zlib);
        assert_eq!(config.graylog.chunk_size, 8192);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial_uses_defaults() {
        let path = write_config("partial", "[graylog]\nport = 5555\n");

        let config = RouterConfig::from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.graylog.port, Some(5555));
        assert_eq!(config.graylog.compression, Compression::Gzip);
        assert_eq!(config.input_format, None);
        assert_eq!(config.max_line_bytes, crate::parser::MAX_LINE_SIZE);
    }

    #[test]
    fn test_from_file_errors() {
        let missing = std::env::temp_dir().join("logrouter-does-not-exist.toml");
        assert!(matches!(RouterConfig::from_file(&missing), Err(ConfigError::Read { .. })));

        let path = write_config("bad", "[graylog]\ncompression = \"lz4\"\n");
        let result = RouterConfig::from_file(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_cli_overrides_file() {
        let path = write_config(
            "override",
            "input_format = \"json\"\noutput = \"graylog\"\n[graylog]\naddress = \"file-host\"\nport = 1111\nattributes = \"env:staging\"\n",
        );
        let cli = Cli {
            input_format: Some("logfmt".to_string()),
            graylog_port: Some("2222".to_string()),
            graylog_attributes: Some("env:prod".to_string()),
            config: Some(path.clone()),
            ..Cli::default()
        };

        let config = RouterConfig::load(&cli).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.input_format.as_deref(), Some("logfmt"));
        assert_eq!(config.output.as_deref(), Some("graylog"));
        assert_eq!(config.graylog.address.as_deref(), Some("file-host"));
        assert_eq!(config.graylog.port, Some(2222));
        assert_eq!(config.graylog.attributes.as_deref(), Some("env:prod"));
    }

    #[test]
    fn test_load_without_file() {
        let cli = Cli {
            input_format: Some("unknown".to_string()),
            output: Some("graylog".to_string()),
            graylog_address: Some("127.0.0.1".to_string()),
            graylog_port: Some("12201".to_string()),
            debug: true,
            ..Cli::default()
        };

        let settings = RouterConfig::load(&cli).unwrap().validate().unwrap();

        assert!(settings.debug);
        assert_eq!(settings.graylog.port, 12201);
    }

    #[test]
    fn test_invalid_port_flag() {
        for port in ["abc", "70000", "-1", ""] {
            let cli = Cli {
                graylog_port: Some(port.to_string()),
                ..Cli::default()
            };
            assert!(
                matches!(RouterConfig::load(&cli), Err(ConfigError::InvalidPort(_))),
                "port: {:?}",
                port
            );
        }
    }
}
