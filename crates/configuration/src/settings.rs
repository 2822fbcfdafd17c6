use crate::error::ConfigError;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.data.delimiter_byte()?;
        if self.data.price_column == 0 {
            return Err(ConfigError::ValidationError(
                "data.price_column must be greater than 0; column 0 holds the timestamp".to_string(),
            ));
        }
        if self.data.extension.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "data.extension must not be empty".to_string(),
            ));
        }
        if self.server.trusted_clients.is_empty() {
            return Err(ConfigError::ValidationError(
                "server.trusted_clients must list at least one address".to_string(),
            ));
        }
        Ok(())
    }
}

/// Where the per-asset price files live and how their records are laid out.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    /// Directory holding one `<SYMBOL>_<suffix>.<extension>` file per asset.
    pub prices_dir: PathBuf,
    /// Only files with this extension are treated as price sources.
    pub extension: String,
    /// Field separator; must be a single ASCII character.
    pub delimiter: String,
    /// Zero-based index of the price field within a record.
    pub price_column: usize,
}

impl DataSettings {
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(ConfigError::ValidationError(format!(
                "data.delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            prices_dir: PathBuf::from("prices"),
            extension: "csv".to_string(),
            delimiter: ",".to_string(),
            price_column: 2,
        }
    }
}

/// Settings for the HTTP shell.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    /// Client addresses allowed to reach the query routes.
    pub trusted_clients: Vec<IpAddr>,
}

impl ServerSettings {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
            trusted_clients: vec![IpAddr::V4(Ipv4Addr::LOCALHOST)],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence when set.
    pub level: String,
    /// When set, logs are also written to a daily-rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "recommender.log".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.data.delimiter_byte().unwrap(), b',');
        assert_eq!(config.server.socket_addr().to_string(), "127.0.0.1:8080");
    }

    #[test]
    fn rejects_multi_character_delimiter() {
        let mut config = Config::default();
        config.data.delimiter = ";;".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn rejects_price_column_overlapping_timestamp() {
        let mut config = Config::default();
        config.data.price_column = 0;
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn rejects_empty_trusted_clients() {
        let mut config = Config::default();
        config.server.trusted_clients.clear();
        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }
}
