use crate::error::ConfigError;
use crate::settings::Config;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod logging;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use logging::init_tracing;
pub use settings::{DataSettings, LoggingSettings, ServerSettings};

/// Prefix of the environment variables that override file settings,
/// e.g. `RECOMMENDER__SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "RECOMMENDER";

/// Loads the application configuration from the given TOML file.
///
/// This function is the primary entry point for this crate. It reads the configuration file,
/// layers `RECOMMENDER__*` environment variables on top, deserializes the result into our
/// strongly-typed `Config` struct and validates it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    build(path, true)
}

/// Like [`load_config`], but a missing file falls back to the built-in defaults.
pub fn load_config_or_default(path: &Path) -> Result<Config, ConfigError> {
    build(path, false)
}

fn build(path: &Path, required: bool) -> Result<Config, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(required))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.trusted_clients")
                .try_parsing(true),
        )
        .build()?;

    // Attempt to deserialize the entire configuration into our `Config` struct
    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;

    Ok(config)
}

/// The `--config` flag shared by every binary in the workspace.
#[cfg(feature = "clap")]
#[derive(Debug, Clone, clap::Args)]
pub struct ConfigArgs {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    pub config: std::path::PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::net::IpAddr;

    #[test]
    fn loads_sections_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[data]
prices_dir = "/srv/prices"
delimiter = ";"
price_column = 3

[server]
port = 9001
trusted_clients = ["10.0.0.7", "127.0.0.1"]
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.data.prices_dir, Path::new("/srv/prices"));
        assert_eq!(config.data.delimiter_byte().unwrap(), b';');
        assert_eq!(config.data.price_column, 3);
        // Unspecified keys keep their defaults.
        assert_eq!(config.data.extension, "csv");
        assert_eq!(config.server.port, 9001);
        assert_eq!(
            config.server.trusted_clients,
            vec!["10.0.0.7".parse::<IpAddr>().unwrap(), "127.0.0.1".parse().unwrap()]
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn missing_file_is_an_error_unless_defaults_are_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert!(matches!(load_config(&path), Err(ConfigError::LoadError(_))));

        let config = load_config_or_default(&path).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn invalid_values_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[data]\ndelimiter = \"ab\"\n").unwrap();

        assert!(matches!(load_config(&path), Err(ConfigError::ValidationError(_))));
    }
}
