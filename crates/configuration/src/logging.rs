use crate::error::ConfigError;
use crate::settings::LoggingSettings;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber.
///
/// Logs always go to stdout. When `settings.directory` is set they are also written to a
/// daily-rolling file; the returned guard must be kept alive for the lifetime of the process
/// or buffered lines are lost on exit.
pub fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>, ConfigError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .map_err(|e| {
            ConfigError::ValidationError(format!("invalid log level '{}': {}", settings.level, e))
        })?;

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, &settings.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .try_init()
        .map_err(|e| ConfigError::Logging(e.to_string()))?;

    tracing::info!(
        level = %settings.level,
        directory = ?settings.directory,
        "Logging initialised."
    );
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unparseable_level() {
        // Only reached when RUST_LOG is unset or itself invalid.
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let settings = LoggingSettings {
            level: "recommender=loud".to_string(),
            ..LoggingSettings::default()
        };
        assert!(matches!(init_tracing(&settings), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn writes_startup_line_to_rolling_file_and_installs_once() {
        let dir = tempfile::tempdir().unwrap();
        let settings = LoggingSettings {
            level: "info".to_string(),
            directory: Some(dir.path().to_path_buf()),
            file_prefix: "test.log".to_string(),
        };

        let guard = init_tracing(&settings).unwrap();
        assert!(guard.is_some());

        // A second global subscriber cannot be installed.
        assert!(matches!(init_tracing(&settings), Err(ConfigError::Logging(_))));

        drop(guard);
        let file = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .find(|path| path.file_name().unwrap().to_string_lossy().starts_with("test.log"))
            .unwrap();
        let contents = std::fs::read_to_string(file).unwrap();
        assert!(contents.contains("Logging initialised."));
    }
}
