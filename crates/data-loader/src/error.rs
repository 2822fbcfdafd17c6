use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Invalid data settings: {0}")]
    Config(#[from] configuration::error::ConfigError),

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse records in '{file}': {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("Malformed record in '{file}' at line {line}: {reason}")]
    MalformedRecord {
        file: String,
        line: u64,
        reason: String,
    },

    #[error("Cannot derive an asset symbol from source name '{0}'")]
    InvalidSourceName(PathBuf),

    #[error("Sources '{first}' and '{second}' both map to asset '{symbol}'")]
    DuplicateSymbol {
        symbol: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("No price sources found in '{0}'")]
    NoSources(PathBuf),

    #[error("Loading task failed: {0}")]
    TaskFailed(String),
}
