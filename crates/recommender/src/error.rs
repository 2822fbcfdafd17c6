use analytics::AnalyticsError;
use data_loader::LoaderError;
use thiserror::Error;

/// Failures while building a `MetricsIndex`. All of them abort startup.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Failed to load price series: {0}")]
    Loader(#[from] LoaderError),

    #[error("Failed to calculate metrics: {0}")]
    Analytics(#[from] AnalyticsError),

    #[error("More than one series was supplied for asset '{0}'")]
    DuplicateSymbol(String),
}

/// Failures returned to callers of `QueryService`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No data: {0}")]
    NoData(String),

    #[error("Arithmetic error: {0}")]
    ArithmeticError(String),

    #[error("An internal calculation error occurred: {0}")]
    Calculation(String),
}

impl From<AnalyticsError> for QueryError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::NoData(symbol) => {
                QueryError::NoData(format!("no price data recorded for '{}'", symbol))
            }
            AnalyticsError::DivisionByZero(metric) => {
                QueryError::ArithmeticError(format!("{} is undefined: minimum price is zero", metric))
            }
            AnalyticsError::Calculation(message) => QueryError::Calculation(message),
        }
    }
}
