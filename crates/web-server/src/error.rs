use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recommender::{IndexError, QueryError};
use serde_json::json;
use std::net::IpAddr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Query error: {0}")]
    Query(#[from] QueryError),
    #[error("Index error: {0}")]
    Index(#[from] IndexError),
    #[error("Request is not allowed from client {0}")]
    Forbidden(IpAddr),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Query(query_err) => {
                let status = match &query_err {
                    QueryError::UnknownAsset(_) => StatusCode::NOT_FOUND,
                    QueryError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                    QueryError::NoData(_) | QueryError::ArithmeticError(_) => {
                        StatusCode::UNPROCESSABLE_ENTITY
                    }
                    QueryError::Calculation(_) => {
                        tracing::error!(error = ?query_err, "Calculation error.");
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, query_err.to_string())
            }
            AppError::Index(index_err) => {
                tracing::error!(error = ?index_err, "Index rebuild failed.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to rebuild the metrics index".to_string(),
                )
            }
            AppError::Forbidden(ip) => (
                StatusCode::FORBIDDEN,
                format!("Request is not allowed from client {}", ip),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
