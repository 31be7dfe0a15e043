//! Error types for the callback service
//!
//! Recoverable upstream failures never reach this module: the GitHub
//! collaborators absorb them and hand back `None`. What remains is either a
//! client-facing rejection or a fault in how the service was set up.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Startup configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Required variable absent or empty
    #[error("{0} is not set; add it to the environment or .env")]
    Missing(&'static str),

    /// Variable present but unusable
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Request-level error type
///
/// Bodies are deliberately bare: `{"status": <code>}`. Details go to the log.
#[derive(Debug, Error)]
pub enum AppError {
    /// No `code` query parameter (400)
    #[error("authorization code missing from callback")]
    MissingCode,

    /// Code could not be exchanged for a token (400)
    #[error("authorization code could not be exchanged for a token")]
    TokenExchange,

    /// Configuration error (500)
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client could not be built (500)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingCode | AppError::TokenExchange => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::HttpClient(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "callback aborted");
        } else {
            tracing::info!(error = %self, "callback rejected");
        }

        let body = Json(serde_json::json!({ "status": status.as_u16() }));
        (status, body).into_response()
    }
}

/// Result type alias using AppError
pub type Result<T> = std::result::Result<T, AppError>;
