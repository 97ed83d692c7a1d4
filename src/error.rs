//! Unified error types for the lab service.
//!
//! Handlers return `Result<_, AppError>`; the [`IntoResponse`] impl is the
//! single boundary that turns any fault into the generic 500 response and
//! bumps the error counter. The error text is echoed back to the client on
//! purpose: leaking it is part of the lab material.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::metrics;

/// Unified error type for the lab service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// A query parameter was present but not an integer.
    #[error("invalid value for parameter '{name}': {value:?} is not an integer")]
    InvalidParam {
        /// The parameter name.
        name: &'static str,
        /// The raw value that failed to parse.
        value: String,
    },
}

/// JSON body of the generic error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// String representation of the error.
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        metrics::inc_errors();
        error!("request failed: {}", self);

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
