//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service.

use crate::config::ConfigError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tongue_balance_core::ports::PortError;
use tracing::error;
use utoipa::ToSchema;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    /// Represents an error from the underlying database library.
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The request itself was malformed (bad multipart body, unreadable upload).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// The JSON body returned for every failed request.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Port(port) => port_status(port),
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Maps a port error onto the HTTP status the client sees.
pub fn port_status(e: &PortError) -> StatusCode {
    match e {
        PortError::DuplicateAccount | PortError::Busy => StatusCode::CONFLICT,
        PortError::InvalidCredential | PortError::Unauthorized => StatusCode::UNAUTHORIZED,
        PortError::NoImage => StatusCode::BAD_REQUEST,
        // A disabled feature looks the same as one that was never built.
        PortError::NotFound(_) | PortError::FeatureDisabled(_) => StatusCode::NOT_FOUND,
        PortError::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
        PortError::MissingCredential | PortError::Remote(_) | PortError::EmptyResponse => {
            StatusCode::BAD_GATEWAY
        }
        PortError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Port(port) if status != StatusCode::INTERNAL_SERVER_ERROR => port.to_string(),
            ApiError::BadRequest(reason) => reason.clone(),
            other => {
                error!("Request failed: {}", other);
                "Internal server error".to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_errors_map_to_statuses() {
        assert_eq!(port_status(&PortError::DuplicateAccount), StatusCode::CONFLICT);
        assert_eq!(port_status(&PortError::InvalidCredential), StatusCode::UNAUTHORIZED);
        assert_eq!(port_status(&PortError::NoImage), StatusCode::BAD_REQUEST);
        assert_eq!(port_status(&PortError::Busy), StatusCode::CONFLICT);
        assert_eq!(
            port_status(&PortError::FeatureDisabled("auth.loginButton".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            port_status(&PortError::Unsupported("no microphone".into())),
            StatusCode::NOT_IMPLEMENTED
        );
        assert_eq!(port_status(&PortError::EmptyResponse), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_details_are_not_leaked() {
        let response = ApiError::Internal("pool exhausted".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = ApiError::BadRequest("missing file".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
