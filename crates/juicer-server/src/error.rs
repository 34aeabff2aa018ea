//! Error types for the juicer HTTP layer.
//!
//! [`ApiError`] translates domain failures into HTTP responses via
//! its [`IntoResponse`] implementation: usage and physical-limit
//! errors map to 400 with a JSON envelope, internal failures to 500.
//! The domain error's message passes through unchanged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use juicer_core::{ErrorKind, JuicerError};

/// Errors that can occur in the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A domain operation failed.
    #[error(transparent)]
    Domain(#[from] JuicerError),

    /// A request body failed validation before reaching the domain.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Metrics encoding failed.
    #[error("metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl ApiError {
    /// The metrics label recorded for this failure.
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Domain(err) => err.kind().as_str(),
            Self::InvalidRequest(_) => ErrorKind::Validation.as_str(),
            Self::Metrics(_) => ErrorKind::Internal.as_str(),
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::Domain(err) => match err.kind() {
                ErrorKind::State
                | ErrorKind::Validation
                | ErrorKind::Overflow
                | ErrorKind::Maintenance => StatusCode::BAD_REQUEST,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Metrics(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
            "error_type": self.error_type(),
        });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use juicer_types::MachineState;

    use super::*;

    #[test]
    fn domain_errors_map_to_bad_request() {
        let err = ApiError::Domain(JuicerError::InvalidState {
            operation: "feed_fruit",
            state: MachineState::Stopped,
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_type(), "state_error");
    }

    #[test]
    fn internal_errors_map_to_500() {
        let err = ApiError::Domain(JuicerError::ArithmeticOverflow);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
