//! Request-level errors and their HTTP mapping.
//!
//! Every failure a request can hit ends here as a JSON `{"error": ...}`
//! response; nothing propagates past the router.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors produced while handling a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Required fields missing, empty, or the body is not the expected shape.
    #[error("Missing required fields")]
    Validation,

    /// The id segment is absent or not a UUID.
    #[error("Invalid user id {0}")]
    InvalidId(String),

    /// Well-formed id with no matching record.
    #[error("User not found")]
    NotFound,

    /// The outbound proxy call failed (refused, reset, timed out).
    #[error("Internal server error")]
    Transport(String),

    /// No route matched and the request could not be proxied.
    #[error("Endpoint not found")]
    Unroutable,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation | ApiError::InvalidId(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound | ApiError::Unroutable => StatusCode::NOT_FOUND,
            ApiError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Wire shape of every error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Transport(reason) = &self {
            tracing::warn!(reason = %reason, "Proxy transport failure");
        }
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::Validation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidId("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::Unroutable.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Transport("refused".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn transport_reason_is_not_exposed() {
        let err = ApiError::Transport("connection refused (os error 111)".into());
        assert_eq!(err.to_string(), "Internal server error");
    }

    #[test]
    fn invalid_id_message_includes_id() {
        assert_eq!(ApiError::InvalidId("abc".into()).to_string(), "Invalid user id abc");
    }
}
