//! HTTP-facing error taxonomy for the proxy routes.
//!
//! Bodies are short plain-text strings. Provider detail never reaches the
//! caller; it is logged at the handler boundary instead.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No caller identity could be resolved.
    #[error("Unauthorized")]
    Unauthorized,

    /// A required field is missing or invalid.
    #[error("{0}")]
    BadRequest(String),

    /// The provider API key is not configured on the server.
    #[error("OpenAI API key not configured")]
    Misconfigured,

    /// Anything else, including every provider-side failure.
    #[error("Internal error")]
    Internal,
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Misconfigured | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(ApiError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Misconfigured.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(ApiError::Internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_message_is_body() {
        let err = ApiError::BadRequest("amount is required".into());
        assert_eq!(err.to_string(), "amount is required");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn misconfigured_message() {
        assert_eq!(ApiError::Misconfigured.to_string(), "OpenAI API key not configured");
    }
}
