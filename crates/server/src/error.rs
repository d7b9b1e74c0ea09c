//! Mapping of pipeline failures to JSON error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use gleaner_core::{ErrorKind, GleanError};
use serde_json::json;
use thiserror::Error;

/// Errors returned by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A failure from the fetch/extract pipeline.
    #[error(transparent)]
    Glean(#[from] GleanError),

    /// The request body was not the expected JSON object.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// The whole request exceeded the server's time budget.
    #[error("Request timed out after {0} seconds")]
    RequestTimeout(u64),

    /// A middleware failed outside the pipeline.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::RequestTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Glean(err) => status_for(err.kind()),
        }
    }
}

/// Status code for each error kind.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::MissingInput => StatusCode::BAD_REQUEST,
        ErrorKind::TransportFailure | ErrorKind::UpstreamStatusFailure => StatusCode::BAD_GATEWAY,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::NoContentRegion => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::ParseFailure | ErrorKind::Io => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::from(GleanError::MissingInput).status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(GleanError::UpstreamStatus { status: 404, reason: "Not Found".into() }).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(ApiError::from(GleanError::Timeout { timeout: 3 }).status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(ApiError::from(GleanError::NoContentRegion).status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            ApiError::from(GleanError::HtmlParseError("x".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ApiError::InvalidBody("eof".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::RequestTimeout(35).status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(ApiError::Internal("boom".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_message_is_transparent() {
        let err = ApiError::from(GleanError::NoContentRegion);
        assert_eq!(err.to_string(), "Could not find main content");
    }
}
