use std::any::Any;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::BoxError;
use projectsync_core::error::{CoreError, ErrorKind, StoreError};
use projectsync_core::types::Timestamp;
use serde::Serialize;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds the HTTP-specific
/// malformed-request case. Implements [`IntoResponse`] to produce consistent
/// JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `projectsync_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request could not be parsed (bad JSON, wrong content type, non-numeric id).
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
    pub status: u16,
    pub timestamp: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    fn new(
        status: StatusCode,
        error: String,
        code: &'static str,
        details: Option<Vec<String>>,
        message: Option<String>,
    ) -> Self {
        Self {
            error,
            code,
            status: status.as_u16(),
            timestamp: chrono::Utc::now(),
            details,
            message,
        }
    }
}

/// The single kind -> status mapping used by the HTTP boundary.
pub fn status_for_kind(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorKind::ConstraintViolation => StatusCode::CONFLICT,
        ErrorKind::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Core(core) => core.kind(),
            AppError::BadRequest(_) => ErrorKind::ValidationFailed,
        }
    }

    fn body(&self, status: StatusCode) -> ErrorBody {
        let (error, code, details, message) = match self {
            AppError::Core(CoreError::NotFound { .. }) => {
                (self.to_string(), "NOT_FOUND", None, None)
            }
            AppError::Core(CoreError::Validation(details)) => (
                "Validation failed".to_string(),
                "VALIDATION_ERROR",
                Some(details.clone()),
                None,
            ),
            AppError::Core(CoreError::Store(StoreError::Constraint { message, .. })) => (
                "Data constraint violation".to_string(),
                "CONFLICT",
                None,
                Some(message.clone()),
            ),
            AppError::Core(CoreError::Store(err @ StoreError::Backend(_))) => (
                "Unexpected error".to_string(),
                "INTERNAL_ERROR",
                None,
                Some(err.to_string()),
            ),
            AppError::BadRequest(msg) => (
                "Malformed request".to_string(),
                "BAD_REQUEST",
                None,
                Some(msg.clone()),
            ),
        };

        ErrorBody::new(status, error, code, details, message)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for_kind(self.kind());
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, axum::Json(self.body(status))).into_response()
    }
}

/// Build an error response outside a handler (panics, timeouts) with the
/// same JSON body as [`AppError`].
pub fn error_response(
    status: StatusCode,
    error: &str,
    code: &'static str,
    message: Option<String>,
) -> Response {
    let body = ErrorBody::new(status, error.to_string(), code, None, message);
    (status, axum::Json(body)).into_response()
}

/// `CatchPanicLayer` handler: a panic is an unexpected failure and keeps
/// its payload as the message.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic payload".to_string()
    };
    tracing::error!(panic = %message, "Handler panicked");

    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Unexpected error",
        "INTERNAL_ERROR",
        Some(message),
    )
}

/// `HandleErrorLayer` handler for the request timeout middleware.
pub async fn middleware_error_response(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        tracing::warn!("Request timed out");
        return error_response(
            StatusCode::REQUEST_TIMEOUT,
            "Request timed out",
            "REQUEST_TIMEOUT",
            None,
        );
    }

    tracing::error!(error = %err, "Middleware failure");
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Unexpected error",
        "INTERNAL_ERROR",
        Some(err.to_string()),
    )
}
