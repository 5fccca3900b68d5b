use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Every failure a handler can surface to the caller.
#[derive(Debug, Error)]
pub enum AppError {
    // ── Session resolution ──────────────────────────────────────────
    #[error("No token provided")]
    Unauthenticated,

    #[error("Invalid or expired token")]
    InvalidOrExpiredToken,

    // ── Guest mode ──────────────────────────────────────────────────
    #[error("Guest mode limit: Only {limit} stocks allowed per session")]
    GuestLimitExceeded { limit: i64 },

    #[error("Cannot migrate portfolio for guest user")]
    InvalidMigrationSource,

    #[error("Invalid guest ID")]
    InvalidGuestReference,

    // ── Portfolio ───────────────────────────────────────────────────
    #[error("{0}")]
    InvalidEntry(String),

    #[error("Stock not found")]
    EntryNotFound,

    // ── Accounts ────────────────────────────────────────────────────
    #[error("{0}")]
    Validation(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailTaken,

    // ── Request shape ───────────────────────────────────────────────
    /// Body or path that axum could not extract. Keeps axum's status
    /// (400, 415 or 422) and its message.
    #[error("{message}")]
    MalformedRequest { status: StatusCode, message: String },

    // ── Infrastructure ──────────────────────────────────────────────
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthenticated | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidOrExpiredToken | AppError::GuestLimitExceeded { .. } => {
                StatusCode::FORBIDDEN
            }
            AppError::InvalidMigrationSource
            | AppError::InvalidGuestReference
            | AppError::InvalidEntry(_)
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::EntryNotFound => StatusCode::NOT_FOUND,
            AppError::EmailTaken => StatusCode::CONFLICT,
            AppError::MalformedRequest { status, .. } => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedRequest {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let AppError::Internal(e) = &self {
            error!(error = %e, "internal error");
        }
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(AppError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidOrExpiredToken.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            AppError::GuestLimitExceeded { limit: 5 }.status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(AppError::InvalidMigrationSource.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::InvalidGuestReference.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::EntryNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::EmailTaken.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_error_hides_its_cause() {
        let err = AppError::from(anyhow::anyhow!("connection refused to 10.0.0.3"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "internal error");
    }

    #[test]
    fn malformed_request_keeps_its_status() {
        let err = AppError::MalformedRequest {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: "missing field `quantity`".into(),
        };
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.to_string(), "missing field `quantity`");
    }

    #[test]
    fn guest_limit_message_names_the_cap() {
        let msg = AppError::GuestLimitExceeded { limit: 5 }.to_string();
        assert!(msg.contains("Only 5 stocks"));
    }
}
