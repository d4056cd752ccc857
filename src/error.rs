//! Unified error types for the users service.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use strum::{Display, EnumString, IntoStaticStr};
use thiserror::Error;

/// Machine-readable error codes sent alongside error messages.
///
/// Names follow the routing framework's error taxonomy so clients can match
/// on them directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, IntoStaticStr)]
pub enum ErrorCode {
    /// The request (body, payload or arguments) failed validation.
    OriginalRequestNotValid,
    /// The addressed resource does not exist.
    PathNotFound,
}

impl ErrorCode {
    /// HTTP status used when this code reaches the transport.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::OriginalRequestNotValid => StatusCode::BAD_REQUEST,
            ErrorCode::PathNotFound => StatusCode::NOT_FOUND,
        }
    }
}

/// Errors raised by the user service and the users route.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// Input rejected: bad user data, bad patch, or a body that failed
    /// schema validation.
    #[error("{message}")]
    InvalidInput {
        /// Human readable message.
        message: String,
    },

    /// No user with the requested id.
    #[error("{message}")]
    NotFound {
        /// Human readable message.
        message: String,
    },
}

impl UserError {
    /// Invalid user data passed to `add_user`.
    pub fn invalid_user_data() -> Self {
        Self::InvalidInput {
            message: "Invalid user data".to_string(),
        }
    }

    /// Generic failure raised by a controller when the request did not
    /// pass the route's body schema.
    pub fn request_not_valid() -> Self {
        Self::InvalidInput {
            message: "Something went wrong".to_string(),
        }
    }

    /// Lookup by id found nothing.
    pub fn user_not_found() -> Self {
        Self::NotFound {
            message: "User not found".to_string(),
        }
    }

    /// Error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            UserError::InvalidInput { .. } => ErrorCode::OriginalRequestNotValid,
            UserError::NotFound { .. } => ErrorCode::PathNotFound,
        }
    }

    /// The human readable message.
    pub fn message(&self) -> &str {
        match self {
            UserError::InvalidInput { message } | UserError::NotFound { message } => message,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human readable message.
    pub message: String,
    /// Error code, e.g. `PathNotFound`.
    pub code: String,
}

impl From<&UserError> for ErrorBody {
    fn from(err: &UserError) -> Self {
        Self {
            message: err.message().to_string(),
            code: err.code().to_string(),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let code = self.code();
        crate::metrics::inc_user_errors(code);
        (code.status(), Json(ErrorBody::from(&self))).into_response()
    }
}

/// Top-level application error.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn codes_map_to_statuses() {
        assert_eq!(ErrorCode::OriginalRequestNotValid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::PathNotFound.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn codes_round_trip_through_strings() {
        assert_eq!(ErrorCode::PathNotFound.to_string(), "PathNotFound");
        assert_eq!(
            ErrorCode::from_str("OriginalRequestNotValid").unwrap(),
            ErrorCode::OriginalRequestNotValid
        );
    }

    #[test]
    fn user_errors_carry_message_and_code() {
        let err = UserError::user_not_found();
        assert_eq!(err.message(), "User not found");
        assert_eq!(err.code(), ErrorCode::PathNotFound);
        assert_eq!(err.to_string(), "User not found");

        let err = UserError::invalid_user_data();
        assert_eq!(err.code(), ErrorCode::OriginalRequestNotValid);

        let body = ErrorBody::from(&UserError::request_not_valid());
        assert_eq!(body.message, "Something went wrong");
        assert_eq!(body.code, "OriginalRequestNotValid");
    }
}
