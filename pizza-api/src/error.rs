use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pizza_core::CoreError;

use crate::response::ErrorEnvelope;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    BadGatewayError(String),
    InternalServerError(String),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::AuthenticationError(_) => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            AppError::AuthorizationError(_) => (StatusCode::FORBIDDEN, "Forbidden"),
            AppError::ValidationError(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            AppError::NotFoundError(_) => (StatusCode::NOT_FOUND, "Not Found"),
            AppError::ConflictError(_) => (StatusCode::CONFLICT, "Conflict"),
            AppError::BadGatewayError(_) => (StatusCode::BAD_GATEWAY, "Payment Gateway Error"),
            AppError::InternalServerError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let error = match self {
            AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFoundError(msg)
            | AppError::ConflictError(msg)
            | AppError::BadGatewayError(msg) => msg,
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                "Internal Server Error".to_string()
            }
        };

        let body = Json(ErrorEnvelope {
            status_code: status.as_u16(),
            message,
            error,
        });

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(_) | CoreError::InvalidSelection(_) => AppError::ValidationError(err.to_string()),
            CoreError::Unauthorized(msg) => AppError::AuthenticationError(msg),
            CoreError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            CoreError::DuplicateReference(_) => AppError::ConflictError(err.to_string()),
            CoreError::PaymentGatewayError(_) => AppError::BadGatewayError(err.to_string()),
            CoreError::NotificationError(_) | CoreError::StorageError(_) => {
                AppError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::ValidationError(rejection.body_text())
    }
}
