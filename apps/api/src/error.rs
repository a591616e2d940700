use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use subportal_core::AppError;

/// HTTP API error wrapper around core application errors.
///
/// Rendered as a plain-text body.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            AppError::Validation(_) | AppError::NoFileSupplied(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::DirectoryUnavailable(_)
            | AppError::MemberNotFound(_)
            | AppError::MalformedRoleId(_) => StatusCode::BAD_GATEWAY,
            AppError::StorageUnavailable(_)
            | AppError::IncompleteWrite { .. }
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.0.to_string()).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;
