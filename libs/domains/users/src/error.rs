use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

/// Failures the users domain does not model as outcomes.
///
/// Validation, missing users and rule violations are values (see
/// [`crate::outcome`]); everything here renders as a 500.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Repository(msg) => AppError::Storage(msg),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_every_variant_is_a_500() {
        let repository = UserError::Repository("lock poisoned".to_string()).into_response();
        assert_eq!(repository.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let internal = UserError::Internal("boom".to_string()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
