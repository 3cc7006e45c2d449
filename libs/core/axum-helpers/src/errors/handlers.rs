use std::any::Any;

use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

/// Handler for 404 Not Found errors.
///
/// Used as the router fallback.
pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found".to_string(),
        ErrorCode::NotFound,
    )
}

/// Handler for 405 Method Not Allowed errors.
pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed.default_message().to_string(),
        ErrorCode::MethodNotAllowed,
    )
}

/// Process-wide handler for panics raised inside request handlers.
///
/// Plugged into `tower_http::catch_panic::CatchPanicLayer::custom`. The panic
/// payload is logged; the client only sees the generic 500 envelope.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };

    tracing::error!(
        error_code = ErrorCode::InternalError.code(),
        panic = %detail,
        "Request handler panicked"
    );

    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorCode::InternalError.default_message().to_string(),
        ErrorCode::InternalError,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorResponse;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_panic_response_is_generic() {
        let response = panic_response(Box::new("index out of bounds".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "INTERNAL_ERROR");
        assert!(!body.message.contains("index"));
    }

    #[tokio::test]
    async fn test_not_found_fallback() {
        let response = not_found().await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
