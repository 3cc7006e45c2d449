use axum::http::{HeaderValue, Method, header, header::InvalidHeaderValue};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates a CORS layer for the given origins.
///
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: Content-Type, Accept
/// - 1 hour max age
///
/// Fails when an origin is not a valid header value.
pub fn create_cors_layer<S: AsRef<str>>(origins: &[S]) -> Result<CorsLayer, InvalidHeaderValue> {
    let allowed_origins = origins
        .iter()
        .map(|origin| HeaderValue::from_str(origin.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_cors_layer_accepts_origins() {
        assert!(create_cors_layer(&["http://localhost:3000", "https://example.com"]).is_ok());
    }

    #[test]
    fn test_create_cors_layer_rejects_invalid_origin() {
        assert!(create_cors_layer(&["http://bad\norigin"]).is_err());
    }
}
