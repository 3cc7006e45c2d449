//! Custom extractors for Axum handlers.
//!
//! These wrap axum's own extractors so that rejections are rendered with the
//! shared [`ErrorResponse`](crate::errors::ErrorResponse) envelope.

pub mod json_body;
pub mod query_params;

pub use json_body::JsonBody;
pub use query_params::QueryParams;
