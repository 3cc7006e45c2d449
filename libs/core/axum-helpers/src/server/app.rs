use super::shutdown::{ShutdownCoordinator, coordinated_shutdown};
use crate::errors::handlers::{method_not_allowed, not_found, panic_response};
use crate::http::{create_cors_layer, security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Creates a configured Axum router with common middleware and documentation.
///
/// This function sets up:
/// - OpenAPI documentation (Swagger UI at `/swagger-ui`, JSON at `/api-docs/openapi.json`)
/// - API routes nested under `/api`
/// - Panic catching, tracing, security headers, compression
/// - CORS when `server_config.cors_allowed_origins` is not empty
/// - JSON 404 / 405 fallbacks
///
/// Domain routers apply their own state; this function only adds
/// cross-cutting concerns.
///
/// # Errors
/// Returns an error if a configured CORS origin is not a valid header value.
///
/// # Example
/// ```ignore
/// use axum_helpers::server::create_router;
///
/// let api_routes = Router::new().nest("/users", users_router);
/// let router = create_router::<ApiDoc>(api_routes, &config.server)?;
/// ```
pub fn create_router<T>(apis: Router, server_config: &ServerConfig) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    let router = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest("/api", apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        // Innermost so the trace layer records the 500.
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(CompressionLayer::new());

    if server_config.cors_allowed_origins.is_empty() {
        info!("CORS_ALLOWED_ORIGIN not set, CORS layer disabled");
        return Ok(router);
    }

    let cors_layer = create_cors_layer(&server_config.cors_allowed_origins).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
        )
    })?;
    info!(
        "CORS configured with allowed origins: {}",
        server_config.cors_allowed_origins.join(",")
    );

    Ok(router.layer(cors_layer))
}

/// Production-ready server with coordinated shutdown and cleanup.
///
/// - Graceful shutdown on SIGINT/SIGTERM
/// - Cleanup future bounded by `shutdown_timeout`
///
/// # Example
/// ```ignore
/// create_production_app(router, &config.server, Duration::from_secs(30), async {
///     info!("Flushing state");
/// })
/// .await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let (coordinator, _rx) = ShutdownCoordinator::new();
    let shutdown_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let cleanup_handle = tokio::spawn(async move {
        shutdown_handle.wait_for_signal().await;

        info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
        match tokio::time::timeout(shutdown_timeout, cleanup).await {
            Ok(_) => info!("Cleanup completed successfully"),
            Err(_) => {
                tracing::warn!(
                    "Cleanup exceeded timeout of {:?}, forcing shutdown",
                    shutdown_timeout
                );
            }
        }
    });

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(coordinated_shutdown(coordinator))
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    cleanup_handle.await.ok();

    serve_result
}
