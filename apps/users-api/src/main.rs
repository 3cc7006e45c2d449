//! Users API - REST server

use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let state = AppState::new(config);

    // Build REST router
    let api_routes = api::routes(&state);
    let router = create_router::<openapi::ApiDoc>(api_routes, &state.config.server)?;
    let app = router.merge(health_router(state.config.app));

    info!(
        "Starting {} v{} on port {}, public URL {}",
        state.config.app.name,
        state.config.app.version,
        state.config.server.port,
        state.config.public_url
    );

    create_production_app(app, &state.config.server, Duration::from_secs(30), async {
        info!("Shutting down: in-memory users are discarded");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
