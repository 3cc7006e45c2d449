//! Users API routes

use axum::Router;
use domain_users::{LinkBuilder, UserService, handlers};

use crate::state::AppState;

/// Create users router
pub fn router(state: &AppState) -> Router {
    let service = UserService::new(state.users.clone());
    let links = LinkBuilder::new(state.config.users_url());
    handlers::router(service, links)
}
