//! Application state management

use domain_users::InMemoryUserRepository;

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub users: InMemoryUserRepository,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            users: InMemoryUserRepository::new(),
        }
    }
}
