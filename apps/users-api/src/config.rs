//! Configuration for Users API

use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Externally visible origin used in hypermedia links, without trailing slash
    pub public_url: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?;

        let public_url = env_or_default("PUBLIC_URL", &format!("http://localhost:{}", server.port))
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            app: app_info!(),
            server,
            environment,
            public_url,
        })
    }

    /// Public URL of the users collection
    pub fn users_url(&self) -> String {
        format!("{}/api/users", self.public_url)
    }
}
