//! Load the server configuration from a JSON file.

use crate::config::types::Config;
use crate::error::ConfigError;

pub const CONFIG_PATH_ENV: &str = "OAF_CONFIG";
pub const JWT_SECRET_ENV: &str = "OAF_JWT_SECRET";
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Config path from `OAF_CONFIG`, default `config.json`.
pub fn config_path() -> String {
    std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into())
}

pub fn parse_config(raw: &str) -> Result<Config, ConfigError> {
    Ok(serde_json::from_str(raw)?)
}

pub async fn load_config(path: &str) -> Result<Config, ConfigError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
    let config = parse_config(&raw)?;
    tracing::info!(path, host = %config.host, port = config.port, "configuration loaded");
    Ok(config)
}

impl Config {
    /// Signing secret from the file, else `OAF_JWT_SECRET`, else empty.
    pub fn resolve_jwt_secret(&self) -> String {
        let secret = self
            .jwt_secret
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| std::env::var(JWT_SECRET_ENV).ok())
            .unwrap_or_default();
        if secret.is_empty() {
            tracing::warn!("no token secret configured, tokens are signed with an empty key");
        }
        secret
    }
}
