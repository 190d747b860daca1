//! Config file types matching the server's JSON configuration.

use serde::{Deserialize, Deserializer};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(deserialize_with = "port_from_string_or_number")]
    pub port: u16,
    #[serde(alias = "databaseconnection")]
    pub database_connection: DatabaseConnection,
    /// Token signing secret. Falls back to `OAF_JWT_SECRET` when absent.
    #[serde(default)]
    pub jwt_secret: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct DatabaseConnection {
    pub driver: Driver,
    pub connection: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub enum Driver {
    #[serde(rename = "postgres", alias = "postgresql")]
    Postgres,
    #[serde(rename = "sqlite3", alias = "sqlite")]
    Sqlite,
}

fn default_host() -> String {
    "localhost".into()
}

fn port_from_string_or_number<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    let v = serde_json::Value::deserialize(deserializer)?;
    match v {
        serde_json::Value::String(s) => s
            .trim()
            .parse::<u16>()
            .map_err(|e| serde::de::Error::custom(format!("port '{}': {}", s, e))),
        serde_json::Value::Number(n) => n
            .as_u64()
            .and_then(|n| u16::try_from(n).ok())
            .ok_or_else(|| serde::de::Error::custom(format!("port {} out of range", n))),
        other => Err(serde::de::Error::custom(format!(
            "port must be a string or number; got {}",
            other
        ))),
    }
}
