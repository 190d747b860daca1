//! oaf-server: organization, section and event management REST backend.

pub mod auth;
pub mod config;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{load_config, Config, DatabaseConnection, Driver};
pub use error::{AppError, AuthError, ConfigError, StoreError};
pub use migration::apply_migrations;
pub use routes::app;
pub use service::CrudService;
pub use state::AppState;
pub use store::Database;
