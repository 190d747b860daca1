//! Shared application state for all routes.

use crate::auth::TokenKeys;
use crate::store::Database;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: Arc<TokenKeys>,
}

impl AppState {
    pub fn new(db: Database, jwt_secret: &str) -> Self {
        AppState {
            db,
            tokens: Arc::new(TokenKeys::new(jwt_secret)),
        }
    }
}
