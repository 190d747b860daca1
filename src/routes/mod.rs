//! Router composition.

mod api;
mod common;

pub use api::{api_routes, API_PREFIX, MAX_BODY_BYTES};
pub use common::common_routes;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router: common routes plus the API under [`API_PREFIX`].
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, api_routes(state))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
}
