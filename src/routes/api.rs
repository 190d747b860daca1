//! Versioned REST API mounted under `/api/v100`.

use axum::{
    extract::OriginalUri,
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

use crate::error::AppError;
use crate::handlers::{attendees, auth, comments, events, info, members, organizations, sections, users};
use crate::response::wrap_envelope;
use crate::state::AppState;

pub const API_PREFIX: &str = "/api/v100";

/// Request body cap; organization pictures travel inline as base64.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

async fn unknown_route(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}

/// All API routes, every response wrapped in the `{version, path, data}` envelope.
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .route("/auth", get(auth::login))
        .route("/auth-refresh", get(auth::refresh))
        .route("/register", post(auth::register))
        .route("/users", get(users::list).post(users::create))
        .route("/users/:user", get(users::get_by_username).patch(users::patch).delete(users::delete))
        .route("/organizations", get(organizations::list).post(organizations::create))
        .route(
            "/organizations/:id",
            get(organizations::get).patch(organizations::patch).delete(organizations::delete),
        )
        .route("/sections", get(sections::list).post(sections::create))
        .route("/sections/:id", get(sections::get).patch(sections::patch).delete(sections::delete))
        .route("/members", get(members::list).post(members::create))
        .route("/members/:section_id/:user_id", patch(members::patch).delete(members::delete))
        .route("/events", get(events::list).post(events::create))
        .route("/events/:id", get(events::get).patch(events::patch).delete(events::delete))
        .route("/events/:id/attendees", get(attendees::list).post(attendees::create))
        .route("/events/:id/attendees/:user_id", patch(attendees::patch).delete(attendees::delete))
        .route("/events/:id/comments", get(comments::list).post(comments::create))
        .route("/comments/:id", patch(comments::patch).delete(comments::delete))
        .route("/info", get(info::list))
        .route("/info/:key", get(info::get).put(info::put).delete(info::delete))
        .fallback(unknown_route)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::from_fn(wrap_envelope))
        .with_state(state)
}
