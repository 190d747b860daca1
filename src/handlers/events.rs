//! Events; only the creator or a superuser may change one.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::{deleted, json_body, parse_id, query_id};
use crate::entity::{Event, EventPatch};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::response::{success_created, success_ok};
use crate::state::AppState;
use crate::store::Database;

/// Load the event and check the caller created it or is a superuser.
async fn owned_event(db: &Database, caller: &CurrentUser, id: &str) -> Result<Event, AppError> {
    let mut event = Event::with_id(parse_id(id)?);
    event.get_details(db).await?;
    caller.require_self_or_superuser(event.creator)?;
    Ok(event)
}

/// GET /events?organization=<id>
pub async fn list(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let organization_id = query_id(&params, "organization")?;
    Ok(success_ok(Event::list(&state.db, organization_id).await?))
}

pub async fn get(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = Event::with_id(parse_id(&id)?);
    event.get_details(&state.db).await?;
    Ok(success_ok(event))
}

pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    body: Result<Json<Event>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut event = json_body(body)?;
    if event.name.is_empty() {
        return Err(AppError::InvalidParameter("name not set".into()));
    }
    event.creator = caller.0.user_id;
    event.insert(&state.db).await?;
    Ok(success_created(event))
}

pub async fn patch(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<EventPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let patch = json_body(body)?;
    let mut event = owned_event(&state.db, &caller, &id).await?;
    event.patch(patch);
    event.update(&state.db).await?;
    Ok(success_ok(event))
}

pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event = owned_event(&state.db, &caller, &id).await?;
    deleted(Event::delete(&state.db, event.event_id).await?, "event")?;
    Ok(success_ok(json!({ "event_id": event.event_id })))
}
