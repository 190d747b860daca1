//! Attendance commitments per event.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::{deleted, json_body, parse_id};
use crate::entity::{Attendee, AttendeePatch};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::response::{success_created, success_ok};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event_id = parse_id(&event_id)?;
    Ok(success_ok(Attendee::list(&state.db, event_id).await?))
}

/// POST /events/:id/attendees records the caller's own attendance.
pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(event_id): Path<String>,
    body: Result<Json<AttendeePatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut attendee = Attendee::with_key(parse_id(&event_id)?, caller.0.user_id);
    attendee.patch(json_body(body)?);
    attendee.insert(&state.db).await?;
    Ok(success_created(attendee))
}

pub async fn patch(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path((event_id, user_id)): Path<(String, String)>,
    body: Result<Json<AttendeePatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut attendee = Attendee::with_key(parse_id(&event_id)?, parse_id(&user_id)?);
    caller.require_self_or_superuser(attendee.user_id)?;
    let patch = json_body(body)?;
    attendee.get_details(&state.db).await?;
    attendee.patch(patch);
    attendee.update(&state.db).await?;
    Ok(success_ok(attendee))
}

pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path((event_id, user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let (event_id, user_id) = (parse_id(&event_id)?, parse_id(&user_id)?);
    caller.require_self_or_superuser(user_id)?;
    deleted(Attendee::delete(&state.db, event_id, user_id).await?, "attendee")?;
    Ok(success_ok(json!({ "event_id": event_id, "user_id": user_id })))
}
