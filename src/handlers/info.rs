//! Key/value settings: signed-in users read, superusers write.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::{deleted, json_body};
use crate::entity::{Info, InfoPatch};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::response::success_ok;
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, _caller: CurrentUser) -> Result<impl IntoResponse, AppError> {
    Ok(success_ok(Info::list(&state.db).await?))
}

pub async fn get(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut info = Info::with_key(key);
    info.get_details(&state.db).await?;
    Ok(success_ok(info))
}

/// PUT /info/:key with `{"value": ...}` inserts or overwrites.
pub async fn put(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(key): Path<String>,
    body: Result<Json<InfoPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    let value = json_body(body)?
        .value
        .ok_or_else(|| AppError::InvalidParameter("value not set".into()))?;
    let mut info = Info { key, value };
    info.upsert(&state.db).await?;
    Ok(success_ok(info))
}

pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(key): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    deleted(Info::delete(&state.db, &key).await?, "info")?;
    Ok(success_ok(json!({ "key": key })))
}
