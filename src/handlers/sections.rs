//! Section CRUD, filtered by organization.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::{deleted, json_body, parse_id, query_id};
use crate::entity::{Section, SectionPatch};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::response::{success_created, success_ok};
use crate::state::AppState;

/// GET /sections?organization=<id>
pub async fn list(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let organization_id = query_id(&params, "organization")?;
    Ok(success_ok(Section::list(&state.db, organization_id).await?))
}

pub async fn get(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut section = Section::with_id(parse_id(&id)?);
    section.get_details(&state.db).await?;
    Ok(success_ok(section))
}

pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    body: Result<Json<Section>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    let mut section = json_body(body)?;
    if section.name.is_empty() {
        return Err(AppError::InvalidParameter("name not set".into()));
    }
    section.insert(&state.db).await?;
    Ok(success_created(section))
}

pub async fn patch(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<SectionPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    let patch = json_body(body)?;
    let mut section = Section::with_id(parse_id(&id)?);
    section.get_details(&state.db).await?;
    section.patch(patch);
    section.update(&state.db).await?;
    Ok(success_ok(section))
}

pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    let section_id = parse_id(&id)?;
    deleted(Section::delete(&state.db, section_id).await?, "section")?;
    Ok(success_ok(json!({ "section_id": section_id })))
}
