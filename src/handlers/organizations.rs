//! Organization CRUD.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::{deleted, json_body, parse_id};
use crate::entity::{Organization, OrganizationPatch};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::response::{success_created, success_ok};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, _caller: CurrentUser) -> Result<impl IntoResponse, AppError> {
    Ok(success_ok(Organization::list(&state.db).await?))
}

pub async fn get(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut org = Organization::with_id(parse_id(&id)?);
    org.get_details(&state.db).await?;
    Ok(success_ok(org))
}

pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    body: Result<Json<Organization>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    let mut org = json_body(body)?;
    if org.name.is_empty() {
        return Err(AppError::InvalidParameter("name not set".into()));
    }
    org.insert(&state.db).await?;
    Ok(success_created(org))
}

pub async fn patch(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<OrganizationPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    let patch = json_body(body)?;
    let mut org = Organization::with_id(parse_id(&id)?);
    org.get_details(&state.db).await?;
    org.patch(patch);
    org.update(&state.db).await?;
    Ok(success_ok(org))
}

pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    let organization_id = parse_id(&id)?;
    deleted(Organization::delete(&state.db, organization_id).await?, "organization")?;
    Ok(success_ok(json!({ "organization_id": organization_id })))
}
