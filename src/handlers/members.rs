//! Section memberships and their rights levels.

use std::collections::HashMap;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::{deleted, json_body, parse_id, query_id};
use crate::entity::{Member, MemberPatch};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::response::{success_created, success_ok};
use crate::state::AppState;

/// GET /members?organization=<id>
pub async fn list(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let organization_id = query_id(&params, "organization")?;
    Ok(success_ok(Member::list(&state.db, organization_id).await?))
}

pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    body: Result<Json<Member>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    let mut member = json_body(body)?;
    member.insert(&state.db).await?;
    Ok(success_created(member))
}

pub async fn patch(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path((section_id, user_id)): Path<(String, String)>,
    body: Result<Json<MemberPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    let patch = json_body(body)?;
    let mut member = Member::with_key(parse_id(&section_id)?, parse_id(&user_id)?);
    member.get_details(&state.db).await?;
    member.patch(patch);
    member.update(&state.db).await?;
    Ok(success_ok(member))
}

pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path((section_id, user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    let (section_id, user_id) = (parse_id(&section_id)?, parse_id(&user_id)?);
    deleted(Member::delete(&state.db, section_id, user_id).await?, "member")?;
    Ok(success_ok(json!({ "section_id": section_id, "user_id": user_id })))
}
