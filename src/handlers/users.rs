//! User administration and self-service.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use super::{auth::create_user, deleted, json_body, parse_id};
use crate::entity::{NewUser, User, UserPatch};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::response::{success_created, success_ok};
use crate::state::AppState;

pub async fn list(State(state): State<AppState>, caller: CurrentUser) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    Ok(success_ok(User::list(&state.db).await?))
}

/// POST /users: superusers may create accounts, including other superusers.
pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    caller.require_superuser()?;
    let user = create_user(&state, json_body(body)?).await?;
    Ok(success_created(user))
}

pub async fn get_by_username(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(username): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if caller.0.username == username {
        return Ok(success_ok(caller.0));
    }
    caller.require_superuser()?;
    Ok(success_ok(User::get_by_username(&state.db, &username).await?))
}

pub async fn patch(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<UserPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_id(&id)?;
    caller.require_self_or_superuser(user_id)?;
    let patch = json_body(body)?;
    if let Some(username) = patch.username.as_deref().filter(|u| !u.is_empty()) {
        crate::service::RequestValidator::validate_username(username)?;
    }
    if let Some(email) = patch.email.as_deref().filter(|e| !e.is_empty()) {
        crate::service::RequestValidator::validate_email(email)?;
    }
    let mut user = User::with_id(user_id);
    user.get_details(&state.db).await?;
    if let Some(username) = patch.username.as_deref().filter(|u| !u.is_empty() && *u != user.username) {
        if User::does_user_exist(&state.db, username).await? {
            return Err(AppError::InvalidParameter(format!("username {} is already taken", username)));
        }
    }
    user.patch(patch)?;
    user.update(&state.db).await?;
    Ok(success_ok(user))
}

pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = parse_id(&id)?;
    caller.require_self_or_superuser(user_id)?;
    deleted(User::delete(&state.db, user_id).await?, "user")?;
    Ok(success_ok(json!({ "user_id": user_id })))
}
