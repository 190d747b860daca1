//! Login, token refresh and self-registration.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header::AUTHORIZATION, HeaderMap},
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::json_body;
use crate::auth::{decode_credentials, split_authorization, verify_password};
use crate::entity::{NewUser, User};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::response::{success_created, success_ok};
use crate::service::RequestValidator;
use crate::state::AppState;

#[derive(Serialize, Debug)]
pub struct TokenBody {
    pub token: String,
}

/// GET /auth with `Authorization: Bearer base64(username:password)`.
pub async fn login(State(state): State<AppState>, headers: HeaderMap) -> Result<impl IntoResponse, AppError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::MalformedAuth("missing Authorization header".into()))?;
    let (scheme, encoded) = split_authorization(header)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AppError::MalformedAuth(format!("unsupported scheme {}", scheme)));
    }
    let (username, password) = decode_credentials(encoded)?;

    if !User::does_user_exist(&state.db, &username).await? {
        return Err(AppError::WrongCredentials(format!("unknown user {}", username)));
    }
    let user = User::get_by_username(&state.db, &username).await?;
    if !verify_password(&password, &user.salt, &user.password)? {
        return Err(AppError::WrongCredentials(format!("wrong password for {}", username)));
    }
    let token = state.tokens.issue(&user)?;
    tracing::info!(user_id = user.user_id, "token issued");
    Ok(success_ok(TokenBody { token }))
}

/// GET /auth-refresh: a fresh token for the bearer of a valid one.
pub async fn refresh(State(state): State<AppState>, user: CurrentUser) -> Result<impl IntoResponse, AppError> {
    let token = state.tokens.issue(&user.0)?;
    Ok(success_ok(TokenBody { token }))
}

/// POST /register. Self-registered accounts are never superusers.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<NewUser>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut new_user = json_body(body)?;
    new_user.superuser = false;
    let user = create_user(&state, new_user).await?;
    Ok(success_created(user))
}

pub(super) async fn create_user(state: &AppState, new_user: NewUser) -> Result<User, AppError> {
    RequestValidator::validate_new_user(&new_user)?;
    if User::does_user_exist(&state.db, &new_user.username).await? {
        return Err(AppError::InvalidParameter(format!(
            "username {} is already taken",
            new_user.username
        )));
    }
    let mut user = new_user.into_user()?;
    user.insert(&state.db).await?;
    tracing::info!(user_id = user.user_id, superuser = user.superuser, "user created");
    Ok(user)
}
