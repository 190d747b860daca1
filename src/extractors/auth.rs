//! Resolve the calling user from a bearer token.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::split_authorization;
use crate::entity::User;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated user, reloaded from the database on every request.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn is_superuser(&self) -> bool {
        self.0.superuser
    }

    /// Allow the call when the caller is `user_id` or a superuser.
    pub fn require_self_or_superuser(&self, user_id: i64) -> Result<(), AppError> {
        if self.0.user_id == user_id || self.0.superuser {
            Ok(())
        } else {
            Err(AppError::not_authorized())
        }
    }

    pub fn require_superuser(&self) -> Result<(), AppError> {
        if self.0.superuser {
            Ok(())
        } else {
            Err(AppError::not_authorized())
        }
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::MalformedAuth("missing Authorization header".into()))?;
        let (scheme, token) = split_authorization(header)?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AppError::MalformedAuth(format!("unsupported scheme {}", scheme)));
        }
        let claims = state.tokens.decode(token)?;
        let mut user = User::with_id(claims.user);
        user.get_details(&state.db)
            .await
            .map_err(|e| AppError::MalformedAuth(e.to_string()))?;
        Ok(CurrentUser(user))
    }
}
