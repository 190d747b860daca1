//! Event comments.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde_json::json;

use super::{deleted, json_body, parse_id};
use crate::entity::{Comment, CommentPatch};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::response::{success_created, success_ok};
use crate::state::AppState;
use crate::store::Database;

async fn own_comment(db: &Database, caller: &CurrentUser, id: &str) -> Result<Comment, AppError> {
    let mut comment = Comment::with_id(parse_id(id)?);
    comment.get_details(db).await?;
    caller.require_self_or_superuser(comment.user_id)?;
    Ok(comment)
}

pub async fn list(
    State(state): State<AppState>,
    _caller: CurrentUser,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let event_id = parse_id(&event_id)?;
    Ok(success_ok(Comment::list(&state.db, event_id).await?))
}

/// POST /events/:id/comments. Author is the caller, creation time is now.
pub async fn create(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(event_id): Path<String>,
    body: Result<Json<Comment>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut comment = json_body(body)?;
    if comment.comment.is_empty() {
        return Err(AppError::InvalidParameter("comment not set".into()));
    }
    comment.comment_id = 0;
    comment.event_id = parse_id(&event_id)?;
    comment.user_id = caller.0.user_id;
    comment.creation = Utc::now();
    comment.insert(&state.db).await?;
    Ok(success_created(comment))
}

pub async fn patch(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<String>,
    body: Result<Json<CommentPatch>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let patch = json_body(body)?;
    let mut comment = own_comment(&state.db, &caller, &id).await?;
    comment.patch(patch);
    comment.update(&state.db).await?;
    Ok(success_ok(comment))
}

pub async fn delete(
    State(state): State<AppState>,
    caller: CurrentUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let comment = own_comment(&state.db, &caller, &id).await?;
    deleted(Comment::delete(&state.db, comment.comment_id).await?, "comment")?;
    Ok(success_ok(json!({ "comment_id": comment.comment_id })))
}
