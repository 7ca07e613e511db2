//! Handlers for comments (reviews): public reads, authenticated writes,
//! owner-or-admin deletes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use novelverse_core::error::CoreError;
use novelverse_core::types::DbId;
use novelverse_db::models::comment::{Comment, CreateComment};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/novels/{novel_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(novel_id): Path<DbId>,
) -> AppResult<Json<Vec<Comment>>> {
    state
        .storage
        .get_novel(novel_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        })?;
    let comments = state.storage.get_comments(novel_id).await?;
    Ok(Json(comments))
}

/// POST /api/novels/{novel_id}/comments (auth required)
///
/// A rating of 0 posts an unrated comment; 1-5 contributes to the novel's
/// aggregate rating.
pub async fn create_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(novel_id): Path<DbId>,
    Json(mut input): Json<CreateComment>,
) -> AppResult<(StatusCode, Json<Comment>)> {
    state
        .storage
        .get_novel(novel_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        })?;
    input.validate()?;
    input.novel_id = novel_id;
    input.user_id = user.user_id;
    let comment = state.storage.create_comment(input).await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// DELETE /api/comments/{comment_id} (owner or admin)
pub async fn delete_comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(comment_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let comment = state
        .storage
        .get_comment(comment_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Comment",
            id: comment_id,
        })?;

    if comment.user_id != user.user_id && !user.is_admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only delete your own comments".into(),
        )));
    }

    state.storage.delete_comment(comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
