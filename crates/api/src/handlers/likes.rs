//! Handlers for the authenticated user's liked novels.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use novelverse_core::error::CoreError;
use novelverse_core::types::DbId;
use novelverse_db::models::like::{CreateLike, Like, LikeWithNovel};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/likes (auth required)
pub async fn list_likes(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<LikeWithNovel>>> {
    let likes = state.storage.get_likes(user.user_id).await?;
    Ok(Json(likes))
}

/// POST /api/likes (auth required)
///
/// Idempotent: liking an already-liked novel returns the existing like and
/// leaves the counter alone.
pub async fn create_like(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateLike>,
) -> AppResult<(StatusCode, Json<Like>)> {
    state
        .storage
        .get_novel(input.novel_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Novel",
            id: input.novel_id,
        })?;
    input.user_id = user.user_id;
    let like = state.storage.create_like(input).await?;
    Ok((StatusCode::CREATED, Json(like)))
}

/// DELETE /api/likes/{novel_id} (auth required)
pub async fn delete_like(
    State(state): State<AppState>,
    user: AuthUser,
    Path(novel_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.storage.delete_like(user.user_id, novel_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Like",
            id: novel_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
