//! Handlers for the authenticated user's bookmark library.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use novelverse_core::error::CoreError;
use novelverse_core::types::DbId;
use novelverse_db::models::bookmark::{Bookmark, BookmarkWithNovel, CreateBookmark};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/bookmarks (auth required)
pub async fn list_bookmarks(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<BookmarkWithNovel>>> {
    let bookmarks = state.storage.get_bookmarks(user.user_id).await?;
    Ok(Json(bookmarks))
}

/// POST /api/bookmarks (auth required)
///
/// Idempotent per (user, novel): bookmarking again just re-points the
/// chapter marker.
pub async fn create_bookmark(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateBookmark>,
) -> AppResult<(StatusCode, Json<Bookmark>)> {
    state
        .storage
        .get_novel(input.novel_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Novel",
            id: input.novel_id,
        })?;
    input.user_id = user.user_id;
    let bookmark = state.storage.create_bookmark(input).await?;
    Ok((StatusCode::CREATED, Json(bookmark)))
}

/// DELETE /api/bookmarks/{novel_id} (auth required)
pub async fn delete_bookmark(
    State(state): State<AppState>,
    user: AuthUser,
    Path(novel_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.storage.delete_bookmark(user.user_id, novel_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Bookmark",
            id: novel_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
