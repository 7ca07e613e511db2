//! Handlers for chapters: public reads, admin-only writes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use novelverse_core::error::CoreError;
use novelverse_core::types::DbId;
use novelverse_db::models::chapter::{Chapter, CreateChapter, UpdateChapter};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/novels/{novel_id}/chapters
pub async fn list_chapters(
    State(state): State<AppState>,
    Path(novel_id): Path<DbId>,
) -> AppResult<Json<Vec<Chapter>>> {
    ensure_novel_exists(&state, novel_id).await?;
    let chapters = state.storage.get_chapters(novel_id).await?;
    Ok(Json(chapters))
}

/// POST /api/novels/{novel_id}/chapters (admin only)
pub async fn create_chapter(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(novel_id): Path<DbId>,
    Json(mut input): Json<CreateChapter>,
) -> AppResult<(StatusCode, Json<Chapter>)> {
    ensure_novel_exists(&state, novel_id).await?;
    input.validate()?;
    input.novel_id = novel_id;
    let chapter = state.storage.create_chapter(input).await?;
    Ok((StatusCode::CREATED, Json(chapter)))
}

/// GET /api/chapters/{chapter_id}
pub async fn get_chapter(
    State(state): State<AppState>,
    Path(chapter_id): Path<DbId>,
) -> AppResult<Json<Chapter>> {
    let chapter = state
        .storage
        .get_chapter(chapter_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Chapter",
            id: chapter_id,
        })?;
    Ok(Json(chapter))
}

/// PUT /api/chapters/{chapter_id} (admin only)
pub async fn update_chapter(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(chapter_id): Path<DbId>,
    Json(input): Json<UpdateChapter>,
) -> AppResult<Json<Chapter>> {
    input.validate()?;
    let chapter = state
        .storage
        .update_chapter(chapter_id, input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Chapter",
            id: chapter_id,
        })?;
    Ok(Json(chapter))
}

/// DELETE /api/chapters/{chapter_id} (admin only)
pub async fn delete_chapter(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(chapter_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.storage.delete_chapter(chapter_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Chapter",
            id: chapter_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn ensure_novel_exists(state: &AppState, novel_id: DbId) -> AppResult<()> {
    state
        .storage
        .get_novel(novel_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        })?;
    Ok(())
}
