//! Handlers for the authenticated user's reading history.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use novelverse_core::error::CoreError;
use novelverse_db::models::reading_history::{
    CreateReadingHistory, ReadingHistory, ReadingHistoryWithContext,
};
use validator::Validate;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/reading-history (auth required)
pub async fn list_reading_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<ReadingHistoryWithContext>>> {
    let history = state.storage.get_reading_history(user.user_id).await?;
    Ok(Json(history))
}

/// POST /api/reading-history (auth required)
///
/// Upsert keyed on (user, novel, chapter): a repeat report for the same
/// chapter updates progress in place and bumps `lastRead`. Returns 201 with
/// the upserted row either way.
pub async fn update_reading_history(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateReadingHistory>,
) -> AppResult<(StatusCode, Json<ReadingHistory>)> {
    input.validate()?;
    state
        .storage
        .get_novel(input.novel_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Novel",
            id: input.novel_id,
        })?;
    state
        .storage
        .get_chapter(input.chapter_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Chapter",
            id: input.chapter_id,
        })?;
    input.user_id = user.user_id;
    let history = state.storage.update_reading_history(input).await?;
    Ok((StatusCode::CREATED, Json(history)))
}
