//! Handlers for the `/novels` resource: catalog listings, search, and
//! admin-only CRUD.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use novelverse_core::error::CoreError;
use novelverse_core::types::DbId;
use novelverse_db::models::novel::{CreateNovel, Novel, NovelFilter, UpdateNovel};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Default number of novels returned by the featured/trending/recent rails.
const DEFAULT_RAIL_LIMIT: i64 = 4;

/// Query parameters for the rail endpoints.
#[derive(Debug, Deserialize)]
pub struct RailQuery {
    pub limit: Option<i64>,
}

/// Query parameters for `GET /novels/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
}

/// GET /api/novels
///
/// Full catalog listing, newest-first, with optional `genre`, `limit`, and
/// `offset` query parameters.
pub async fn list_novels(
    State(state): State<AppState>,
    Query(filter): Query<NovelFilter>,
) -> AppResult<Json<Vec<Novel>>> {
    let novels = state.storage.get_novels(filter).await?;
    Ok(Json(novels))
}

/// GET /api/novels/featured
pub async fn featured_novels(
    State(state): State<AppState>,
    Query(query): Query<RailQuery>,
) -> AppResult<Json<Vec<Novel>>> {
    let limit = query.limit.unwrap_or(DEFAULT_RAIL_LIMIT);
    let novels = state.storage.get_featured_novels(limit).await?;
    Ok(Json(novels))
}

/// GET /api/novels/trending
pub async fn trending_novels(
    State(state): State<AppState>,
    Query(query): Query<RailQuery>,
) -> AppResult<Json<Vec<Novel>>> {
    let limit = query.limit.unwrap_or(DEFAULT_RAIL_LIMIT);
    let novels = state.storage.get_trending_novels(limit).await?;
    Ok(Json(novels))
}

/// GET /api/novels/recent
pub async fn recent_novels(
    State(state): State<AppState>,
    Query(query): Query<RailQuery>,
) -> AppResult<Json<Vec<Novel>>> {
    let limit = query.limit.unwrap_or(DEFAULT_RAIL_LIMIT);
    let novels = state.storage.get_recent_novels(limit).await?;
    Ok(Json(novels))
}

/// GET /api/novels/search?query=...
///
/// Case-insensitive substring search over title, author, description, genre,
/// and tags. A missing or blank query is a 400.
pub async fn search_novels(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<Novel>>> {
    let query = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("Search query is required".into()))?;
    let novels = state.storage.search_novels(query).await?;
    Ok(Json(novels))
}

/// GET /api/novels/{novel_id}
pub async fn get_novel(
    State(state): State<AppState>,
    Path(novel_id): Path<DbId>,
) -> AppResult<Json<Novel>> {
    let novel = state
        .storage
        .get_novel(novel_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        })?;
    Ok(Json(novel))
}

/// POST /api/novels (admin only)
pub async fn create_novel(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(mut input): Json<CreateNovel>,
) -> AppResult<(StatusCode, Json<Novel>)> {
    input.validate()?;
    input.created_by = Some(admin.user_id);
    let novel = state.storage.create_novel(input).await?;
    Ok((StatusCode::CREATED, Json(novel)))
}

/// PUT /api/novels/{novel_id} (admin only)
pub async fn update_novel(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(novel_id): Path<DbId>,
    Json(input): Json<UpdateNovel>,
) -> AppResult<Json<Novel>> {
    input.validate()?;
    let novel = state
        .storage
        .update_novel(novel_id, input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        })?;
    Ok(Json(novel))
}

/// DELETE /api/novels/{novel_id} (admin only)
///
/// Cascade-deletes the novel's chapters, comments, bookmarks, likes, and
/// reading history. Returns 204 No Content.
pub async fn delete_novel(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(novel_id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !state.storage.delete_novel(novel_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Novel",
            id: novel_id,
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/novels/{novel_id}/is-bookmarked (auth required)
pub async fn is_bookmarked(
    State(state): State<AppState>,
    user: AuthUser,
    Path(novel_id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let bookmarked = state.storage.is_bookmarked(user.user_id, novel_id).await?;
    Ok(Json(json!({ "isBookmarked": bookmarked })))
}

/// GET /api/novels/{novel_id}/is-liked (auth required)
pub async fn is_liked(
    State(state): State<AppState>,
    user: AuthUser,
    Path(novel_id): Path<DbId>,
) -> AppResult<Json<Value>> {
    let liked = state.storage.is_liked(user.user_id, novel_id).await?;
    Ok(Json(json!({ "isLiked": liked })))
}
