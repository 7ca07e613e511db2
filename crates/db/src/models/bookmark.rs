//! Bookmark model.

use novelverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::novel::Novel;

/// A row from the `bookmarks` table. At most one bookmark exists per
/// (user, novel); `chapter_id` is absent for novel-level bookmarks.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub id: DbId,
    pub user_id: DbId,
    pub novel_id: DbId,
    pub chapter_id: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for creating (or re-pointing) a bookmark. `user_id` comes from the
/// authenticated caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookmark {
    #[serde(skip_deserializing)]
    pub user_id: DbId,
    pub novel_id: DbId,
    pub chapter_id: Option<DbId>,
}

/// A bookmark enriched with its novel for library listings.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkWithNovel {
    #[serde(flatten)]
    pub bookmark: Bookmark,
    pub novel: Novel,
}
