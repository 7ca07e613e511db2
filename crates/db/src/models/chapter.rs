//! Chapter model.

use novelverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `chapters` table.
///
/// `chapter_number` is the ordering key within a novel. It is unique in
/// practice but deliberately not enforced by a constraint, so re-numbering
/// during editing cannot fail halfway.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: DbId,
    pub novel_id: DbId,
    pub title: String,
    pub content: String,
    pub chapter_number: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a chapter. `novel_id` comes from the URL path.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChapter {
    #[serde(skip_deserializing)]
    pub novel_id: DbId,
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
    #[validate(range(min = 1, message = "chapterNumber must be at least 1"))]
    pub chapter_number: i32,
}

/// DTO for partial chapter updates.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChapter {
    #[validate(length(min = 1, max = 255, message = "title must be 1-255 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: Option<String>,
    #[validate(range(min = 1, message = "chapterNumber must be at least 1"))]
    pub chapter_number: Option<i32>,
}
