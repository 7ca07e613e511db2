//! Reading history (per-chapter progress) model.

use novelverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::chapter::Chapter;
use crate::models::novel::Novel;

/// A row from the `reading_history` table. Exactly one row exists per
/// (user, novel, chapter); repeated progress reports update it in place.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ReadingHistory {
    pub id: DbId,
    pub user_id: DbId,
    pub novel_id: DbId,
    pub chapter_id: DbId,
    /// Percentage of the chapter read, 0-100.
    pub progress: i32,
    pub last_read: Timestamp,
}

/// DTO for reporting reading progress. `user_id` comes from the
/// authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateReadingHistory {
    #[serde(skip_deserializing)]
    pub user_id: DbId,
    pub novel_id: DbId,
    pub chapter_id: DbId,
    #[serde(default)]
    #[validate(range(min = 0, max = 100, message = "progress must be between 0 and 100"))]
    pub progress: i32,
}

/// A history row enriched with its novel and chapter for the library page.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingHistoryWithContext {
    #[serde(flatten)]
    pub history: ReadingHistory,
    pub novel: Novel,
    pub chapter: Chapter,
}
