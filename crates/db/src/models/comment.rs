//! Comment (review) model.

use novelverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `comments` table. A rating of 0 means the comment carries
/// no star rating; it still counts toward the novel's review count.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: DbId,
    pub novel_id: DbId,
    pub user_id: DbId,
    pub content: String,
    pub rating: i32,
    pub created_at: Timestamp,
}

/// DTO for creating a comment. `novel_id` comes from the URL path and
/// `user_id` from the authenticated caller.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateComment {
    #[serde(skip_deserializing)]
    pub novel_id: DbId,
    #[serde(skip_deserializing)]
    pub user_id: DbId,
    #[validate(length(min = 1, message = "content must not be empty"))]
    pub content: String,
    #[serde(default)]
    #[validate(range(min = 0, max = 5, message = "rating must be between 0 and 5"))]
    pub rating: i32,
}
