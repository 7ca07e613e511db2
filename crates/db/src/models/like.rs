//! Like (user/novel affinity) model.

use novelverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::novel::Novel;

/// A row from the `likes` table. At most one like exists per (user, novel);
/// the novel's denormalized `likes` counter mirrors the row count.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    pub id: DbId,
    pub user_id: DbId,
    pub novel_id: DbId,
    pub created_at: Timestamp,
}

/// DTO for liking a novel. `user_id` comes from the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLike {
    #[serde(skip_deserializing)]
    pub user_id: DbId,
    pub novel_id: DbId,
}

/// A like enriched with its novel for library listings.
#[derive(Debug, Clone, Serialize)]
pub struct LikeWithNovel {
    #[serde(flatten)]
    pub like: Like,
    pub novel: Novel,
}
