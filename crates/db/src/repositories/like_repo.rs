//! Repository for the `likes` table.
//!
//! The novel's denormalized `likes` counter moves only when a like row is
//! actually inserted or deleted, inside the same transaction; the row lock
//! taken by the counter UPDATE serializes concurrent toggles on one novel.

use std::collections::HashMap;

use sqlx::PgPool;

use novelverse_core::types::DbId;

use crate::models::like::{CreateLike, Like, LikeWithNovel};
use crate::models::novel::Novel;
use crate::repositories::NovelRepo;

/// Column list for likes queries.
const COLUMNS: &str = "id, user_id, novel_id, created_at";

/// Provides idempotent like toggling with counter maintenance.
pub struct LikeRepo;

impl LikeRepo {
    /// The user's likes, newest first, each enriched with its novel via one
    /// batched lookup. Likes whose novel has been deleted are skipped.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<LikeWithNovel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM likes
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        let likes = sqlx::query_as::<_, Like>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let novel_ids: Vec<DbId> = likes.iter().map(|l| l.novel_id).collect();
        let novels: HashMap<DbId, Novel> = NovelRepo::find_by_ids(pool, &novel_ids)
            .await?
            .into_iter()
            .map(|n| (n.id, n))
            .collect();

        Ok(likes
            .into_iter()
            .filter_map(|like| {
                let novel = novels.get(&like.novel_id)?.clone();
                Some(LikeWithNovel { like, novel })
            })
            .collect())
    }

    /// Idempotent create: returns the existing row (counter untouched) when
    /// the user already likes the novel.
    pub async fn create(pool: &PgPool, input: &CreateLike) -> Result<Like, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO likes (user_id, novel_id)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_likes_user_novel DO NOTHING
             RETURNING {COLUMNS}"
        );
        let inserted = sqlx::query_as::<_, Like>(&insert)
            .bind(input.user_id)
            .bind(input.novel_id)
            .fetch_optional(&mut *tx)
            .await?;

        let like = match inserted {
            Some(like) => {
                sqlx::query("UPDATE novels SET likes = likes + 1 WHERE id = $1")
                    .bind(input.novel_id)
                    .execute(&mut *tx)
                    .await?;
                like
            }
            None => {
                let select =
                    format!("SELECT {COLUMNS} FROM likes WHERE user_id = $1 AND novel_id = $2");
                sqlx::query_as::<_, Like>(&select)
                    .bind(input.user_id)
                    .bind(input.novel_id)
                    .fetch_one(&mut *tx)
                    .await?
            }
        };

        tx.commit().await?;
        Ok(like)
    }

    /// Idempotent delete: returns false (counter untouched) when no like
    /// existed. The decrement is clamped at zero.
    pub async fn delete(pool: &PgPool, user_id: DbId, novel_id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let result = sqlx::query("DELETE FROM likes WHERE user_id = $1 AND novel_id = $2")
            .bind(user_id)
            .bind(novel_id)
            .execute(&mut *tx)
            .await?;
        let removed = result.rows_affected() > 0;

        if removed {
            sqlx::query("UPDATE novels SET likes = GREATEST(likes - 1, 0) WHERE id = $1")
                .bind(novel_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(removed)
    }

    pub async fn exists(pool: &PgPool, user_id: DbId, novel_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM likes WHERE user_id = $1 AND novel_id = $2)",
        )
        .bind(user_id)
        .bind(novel_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
