//! Repository for the `comments` table.
//!
//! Comment writes recompute the parent novel's aggregate rating and review
//! count in the same transaction, so the denormalized columns can never
//! drift from the comment rows (the ancestral implementation updated them
//! in a separate read-modify-write, which raced).

use sqlx::{PgPool, Postgres, Transaction};

use novelverse_core::types::DbId;

use crate::models::comment::{Comment, CreateComment};

/// Column list for comments queries.
const COLUMNS: &str = "id, novel_id, user_id, content, rating, created_at";

/// Provides CRUD operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE id = $1");
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Comments on a novel, newest first.
    pub async fn list_for_novel(
        pool: &PgPool,
        novel_id: DbId,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments
             WHERE novel_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(novel_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateComment) -> Result<Comment, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO comments (novel_id, user_id, content, rating)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(input.novel_id)
            .bind(input.user_id)
            .bind(&input.content)
            .bind(input.rating)
            .fetch_one(&mut *tx)
            .await?;

        Self::recompute_novel_aggregates(&mut tx, input.novel_id).await?;

        tx.commit().await?;
        Ok(comment)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let deleted: Option<(DbId,)> =
            sqlx::query_as("DELETE FROM comments WHERE id = $1 RETURNING novel_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((novel_id,)) = deleted else {
            tx.commit().await?;
            return Ok(false);
        };

        Self::recompute_novel_aggregates(&mut tx, novel_id).await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Rating is the rounded mean of nonzero comment ratings (0 when none);
    /// review count is the total number of comments.
    async fn recompute_novel_aggregates(
        tx: &mut Transaction<'_, Postgres>,
        novel_id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE novels SET
                rating = COALESCE(
                    (SELECT ROUND(AVG(rating))::INT FROM comments
                     WHERE novel_id = $1 AND rating > 0),
                    0),
                review_count = (SELECT COUNT(*)::INT FROM comments WHERE novel_id = $1)
             WHERE id = $1",
        )
        .bind(novel_id)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}
