//! Repository for the `chapters` table.
//!
//! Every chapter mutation refreshes the parent novel's `updated_at` in the
//! same transaction, so the "recent novels" surface reflects new content.

use sqlx::PgPool;

use novelverse_core::types::DbId;

use crate::models::chapter::{Chapter, CreateChapter, UpdateChapter};

/// Column list for chapters queries.
pub(crate) const COLUMNS: &str =
    "id, novel_id, title, content, chapter_number, created_at, updated_at";

/// Provides CRUD operations for chapters.
pub struct ChapterRepo;

impl ChapterRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Chapter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chapters WHERE id = $1");
        sqlx::query_as::<_, Chapter>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Chapters of a novel ordered by chapter number.
    pub async fn list_for_novel(
        pool: &PgPool,
        novel_id: DbId,
    ) -> Result<Vec<Chapter>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM chapters
             WHERE novel_id = $1
             ORDER BY chapter_number ASC"
        );
        sqlx::query_as::<_, Chapter>(&query)
            .bind(novel_id)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateChapter) -> Result<Chapter, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO chapters (novel_id, title, content, chapter_number)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let chapter = sqlx::query_as::<_, Chapter>(&query)
            .bind(input.novel_id)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.chapter_number)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE novels SET updated_at = NOW() WHERE id = $1")
            .bind(input.novel_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(chapter)
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateChapter,
    ) -> Result<Option<Chapter>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE chapters SET
                title = COALESCE($1, title),
                content = COALESCE($2, content),
                chapter_number = COALESCE($3, chapter_number),
                updated_at = NOW()
             WHERE id = $4
             RETURNING {COLUMNS}"
        );
        let chapter = sqlx::query_as::<_, Chapter>(&query)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.chapter_number)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(chapter) = &chapter {
            sqlx::query("UPDATE novels SET updated_at = NOW() WHERE id = $1")
                .bind(chapter.novel_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(chapter)
    }

    /// Delete the chapter plus bookmarks pointing at it and its reading
    /// history rows, refreshing the parent novel's `updated_at`.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let novel_id: Option<(DbId,)> =
            sqlx::query_as("SELECT novel_id FROM chapters WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((novel_id,)) = novel_id else {
            tx.commit().await?;
            return Ok(false);
        };

        sqlx::query("DELETE FROM bookmarks WHERE chapter_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM reading_history WHERE chapter_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM chapters WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE novels SET updated_at = NOW() WHERE id = $1")
            .bind(novel_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }

    /// Fetch a batch of chapters by id for relation enrichment.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Chapter>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chapters WHERE id = ANY($1)");
        sqlx::query_as::<_, Chapter>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
