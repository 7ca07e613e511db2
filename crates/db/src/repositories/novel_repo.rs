//! Repository for the `novels` table.
//!
//! The cascade delete spans five dependent tables and runs in a single
//! transaction so a crash cannot orphan rows.

use sqlx::PgPool;

use novelverse_core::types::DbId;

use crate::models::novel::{CreateNovel, Novel, NovelFilter, UpdateNovel};

/// Column list for novels queries.
pub(crate) const COLUMNS: &str = "id, title, author, cover_image, description, genre, tags, \
    rating, review_count, is_featured, is_trending, views, likes, \
    created_at, updated_at, created_by";

/// Provides CRUD, listing surfaces, and search for novels.
pub struct NovelRepo;

impl NovelRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Novel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM novels WHERE id = $1");
        sqlx::query_as::<_, Novel>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List novels newest-first by update time with an optional genre filter.
    /// A NULL limit means "no limit" (PostgreSQL `LIMIT NULL`).
    pub async fn list(pool: &PgPool, filter: &NovelFilter) -> Result<Vec<Novel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM novels
             WHERE ($1::genre IS NULL OR genre = $1)
             ORDER BY updated_at DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(filter.genre)
            .bind(filter.limit)
            .bind(filter.offset.unwrap_or(0))
            .fetch_all(pool)
            .await
    }

    pub async fn list_featured(pool: &PgPool, limit: i64) -> Result<Vec<Novel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM novels
             WHERE is_featured = true
             ORDER BY rating DESC, updated_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn list_trending(pool: &PgPool, limit: i64) -> Result<Vec<Novel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM novels
             WHERE is_trending = true
             ORDER BY rating DESC, updated_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Novel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM novels
             ORDER BY updated_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateNovel) -> Result<Novel, sqlx::Error> {
        let query = format!(
            "INSERT INTO novels
                (title, author, cover_image, description, genre, tags,
                 is_featured, is_trending, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.cover_image)
            .bind(&input.description)
            .bind(input.genre)
            .bind(&input.tags)
            .bind(input.is_featured)
            .bind(input.is_trending)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateNovel,
    ) -> Result<Option<Novel>, sqlx::Error> {
        let query = format!(
            "UPDATE novels SET
                title = COALESCE($1, title),
                author = COALESCE($2, author),
                cover_image = COALESCE($3, cover_image),
                description = COALESCE($4, description),
                genre = COALESCE($5, genre),
                tags = COALESCE($6, tags),
                is_featured = COALESCE($7, is_featured),
                is_trending = COALESCE($8, is_trending),
                views = COALESCE($9, views),
                updated_at = NOW()
             WHERE id = $10
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(&input.title)
            .bind(&input.author)
            .bind(&input.cover_image)
            .bind(&input.description)
            .bind(input.genre)
            .bind(&input.tags)
            .bind(input.is_featured)
            .bind(input.is_trending)
            .bind(input.views)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Cascade-delete the novel: chapters, comments, bookmarks, likes, and
    /// reading history first, then the novel row, all in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM chapters WHERE novel_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM comments WHERE novel_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM bookmarks WHERE novel_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM likes WHERE novel_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM reading_history WHERE novel_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM novels WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    /// Case-insensitive substring search over title, author, description,
    /// genre, and tags. The query is matched literally; `%`/`_` in the input
    /// are not wildcards.
    pub async fn search(pool: &PgPool, query_str: &str) -> Result<Vec<Novel>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(query_str));
        let query = format!(
            "SELECT {COLUMNS} FROM novels
             WHERE title ILIKE $1
                OR author ILIKE $1
                OR description ILIKE $1
                OR genre::TEXT ILIKE $1
                OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE $1)
             ORDER BY updated_at DESC"
        );
        sqlx::query_as::<_, Novel>(&query)
            .bind(&pattern)
            .fetch_all(pool)
            .await
    }

    /// Fetch a batch of novels by id for relation enrichment.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Novel>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM novels WHERE id = ANY($1)");
        sqlx::query_as::<_, Novel>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}

/// Escape LIKE/ILIKE metacharacters (`%`, `_`, and the `\` escape itself) so
/// user input matches as a literal substring.
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}
