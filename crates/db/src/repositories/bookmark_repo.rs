//! Repository for the `bookmarks` table.

use std::collections::HashMap;

use sqlx::PgPool;

use novelverse_core::types::DbId;

use crate::models::bookmark::{Bookmark, BookmarkWithNovel, CreateBookmark};
use crate::models::novel::Novel;
use crate::repositories::NovelRepo;

/// Column list for bookmarks queries.
const COLUMNS: &str = "id, user_id, novel_id, chapter_id, created_at";

/// Provides bookmark operations. At most one bookmark exists per
/// (user, novel), enforced by `uq_bookmarks_user_novel`.
pub struct BookmarkRepo;

impl BookmarkRepo {
    /// The user's bookmarks, newest first, each enriched with its novel via
    /// one batched lookup. Bookmarks whose novel has been deleted are
    /// skipped.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<BookmarkWithNovel>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookmarks
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        let bookmarks = sqlx::query_as::<_, Bookmark>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let novel_ids: Vec<DbId> = bookmarks.iter().map(|b| b.novel_id).collect();
        let novels: HashMap<DbId, Novel> = NovelRepo::find_by_ids(pool, &novel_ids)
            .await?
            .into_iter()
            .map(|n| (n.id, n))
            .collect();

        Ok(bookmarks
            .into_iter()
            .filter_map(|bookmark| {
                let novel = novels.get(&bookmark.novel_id)?.clone();
                Some(BookmarkWithNovel { bookmark, novel })
            })
            .collect())
    }

    /// Idempotent create: a duplicate (user, novel) updates the existing
    /// row's chapter pointer instead of inserting.
    pub async fn upsert(pool: &PgPool, input: &CreateBookmark) -> Result<Bookmark, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookmarks (user_id, novel_id, chapter_id)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_bookmarks_user_novel
             DO UPDATE SET chapter_id = EXCLUDED.chapter_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Bookmark>(&query)
            .bind(input.user_id)
            .bind(input.novel_id)
            .bind(input.chapter_id)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, user_id: DbId, novel_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE user_id = $1 AND novel_id = $2")
            .bind(user_id)
            .bind(novel_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn exists(pool: &PgPool, user_id: DbId, novel_id: DbId) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM bookmarks WHERE user_id = $1 AND novel_id = $2)",
        )
        .bind(user_id)
        .bind(novel_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
