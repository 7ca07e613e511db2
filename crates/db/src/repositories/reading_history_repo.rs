//! Repository for the `reading_history` table.

use std::collections::HashMap;

use sqlx::PgPool;

use novelverse_core::types::DbId;

use crate::models::chapter::Chapter;
use crate::models::novel::Novel;
use crate::models::reading_history::{
    CreateReadingHistory, ReadingHistory, ReadingHistoryWithContext,
};
use crate::repositories::{ChapterRepo, NovelRepo};

/// Column list for reading history queries.
const COLUMNS: &str = "id, user_id, novel_id, chapter_id, progress, last_read";

/// Provides reading progress tracking. One row exists per
/// (user, novel, chapter), enforced by `uq_reading_history_user_novel_chapter`.
pub struct ReadingHistoryRepo;

impl ReadingHistoryRepo {
    /// The user's reading history, most recently read first, enriched with
    /// each entry's novel and chapter via batched lookups. Entries whose
    /// novel or chapter has been deleted are skipped.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<ReadingHistoryWithContext>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reading_history
             WHERE user_id = $1
             ORDER BY last_read DESC"
        );
        let entries = sqlx::query_as::<_, ReadingHistory>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;

        let novel_ids: Vec<DbId> = entries.iter().map(|e| e.novel_id).collect();
        let chapter_ids: Vec<DbId> = entries.iter().map(|e| e.chapter_id).collect();
        let novels: HashMap<DbId, Novel> = NovelRepo::find_by_ids(pool, &novel_ids)
            .await?
            .into_iter()
            .map(|n| (n.id, n))
            .collect();
        let chapters: HashMap<DbId, Chapter> = ChapterRepo::find_by_ids(pool, &chapter_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();

        Ok(entries
            .into_iter()
            .filter_map(|history| {
                let novel = novels.get(&history.novel_id)?.clone();
                let chapter = chapters.get(&history.chapter_id)?.clone();
                Some(ReadingHistoryWithContext {
                    history,
                    novel,
                    chapter,
                })
            })
            .collect())
    }

    /// Record progress for a (user, novel, chapter). A repeat visit updates
    /// the existing row's progress and bumps `last_read`.
    pub async fn upsert(
        pool: &PgPool,
        input: &CreateReadingHistory,
    ) -> Result<ReadingHistory, sqlx::Error> {
        let query = format!(
            "INSERT INTO reading_history (user_id, novel_id, chapter_id, progress)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT ON CONSTRAINT uq_reading_history_user_novel_chapter
             DO UPDATE SET progress = EXCLUDED.progress, last_read = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ReadingHistory>(&query)
            .bind(input.user_id)
            .bind(input.novel_id)
            .bind(input.chapter_id)
            .bind(input.progress)
            .fetch_one(pool)
            .await
    }
}
