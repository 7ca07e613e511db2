//! The canonical storage contract.
//!
//! Every persistence operation in the platform goes through [`Storage`].
//! [`PgStorage`] is the production implementation; [`MemStorage`] is a
//! behaviorally identical in-memory fake so unit and API tests run without a
//! database. Where the two ancestral implementations disagreed (sort keys for
//! featured/trending, fields covered by search), this trait's documentation
//! is the single resolved contract and both implementations follow it.

mod mem;
mod pg;

pub use mem::MemStorage;
pub use pg::PgStorage;

use async_trait::async_trait;

use novelverse_core::types::DbId;

use crate::models::bookmark::{Bookmark, BookmarkWithNovel, CreateBookmark};
use crate::models::chapter::{Chapter, CreateChapter, UpdateChapter};
use crate::models::comment::{Comment, CreateComment};
use crate::models::like::{CreateLike, Like, LikeWithNovel};
use crate::models::novel::{CreateNovel, Novel, NovelFilter, UpdateNovel};
use crate::models::reading_history::{
    CreateReadingHistory, ReadingHistory, ReadingHistoryWithContext,
};
use crate::models::session::{CreateSession, Session};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::models::user_settings::{UpdateUserSettings, UserSettings};

/// Errors surfaced by storage operations.
///
/// The in-memory implementation is infallible in practice but shares the
/// type so callers are written once against the trait.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Convenience alias for storage method results.
pub type StorageResult<T> = Result<T, StorageError>;

/// Single seam through which all persistence happens.
///
/// Contract notes shared by both implementations:
///
/// - Lookups by id return `Ok(None)` when the row is absent; the route layer
///   turns that into a 404. Deletes return `Ok(false)` when nothing existed.
/// - `get_featured_novels` / `get_trending_novels` sort by rating descending
///   with updated-at descending as tie-break.
/// - `search_novels` is a case-insensitive substring match over title,
///   author, description, genre, and tags.
/// - Deleting a novel cascades to its chapters, comments, bookmarks, likes,
///   and reading history (in that order) atomically.
/// - Chapter mutations refresh the parent novel's `updated_at`.
/// - Comment create/delete recomputes the parent novel's `rating` (rounded
///   mean of nonzero ratings, 0 when none) and `review_count` (total
///   comments) together with the write.
/// - `create_bookmark` is idempotent per (user, novel): a duplicate updates
///   the existing row's `chapter_id` instead of inserting.
/// - `create_like` / `delete_like` are idempotent; only actual state changes
///   move the novel's `likes` counter, which never goes below 0.
/// - Enriched listings (`get_bookmarks`, `get_likes`, `get_reading_history`)
///   silently skip rows whose referenced novel or chapter has been deleted.
#[async_trait]
pub trait Storage: Send + Sync {
    // --- Users ---

    async fn get_user(&self, id: DbId) -> StorageResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> StorageResult<Option<User>>;
    async fn create_user(&self, input: CreateUser) -> StorageResult<User>;
    async fn update_user(&self, id: DbId, input: UpdateUser) -> StorageResult<Option<User>>;

    // --- Novels ---

    /// List novels newest-first by update time, with optional exact-match
    /// genre filter; limit/offset apply after filtering.
    async fn get_novels(&self, filter: NovelFilter) -> StorageResult<Vec<Novel>>;
    async fn get_novel(&self, id: DbId) -> StorageResult<Option<Novel>>;
    async fn get_featured_novels(&self, limit: i64) -> StorageResult<Vec<Novel>>;
    async fn get_trending_novels(&self, limit: i64) -> StorageResult<Vec<Novel>>;
    async fn get_recent_novels(&self, limit: i64) -> StorageResult<Vec<Novel>>;
    async fn create_novel(&self, input: CreateNovel) -> StorageResult<Novel>;
    async fn update_novel(&self, id: DbId, input: UpdateNovel) -> StorageResult<Option<Novel>>;
    /// Cascade-delete the novel and everything referencing it. Returns
    /// whether a novel row was actually removed.
    async fn delete_novel(&self, id: DbId) -> StorageResult<bool>;
    async fn search_novels(&self, query: &str) -> StorageResult<Vec<Novel>>;

    // --- Chapters ---

    /// Chapters of a novel ordered by `chapter_number` ascending.
    async fn get_chapters(&self, novel_id: DbId) -> StorageResult<Vec<Chapter>>;
    async fn get_chapter(&self, id: DbId) -> StorageResult<Option<Chapter>>;
    async fn create_chapter(&self, input: CreateChapter) -> StorageResult<Chapter>;
    async fn update_chapter(&self, id: DbId, input: UpdateChapter)
        -> StorageResult<Option<Chapter>>;
    /// Deletes the chapter plus bookmarks pointing at it and its reading
    /// history rows, and refreshes the parent novel's `updated_at`.
    async fn delete_chapter(&self, id: DbId) -> StorageResult<bool>;

    // --- Comments ---

    /// Comments on a novel, newest first.
    async fn get_comments(&self, novel_id: DbId) -> StorageResult<Vec<Comment>>;
    async fn get_comment(&self, id: DbId) -> StorageResult<Option<Comment>>;
    async fn create_comment(&self, input: CreateComment) -> StorageResult<Comment>;
    async fn delete_comment(&self, id: DbId) -> StorageResult<bool>;

    // --- Bookmarks ---

    /// The user's bookmarks (newest first), each with its novel attached.
    async fn get_bookmarks(&self, user_id: DbId) -> StorageResult<Vec<BookmarkWithNovel>>;
    async fn create_bookmark(&self, input: CreateBookmark) -> StorageResult<Bookmark>;
    async fn delete_bookmark(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool>;
    async fn is_bookmarked(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool>;

    // --- Reading history ---

    /// The user's history (most recently read first), each row with its
    /// novel and chapter attached.
    async fn get_reading_history(
        &self,
        user_id: DbId,
    ) -> StorageResult<Vec<ReadingHistoryWithContext>>;
    /// Upsert keyed on (user, novel, chapter); always refreshes `last_read`.
    async fn update_reading_history(
        &self,
        input: CreateReadingHistory,
    ) -> StorageResult<ReadingHistory>;

    // --- Likes ---

    /// The user's likes (newest first), each with its novel attached.
    async fn get_likes(&self, user_id: DbId) -> StorageResult<Vec<LikeWithNovel>>;
    async fn create_like(&self, input: CreateLike) -> StorageResult<Like>;
    async fn delete_like(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool>;
    async fn is_liked(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool>;

    // --- User settings ---

    async fn get_user_settings(&self, user_id: DbId) -> StorageResult<Option<UserSettings>>;
    /// Upsert; unspecified fields keep their value, or take the documented
    /// defaults when the row is created.
    async fn update_user_settings(
        &self,
        user_id: DbId,
        input: UpdateUserSettings,
    ) -> StorageResult<UserSettings>;

    // --- Sessions ---

    async fn create_session(&self, input: CreateSession) -> StorageResult<Session>;
    /// Find a session by refresh-token digest that is neither revoked nor
    /// expired.
    async fn find_session_by_token_hash(&self, token_hash: &str)
        -> StorageResult<Option<Session>>;
    async fn revoke_session(&self, id: DbId) -> StorageResult<bool>;
    /// Revoke every active session of a user, returning how many were hit.
    async fn revoke_all_sessions_for_user(&self, user_id: DbId) -> StorageResult<u64>;
}
