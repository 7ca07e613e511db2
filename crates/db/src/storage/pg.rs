//! PostgreSQL-backed [`Storage`] implementation.
//!
//! Thin delegation layer: every method forwards to the matching repository
//! and lifts `sqlx::Error` into [`StorageError`].

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
use crate::repositories::{
    BookmarkRepo, ChapterRepo, CommentRepo, LikeRepo, NovelRepo, ReadingHistoryRepo, SessionRepo,
    UserRepo, UserSettingsRepo,
};
use crate::storage::{Storage, StorageResult};
use crate::DbPool;

/// Production storage backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgStorage {
    pool: DbPool,
}

impl PgStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    async fn get_user(&self, id: DbId) -> StorageResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }

    async fn get_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn create_user(&self, input: CreateUser) -> StorageResult<User> {
        Ok(UserRepo::create(&self.pool, &input).await?)
    }

    async fn update_user(&self, id: DbId, input: UpdateUser) -> StorageResult<Option<User>> {
        Ok(UserRepo::update(&self.pool, id, &input).await?)
    }

    async fn get_novels(&self, filter: NovelFilter) -> StorageResult<Vec<Novel>> {
        Ok(NovelRepo::list(&self.pool, &filter).await?)
    }

    async fn get_novel(&self, id: DbId) -> StorageResult<Option<Novel>> {
        Ok(NovelRepo::find_by_id(&self.pool, id).await?)
    }

    async fn get_featured_novels(&self, limit: i64) -> StorageResult<Vec<Novel>> {
        Ok(NovelRepo::list_featured(&self.pool, limit).await?)
    }

    async fn get_trending_novels(&self, limit: i64) -> StorageResult<Vec<Novel>> {
        Ok(NovelRepo::list_trending(&self.pool, limit).await?)
    }

    async fn get_recent_novels(&self, limit: i64) -> StorageResult<Vec<Novel>> {
        Ok(NovelRepo::list_recent(&self.pool, limit).await?)
    }

    async fn create_novel(&self, input: CreateNovel) -> StorageResult<Novel> {
        Ok(NovelRepo::create(&self.pool, &input).await?)
    }

    async fn update_novel(&self, id: DbId, input: UpdateNovel) -> StorageResult<Option<Novel>> {
        Ok(NovelRepo::update(&self.pool, id, &input).await?)
    }

    async fn delete_novel(&self, id: DbId) -> StorageResult<bool> {
        Ok(NovelRepo::delete(&self.pool, id).await?)
    }

    async fn search_novels(&self, query: &str) -> StorageResult<Vec<Novel>> {
        Ok(NovelRepo::search(&self.pool, query).await?)
    }

    async fn get_chapters(&self, novel_id: DbId) -> StorageResult<Vec<Chapter>> {
        Ok(ChapterRepo::list_for_novel(&self.pool, novel_id).await?)
    }

    async fn get_chapter(&self, id: DbId) -> StorageResult<Option<Chapter>> {
        Ok(ChapterRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_chapter(&self, input: CreateChapter) -> StorageResult<Chapter> {
        Ok(ChapterRepo::create(&self.pool, &input).await?)
    }

    async fn update_chapter(
        &self,
        id: DbId,
        input: UpdateChapter,
    ) -> StorageResult<Option<Chapter>> {
        Ok(ChapterRepo::update(&self.pool, id, &input).await?)
    }

    async fn delete_chapter(&self, id: DbId) -> StorageResult<bool> {
        Ok(ChapterRepo::delete(&self.pool, id).await?)
    }

    async fn get_comments(&self, novel_id: DbId) -> StorageResult<Vec<Comment>> {
        Ok(CommentRepo::list_for_novel(&self.pool, novel_id).await?)
    }

    async fn get_comment(&self, id: DbId) -> StorageResult<Option<Comment>> {
        Ok(CommentRepo::find_by_id(&self.pool, id).await?)
    }

    async fn create_comment(&self, input: CreateComment) -> StorageResult<Comment> {
        Ok(CommentRepo::create(&self.pool, &input).await?)
    }

    async fn delete_comment(&self, id: DbId) -> StorageResult<bool> {
        Ok(CommentRepo::delete(&self.pool, id).await?)
    }

    async fn get_bookmarks(&self, user_id: DbId) -> StorageResult<Vec<BookmarkWithNovel>> {
        Ok(BookmarkRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn create_bookmark(&self, input: CreateBookmark) -> StorageResult<Bookmark> {
        Ok(BookmarkRepo::upsert(&self.pool, &input).await?)
    }

    async fn delete_bookmark(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool> {
        Ok(BookmarkRepo::delete(&self.pool, user_id, novel_id).await?)
    }

    async fn is_bookmarked(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool> {
        Ok(BookmarkRepo::exists(&self.pool, user_id, novel_id).await?)
    }

    async fn get_reading_history(
        &self,
        user_id: DbId,
    ) -> StorageResult<Vec<ReadingHistoryWithContext>> {
        Ok(ReadingHistoryRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn update_reading_history(
        &self,
        input: CreateReadingHistory,
    ) -> StorageResult<ReadingHistory> {
        Ok(ReadingHistoryRepo::upsert(&self.pool, &input).await?)
    }

    async fn get_likes(&self, user_id: DbId) -> StorageResult<Vec<LikeWithNovel>> {
        Ok(LikeRepo::list_for_user(&self.pool, user_id).await?)
    }

    async fn create_like(&self, input: CreateLike) -> StorageResult<Like> {
        Ok(LikeRepo::create(&self.pool, &input).await?)
    }

    async fn delete_like(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool> {
        Ok(LikeRepo::delete(&self.pool, user_id, novel_id).await?)
    }

    async fn is_liked(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool> {
        Ok(LikeRepo::exists(&self.pool, user_id, novel_id).await?)
    }

    async fn get_user_settings(&self, user_id: DbId) -> StorageResult<Option<UserSettings>> {
        Ok(UserSettingsRepo::find_by_user(&self.pool, user_id).await?)
    }

    async fn update_user_settings(
        &self,
        user_id: DbId,
        input: UpdateUserSettings,
    ) -> StorageResult<UserSettings> {
        Ok(UserSettingsRepo::upsert(&self.pool, user_id, &input).await?)
    }

    async fn create_session(&self, input: CreateSession) -> StorageResult<Session> {
        Ok(SessionRepo::create(&self.pool, &input).await?)
    }

    async fn find_session_by_token_hash(
        &self,
        token_hash: &str,
    ) -> StorageResult<Option<Session>> {
        Ok(SessionRepo::find_by_token_hash(&self.pool, token_hash).await?)
    }

    async fn revoke_session(&self, id: DbId) -> StorageResult<bool> {
        Ok(SessionRepo::revoke(&self.pool, id).await?)
    }

    async fn revoke_all_sessions_for_user(&self, user_id: DbId) -> StorageResult<u64> {
        Ok(SessionRepo::revoke_all_for_user(&self.pool, user_id).await?)
    }
}
