//! Map-based storage for tests and local development.
//!
//! Single-process only: all state lives behind one `Mutex`, which is never
//! held across an await point. Ids are handed out from per-table counters
//! starting at 1, mirroring BIGSERIAL.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use novelverse_core::rating::aggregate_rating;
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
use crate::models::user_settings::{self, UpdateUserSettings, UserSettings};
use crate::storage::{Storage, StorageResult};

#[derive(Default)]
struct Tables {
    users: HashMap<DbId, User>,
    novels: HashMap<DbId, Novel>,
    chapters: HashMap<DbId, Chapter>,
    comments: HashMap<DbId, Comment>,
    bookmarks: HashMap<DbId, Bookmark>,
    reading_history: HashMap<DbId, ReadingHistory>,
    likes: HashMap<DbId, Like>,
    user_settings: HashMap<DbId, UserSettings>,
    sessions: HashMap<DbId, Session>,
    next_id: [DbId; 9],
}

/// Index into `Tables::next_id` per entity.
#[derive(Clone, Copy)]
enum Seq {
    User,
    Novel,
    Chapter,
    Comment,
    Bookmark,
    ReadingHistory,
    Like,
    UserSettings,
    Session,
}

impl Tables {
    fn next(&mut self, seq: Seq) -> DbId {
        let slot = &mut self.next_id[seq as usize];
        *slot += 1;
        *slot
    }

    /// Recompute a novel's aggregate rating and review count from its
    /// comments. Does not touch `updated_at`; only chapter mutations and
    /// explicit updates do that.
    fn recompute_novel_rating(&mut self, novel_id: DbId) {
        let ratings: Vec<i32> = self
            .comments
            .values()
            .filter(|c| c.novel_id == novel_id)
            .map(|c| c.rating)
            .collect();
        if let Some(novel) = self.novels.get_mut(&novel_id) {
            novel.rating = aggregate_rating(&ratings);
            novel.review_count = ratings.len() as i32;
        }
    }

    fn touch_novel(&mut self, novel_id: DbId) {
        if let Some(novel) = self.novels.get_mut(&novel_id) {
            novel.updated_at = Utc::now();
        }
    }
}

/// In-memory [`Storage`] implementation.
#[derive(Default)]
pub struct MemStorage {
    inner: Mutex<Tables>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.inner.lock().expect("MemStorage mutex poisoned")
    }
}

fn matches_query(novel: &Novel, needle: &str) -> bool {
    novel.title.to_lowercase().contains(needle)
        || novel.author.to_lowercase().contains(needle)
        || novel.description.to_lowercase().contains(needle)
        || novel.genre.as_str().to_lowercase().contains(needle)
        || novel
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Sort for featured/trending surfaces: rating first, freshness as tie-break.
fn by_rating_then_updated(a: &Novel, b: &Novel) -> std::cmp::Ordering {
    b.rating
        .cmp(&a.rating)
        .then(b.updated_at.cmp(&a.updated_at))
}

#[async_trait]
impl Storage for MemStorage {
    // --- Users ---

    async fn get_user(&self, id: DbId) -> StorageResult<Option<User>> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> StorageResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn create_user(&self, input: CreateUser) -> StorageResult<User> {
        let mut tables = self.lock();
        let id = tables.next(Seq::User);
        let user = User {
            id,
            username: input.username,
            password_hash: input.password_hash,
            email: input.email,
            avatar: input.avatar,
            bio: input.bio,
            is_admin: input.is_admin,
            created_at: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: DbId, input: UpdateUser) -> StorageResult<Option<User>> {
        let mut tables = self.lock();
        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(email) = input.email {
            user.email = email;
        }
        if let Some(avatar) = input.avatar {
            user.avatar = Some(avatar);
        }
        if let Some(bio) = input.bio {
            user.bio = Some(bio);
        }
        Ok(Some(user.clone()))
    }

    // --- Novels ---

    async fn get_novels(&self, filter: NovelFilter) -> StorageResult<Vec<Novel>> {
        let tables = self.lock();
        let mut novels: Vec<Novel> = tables
            .novels
            .values()
            .filter(|n| filter.genre.map_or(true, |g| n.genre == g))
            .cloned()
            .collect();
        novels.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

        let offset = filter.offset.unwrap_or(0).max(0) as usize;
        let mut novels: Vec<Novel> = novels.into_iter().skip(offset).collect();
        if let Some(limit) = filter.limit {
            novels.truncate(limit.max(0) as usize);
        }
        Ok(novels)
    }

    async fn get_novel(&self, id: DbId) -> StorageResult<Option<Novel>> {
        Ok(self.lock().novels.get(&id).cloned())
    }

    async fn get_featured_novels(&self, limit: i64) -> StorageResult<Vec<Novel>> {
        let tables = self.lock();
        let mut novels: Vec<Novel> = tables
            .novels
            .values()
            .filter(|n| n.is_featured)
            .cloned()
            .collect();
        novels.sort_by(by_rating_then_updated);
        novels.truncate(limit.max(0) as usize);
        Ok(novels)
    }

    async fn get_trending_novels(&self, limit: i64) -> StorageResult<Vec<Novel>> {
        let tables = self.lock();
        let mut novels: Vec<Novel> = tables
            .novels
            .values()
            .filter(|n| n.is_trending)
            .cloned()
            .collect();
        novels.sort_by(by_rating_then_updated);
        novels.truncate(limit.max(0) as usize);
        Ok(novels)
    }

    async fn get_recent_novels(&self, limit: i64) -> StorageResult<Vec<Novel>> {
        let tables = self.lock();
        let mut novels: Vec<Novel> = tables.novels.values().cloned().collect();
        novels.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        novels.truncate(limit.max(0) as usize);
        Ok(novels)
    }

    async fn create_novel(&self, input: CreateNovel) -> StorageResult<Novel> {
        let mut tables = self.lock();
        let id = tables.next(Seq::Novel);
        let now = Utc::now();
        let novel = Novel {
            id,
            title: input.title,
            author: input.author,
            cover_image: input.cover_image,
            description: input.description,
            genre: input.genre,
            tags: input.tags,
            rating: 0,
            review_count: 0,
            is_featured: input.is_featured,
            is_trending: input.is_trending,
            views: 0,
            likes: 0,
            created_at: now,
            updated_at: now,
            created_by: input.created_by,
        };
        tables.novels.insert(id, novel.clone());
        Ok(novel)
    }

    async fn update_novel(&self, id: DbId, input: UpdateNovel) -> StorageResult<Option<Novel>> {
        let mut tables = self.lock();
        let Some(novel) = tables.novels.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = input.title {
            novel.title = title;
        }
        if let Some(author) = input.author {
            novel.author = author;
        }
        if let Some(cover_image) = input.cover_image {
            novel.cover_image = Some(cover_image);
        }
        if let Some(description) = input.description {
            novel.description = description;
        }
        if let Some(genre) = input.genre {
            novel.genre = genre;
        }
        if let Some(tags) = input.tags {
            novel.tags = tags;
        }
        if let Some(is_featured) = input.is_featured {
            novel.is_featured = is_featured;
        }
        if let Some(is_trending) = input.is_trending {
            novel.is_trending = is_trending;
        }
        if let Some(views) = input.views {
            novel.views = views;
        }
        novel.updated_at = Utc::now();
        Ok(Some(novel.clone()))
    }

    async fn delete_novel(&self, id: DbId) -> StorageResult<bool> {
        let mut tables = self.lock();
        if !tables.novels.contains_key(&id) {
            return Ok(false);
        }
        tables.chapters.retain(|_, c| c.novel_id != id);
        tables.comments.retain(|_, c| c.novel_id != id);
        tables.bookmarks.retain(|_, b| b.novel_id != id);
        tables.likes.retain(|_, l| l.novel_id != id);
        tables.reading_history.retain(|_, h| h.novel_id != id);
        Ok(tables.novels.remove(&id).is_some())
    }

    async fn search_novels(&self, query: &str) -> StorageResult<Vec<Novel>> {
        let needle = query.to_lowercase();
        let tables = self.lock();
        let mut novels: Vec<Novel> = tables
            .novels
            .values()
            .filter(|n| matches_query(n, &needle))
            .cloned()
            .collect();
        novels.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(novels)
    }

    // --- Chapters ---

    async fn get_chapters(&self, novel_id: DbId) -> StorageResult<Vec<Chapter>> {
        let tables = self.lock();
        let mut chapters: Vec<Chapter> = tables
            .chapters
            .values()
            .filter(|c| c.novel_id == novel_id)
            .cloned()
            .collect();
        chapters.sort_by_key(|c| c.chapter_number);
        Ok(chapters)
    }

    async fn get_chapter(&self, id: DbId) -> StorageResult<Option<Chapter>> {
        Ok(self.lock().chapters.get(&id).cloned())
    }

    async fn create_chapter(&self, input: CreateChapter) -> StorageResult<Chapter> {
        let mut tables = self.lock();
        let id = tables.next(Seq::Chapter);
        let now = Utc::now();
        let chapter = Chapter {
            id,
            novel_id: input.novel_id,
            title: input.title,
            content: input.content,
            chapter_number: input.chapter_number,
            created_at: now,
            updated_at: now,
        };
        tables.chapters.insert(id, chapter.clone());
        tables.touch_novel(chapter.novel_id);
        Ok(chapter)
    }

    async fn update_chapter(
        &self,
        id: DbId,
        input: UpdateChapter,
    ) -> StorageResult<Option<Chapter>> {
        let mut tables = self.lock();
        let Some(chapter) = tables.chapters.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = input.title {
            chapter.title = title;
        }
        if let Some(content) = input.content {
            chapter.content = content;
        }
        if let Some(chapter_number) = input.chapter_number {
            chapter.chapter_number = chapter_number;
        }
        chapter.updated_at = Utc::now();
        let updated = chapter.clone();
        tables.touch_novel(updated.novel_id);
        Ok(Some(updated))
    }

    async fn delete_chapter(&self, id: DbId) -> StorageResult<bool> {
        let mut tables = self.lock();
        let Some(chapter) = tables.chapters.remove(&id) else {
            return Ok(false);
        };
        tables.bookmarks.retain(|_, b| b.chapter_id != Some(id));
        tables.reading_history.retain(|_, h| h.chapter_id != id);
        tables.touch_novel(chapter.novel_id);
        Ok(true)
    }

    // --- Comments ---

    async fn get_comments(&self, novel_id: DbId) -> StorageResult<Vec<Comment>> {
        let tables = self.lock();
        let mut comments: Vec<Comment> = tables
            .comments
            .values()
            .filter(|c| c.novel_id == novel_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn get_comment(&self, id: DbId) -> StorageResult<Option<Comment>> {
        Ok(self.lock().comments.get(&id).cloned())
    }

    async fn create_comment(&self, input: CreateComment) -> StorageResult<Comment> {
        let mut tables = self.lock();
        let id = tables.next(Seq::Comment);
        let comment = Comment {
            id,
            novel_id: input.novel_id,
            user_id: input.user_id,
            content: input.content,
            rating: input.rating,
            created_at: Utc::now(),
        };
        tables.comments.insert(id, comment.clone());
        tables.recompute_novel_rating(comment.novel_id);
        Ok(comment)
    }

    async fn delete_comment(&self, id: DbId) -> StorageResult<bool> {
        let mut tables = self.lock();
        let Some(comment) = tables.comments.remove(&id) else {
            return Ok(false);
        };
        tables.recompute_novel_rating(comment.novel_id);
        Ok(true)
    }

    // --- Bookmarks ---

    async fn get_bookmarks(&self, user_id: DbId) -> StorageResult<Vec<BookmarkWithNovel>> {
        let tables = self.lock();
        let mut bookmarks: Vec<Bookmark> = tables
            .bookmarks
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        bookmarks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookmarks
            .into_iter()
            .filter_map(|bookmark| {
                let novel = tables.novels.get(&bookmark.novel_id)?.clone();
                Some(BookmarkWithNovel { bookmark, novel })
            })
            .collect())
    }

    async fn create_bookmark(&self, input: CreateBookmark) -> StorageResult<Bookmark> {
        let mut tables = self.lock();
        let existing = tables
            .bookmarks
            .values_mut()
            .find(|b| b.user_id == input.user_id && b.novel_id == input.novel_id);
        if let Some(bookmark) = existing {
            bookmark.chapter_id = input.chapter_id;
            return Ok(bookmark.clone());
        }
        let id = tables.next(Seq::Bookmark);
        let bookmark = Bookmark {
            id,
            user_id: input.user_id,
            novel_id: input.novel_id,
            chapter_id: input.chapter_id,
            created_at: Utc::now(),
        };
        tables.bookmarks.insert(id, bookmark.clone());
        Ok(bookmark)
    }

    async fn delete_bookmark(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool> {
        let mut tables = self.lock();
        let id = tables
            .bookmarks
            .values()
            .find(|b| b.user_id == user_id && b.novel_id == novel_id)
            .map(|b| b.id);
        match id {
            Some(id) => Ok(tables.bookmarks.remove(&id).is_some()),
            None => Ok(false),
        }
    }

    async fn is_bookmarked(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool> {
        Ok(self
            .lock()
            .bookmarks
            .values()
            .any(|b| b.user_id == user_id && b.novel_id == novel_id))
    }

    // --- Reading history ---

    async fn get_reading_history(
        &self,
        user_id: DbId,
    ) -> StorageResult<Vec<ReadingHistoryWithContext>> {
        let tables = self.lock();
        let mut rows: Vec<ReadingHistory> = tables
            .reading_history
            .values()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.last_read.cmp(&a.last_read));
        Ok(rows
            .into_iter()
            .filter_map(|history| {
                let novel = tables.novels.get(&history.novel_id)?.clone();
                let chapter = tables.chapters.get(&history.chapter_id)?.clone();
                Some(ReadingHistoryWithContext {
                    history,
                    novel,
                    chapter,
                })
            })
            .collect())
    }

    async fn update_reading_history(
        &self,
        input: CreateReadingHistory,
    ) -> StorageResult<ReadingHistory> {
        let mut tables = self.lock();
        let existing = tables.reading_history.values_mut().find(|h| {
            h.user_id == input.user_id
                && h.novel_id == input.novel_id
                && h.chapter_id == input.chapter_id
        });
        if let Some(history) = existing {
            history.progress = input.progress;
            history.last_read = Utc::now();
            return Ok(history.clone());
        }
        let id = tables.next(Seq::ReadingHistory);
        let history = ReadingHistory {
            id,
            user_id: input.user_id,
            novel_id: input.novel_id,
            chapter_id: input.chapter_id,
            progress: input.progress,
            last_read: Utc::now(),
        };
        tables.reading_history.insert(id, history.clone());
        Ok(history)
    }

    // --- Likes ---

    async fn get_likes(&self, user_id: DbId) -> StorageResult<Vec<LikeWithNovel>> {
        let tables = self.lock();
        let mut likes: Vec<Like> = tables
            .likes
            .values()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        likes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(likes
            .into_iter()
            .filter_map(|like| {
                let novel = tables.novels.get(&like.novel_id)?.clone();
                Some(LikeWithNovel { like, novel })
            })
            .collect())
    }

    async fn create_like(&self, input: CreateLike) -> StorageResult<Like> {
        let mut tables = self.lock();
        let existing = tables
            .likes
            .values()
            .find(|l| l.user_id == input.user_id && l.novel_id == input.novel_id)
            .cloned();
        if let Some(like) = existing {
            return Ok(like);
        }
        let id = tables.next(Seq::Like);
        let like = Like {
            id,
            user_id: input.user_id,
            novel_id: input.novel_id,
            created_at: Utc::now(),
        };
        tables.likes.insert(id, like.clone());
        if let Some(novel) = tables.novels.get_mut(&like.novel_id) {
            novel.likes += 1;
        }
        Ok(like)
    }

    async fn delete_like(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool> {
        let mut tables = self.lock();
        let id = tables
            .likes
            .values()
            .find(|l| l.user_id == user_id && l.novel_id == novel_id)
            .map(|l| l.id);
        let Some(id) = id else {
            return Ok(false);
        };
        tables.likes.remove(&id);
        if let Some(novel) = tables.novels.get_mut(&novel_id) {
            novel.likes = (novel.likes - 1).max(0);
        }
        Ok(true)
    }

    async fn is_liked(&self, user_id: DbId, novel_id: DbId) -> StorageResult<bool> {
        Ok(self
            .lock()
            .likes
            .values()
            .any(|l| l.user_id == user_id && l.novel_id == novel_id))
    }

    // --- User settings ---

    async fn get_user_settings(&self, user_id: DbId) -> StorageResult<Option<UserSettings>> {
        Ok(self
            .lock()
            .user_settings
            .values()
            .find(|s| s.user_id == user_id)
            .cloned())
    }

    async fn update_user_settings(
        &self,
        user_id: DbId,
        input: UpdateUserSettings,
    ) -> StorageResult<UserSettings> {
        let mut tables = self.lock();
        let existing = tables
            .user_settings
            .values_mut()
            .find(|s| s.user_id == user_id);
        if let Some(settings) = existing {
            if let Some(theme) = input.theme {
                settings.theme = theme;
            }
            if let Some(font_size) = input.font_size {
                settings.font_size = font_size;
            }
            if let Some(font_family) = input.font_family {
                settings.font_family = font_family;
            }
            if let Some(line_spacing) = input.line_spacing {
                settings.line_spacing = line_spacing;
            }
            if let Some(background_color) = input.background_color {
                settings.background_color = background_color;
            }
            return Ok(settings.clone());
        }
        let id = tables.next(Seq::UserSettings);
        let settings = UserSettings {
            id,
            user_id,
            theme: input
                .theme
                .unwrap_or_else(|| user_settings::DEFAULT_THEME.to_string()),
            font_size: input.font_size.unwrap_or(user_settings::DEFAULT_FONT_SIZE),
            font_family: input
                .font_family
                .unwrap_or_else(|| user_settings::DEFAULT_FONT_FAMILY.to_string()),
            line_spacing: input
                .line_spacing
                .unwrap_or(user_settings::DEFAULT_LINE_SPACING),
            background_color: input
                .background_color
                .unwrap_or_else(|| user_settings::DEFAULT_BACKGROUND_COLOR.to_string()),
        };
        tables.user_settings.insert(id, settings.clone());
        Ok(settings)
    }

    // --- Sessions ---

    async fn create_session(&self, input: CreateSession) -> StorageResult<Session> {
        let mut tables = self.lock();
        let id = tables.next(Seq::Session);
        let session = Session {
            id,
            user_id: input.user_id,
            refresh_token_hash: input.refresh_token_hash,
            expires_at: input.expires_at,
            revoked_at: None,
            created_at: Utc::now(),
        };
        tables.sessions.insert(id, session.clone());
        Ok(session)
    }

    async fn find_session_by_token_hash(
        &self,
        token_hash: &str,
    ) -> StorageResult<Option<Session>> {
        let now = Utc::now();
        Ok(self
            .lock()
            .sessions
            .values()
            .find(|s| {
                s.refresh_token_hash == token_hash && s.revoked_at.is_none() && s.expires_at > now
            })
            .cloned())
    }

    async fn revoke_session(&self, id: DbId) -> StorageResult<bool> {
        let mut tables = self.lock();
        match tables.sessions.get_mut(&id) {
            Some(session) if session.revoked_at.is_none() => {
                session.revoked_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn revoke_all_sessions_for_user(&self, user_id: DbId) -> StorageResult<u64> {
        let mut tables = self.lock();
        let now = Utc::now();
        let mut count = 0;
        for session in tables
            .sessions
            .values_mut()
            .filter(|s| s.user_id == user_id && s.revoked_at.is_none())
        {
            session.revoked_at = Some(now);
            count += 1;
        }
        Ok(count)
    }
}
