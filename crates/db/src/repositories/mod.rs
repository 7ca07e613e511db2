//! Repository layer backing the PostgreSQL storage implementation.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Multi-statement mutations
//! (cascade deletes, aggregate recomputation, counter maintenance) run
//! inside a single transaction.

pub mod bookmark_repo;
pub mod chapter_repo;
pub mod comment_repo;
pub mod like_repo;
pub mod novel_repo;
pub mod reading_history_repo;
pub mod session_repo;
pub mod user_repo;
pub mod user_settings_repo;

pub use bookmark_repo::BookmarkRepo;
pub use chapter_repo::ChapterRepo;
pub use comment_repo::CommentRepo;
pub use like_repo::LikeRepo;
pub use novel_repo::NovelRepo;
pub use reading_history_repo::ReadingHistoryRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use user_settings_repo::UserSettingsRepo;
