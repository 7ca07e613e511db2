//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod bookmarks;
pub mod chapters;
pub mod comments;
pub mod likes;
pub mod novels;
pub mod reading_history;
pub mod user_settings;
pub mod users;
