pub mod auth;
pub mod bookmarks;
pub mod chapters;
pub mod comments;
pub mod health;
pub mod likes;
pub mod novels;
pub mod reading_history;
pub mod user_settings;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /user                                get, update own profile (auth)
/// /user-settings                       get, update reader settings (auth)
///
/// /novels                              list, create (create: admin)
/// /novels/featured                     featured rail
/// /novels/trending                     trending rail
/// /novels/recent                       recently updated rail
/// /novels/search?query=                catalog search
/// /novels/{novel_id}                   get, update, delete (write: admin)
/// /novels/{novel_id}/chapters          list, create (create: admin)
/// /novels/{novel_id}/comments          list, create (create: auth)
/// /novels/{novel_id}/is-bookmarked     bookmark state (auth)
/// /novels/{novel_id}/is-liked          like state (auth)
///
/// /chapters/{chapter_id}               get, update, delete (write: admin)
/// /comments/{comment_id}               delete (owner or admin)
///
/// /bookmarks                           list, create (auth)
/// /bookmarks/{novel_id}                delete (auth)
/// /likes                               list, create (auth)
/// /likes/{novel_id}                    delete (auth)
/// /reading-history                     list, upsert (auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user", users::router())
        .nest("/user-settings", user_settings::router())
        .nest("/novels", novels::router())
        .nest("/chapters", chapters::router())
        .nest("/comments", comments::router())
        .nest("/bookmarks", bookmarks::router())
        .nest("/likes", likes::router())
        .nest("/reading-history", reading_history::router())
}
