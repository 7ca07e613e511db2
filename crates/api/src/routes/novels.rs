//! Route definitions for the `/novels` resource, including novel-scoped
//! chapters and comments.

use axum::routing::get;
use axum::Router;

use crate::handlers::{chapters, comments, novels};
use crate::state::AppState;

/// Routes mounted at `/novels`.
///
/// The static rails (`/featured`, `/trending`, `/recent`, `/search`) are
/// registered alongside `/{novel_id}`; the router matches static segments
/// before parameters.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(novels::list_novels).post(novels::create_novel))
        .route("/featured", get(novels::featured_novels))
        .route("/trending", get(novels::trending_novels))
        .route("/recent", get(novels::recent_novels))
        .route("/search", get(novels::search_novels))
        .route(
            "/{novel_id}",
            get(novels::get_novel)
                .put(novels::update_novel)
                .delete(novels::delete_novel),
        )
        .route(
            "/{novel_id}/chapters",
            get(chapters::list_chapters).post(chapters::create_chapter),
        )
        .route(
            "/{novel_id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/{novel_id}/is-bookmarked", get(novels::is_bookmarked))
        .route("/{novel_id}/is-liked", get(novels::is_liked))
}
