//! Route definitions for chapter-by-id endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::chapters;
use crate::state::AppState;

/// Routes mounted at `/chapters`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{chapter_id}",
        get(chapters::get_chapter)
            .put(chapters::update_chapter)
            .delete(chapters::delete_chapter),
    )
}
