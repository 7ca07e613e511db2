//! Route definitions for the `/bookmarks` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::bookmarks;
use crate::state::AppState;

/// Routes mounted at `/bookmarks`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(bookmarks::list_bookmarks).post(bookmarks::create_bookmark),
        )
        .route("/{novel_id}", delete(bookmarks::delete_bookmark))
}
