//! Route definitions for comment-by-id endpoints.

use axum::routing::delete;
use axum::Router;

use crate::handlers::comments;
use crate::state::AppState;

/// Routes mounted at `/comments`.
pub fn router() -> Router<AppState> {
    Router::new().route("/{comment_id}", delete(comments::delete_comment))
}
