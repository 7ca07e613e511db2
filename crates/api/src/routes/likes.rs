//! Route definitions for the `/likes` resource.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::likes;
use crate::state::AppState;

/// Routes mounted at `/likes`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(likes::list_likes).post(likes::create_like))
        .route("/{novel_id}", delete(likes::delete_like))
}
