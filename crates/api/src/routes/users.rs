//! Route definitions for the `/user` (own profile) resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/user`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(users::get_current_user).put(users::update_current_user),
    )
}
