//! Route definitions for the `/user-settings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::user_settings;
use crate::state::AppState;

/// Routes mounted at `/user-settings`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(user_settings::get_user_settings).put(user_settings::update_user_settings),
    )
}
