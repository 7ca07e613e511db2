//! Route definitions for the `/reading-history` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reading_history;
use crate::state::AppState;

/// Routes mounted at `/reading-history`.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(reading_history::list_reading_history)
            .post(reading_history::update_reading_history),
    )
}
