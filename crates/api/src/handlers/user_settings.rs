//! Handlers for per-user reader settings.

use axum::extract::State;
use axum::Json;
use novelverse_db::models::user_settings::{UpdateUserSettings, UserSettings};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/user-settings (auth required)
///
/// Materializes the defaults on first read so the client always gets a row.
pub async fn get_user_settings(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UserSettings>> {
    let settings = match state.storage.get_user_settings(user.user_id).await? {
        Some(settings) => settings,
        None => {
            state
                .storage
                .update_user_settings(user.user_id, UpdateUserSettings::default())
                .await?
        }
    };
    Ok(Json(settings))
}

/// PUT /api/user-settings (auth required)
///
/// Partial update; omitted fields keep their current value.
pub async fn update_user_settings(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateUserSettings>,
) -> AppResult<Json<UserSettings>> {
    let settings = state
        .storage
        .update_user_settings(user.user_id, input)
        .await?;
    Ok(Json(settings))
}
