//! Handlers for the authenticated user's own profile.

use axum::extract::State;
use axum::Json;
use novelverse_core::error::CoreError;
use novelverse_db::models::user::{UpdateUser, User};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/user (auth required)
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<User>> {
    let user = state
        .storage
        .get_user(user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(user))
}

/// PUT /api/user (auth required)
///
/// Partial profile update (email, avatar, bio).
pub async fn update_current_user(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<User>> {
    input.validate()?;
    let updated = state
        .storage
        .update_user(user.user_id, input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(updated))
}
