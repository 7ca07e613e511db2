//! User account model.

use novelverse_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `users` table. The password hash is never serialized.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub is_admin: bool,
    pub created_at: Timestamp,
}

/// Storage-level input for creating a user. The password has already been
/// hashed by the API layer; plaintext never reaches this crate.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub avatar: Option<String>,
    pub bio: Option<String>,
    pub is_admin: bool,
}

/// DTO for profile updates.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub bio: Option<String>,
}
