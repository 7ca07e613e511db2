//! Per-user reading preference model.

use novelverse_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Default theme applied when a user has never saved settings.
pub const DEFAULT_THEME: &str = "dark";
/// Default reader font size in pixels.
pub const DEFAULT_FONT_SIZE: i32 = 18;
/// Default reader font family.
pub const DEFAULT_FONT_FAMILY: &str = "serif";
/// Default line spacing in percent.
pub const DEFAULT_LINE_SPACING: i32 = 150;
/// Default reader background.
pub const DEFAULT_BACKGROUND_COLOR: &str = "dark";

/// A row from the `user_settings` table (one per user, created lazily).
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub id: DbId,
    pub user_id: DbId,
    pub theme: String,
    pub font_size: i32,
    pub font_family: String,
    pub line_spacing: i32,
    pub background_color: String,
}

/// DTO for partial settings updates. Unset fields keep their current value,
/// or the documented default when the row is being created.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserSettings {
    pub theme: Option<String>,
    pub font_size: Option<i32>,
    pub font_family: Option<String>,
    pub line_spacing: Option<i32>,
    pub background_color: Option<String>,
}
