//! Repository for the `user_settings` table.
//!
//! Settings are written with a single upsert: the first write materializes
//! the row from defaults, later writes patch only the provided fields.

use sqlx::PgPool;

use novelverse_core::types::DbId;

use crate::models::user_settings::{
    UpdateUserSettings, UserSettings, DEFAULT_BACKGROUND_COLOR, DEFAULT_FONT_FAMILY,
    DEFAULT_FONT_SIZE, DEFAULT_LINE_SPACING, DEFAULT_THEME,
};

/// Column list for user settings queries.
const COLUMNS: &str =
    "id, user_id, theme, font_size, font_family, line_spacing, background_color";

/// Provides per-user reader preferences.
pub struct UserSettingsRepo;

impl UserSettingsRepo {
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_settings WHERE user_id = $1");
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Patch the user's settings, creating the row from defaults first when
    /// it does not exist. Fields left unset keep their current value.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateUserSettings,
    ) -> Result<UserSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_settings
                (user_id, theme, font_size, font_family, line_spacing, background_color)
             VALUES ($1,
                     COALESCE($2, '{DEFAULT_THEME}'),
                     COALESCE($3, {DEFAULT_FONT_SIZE}),
                     COALESCE($4, '{DEFAULT_FONT_FAMILY}'),
                     COALESCE($5, {DEFAULT_LINE_SPACING}),
                     COALESCE($6, '{DEFAULT_BACKGROUND_COLOR}'))
             ON CONFLICT ON CONSTRAINT uq_user_settings_user
             DO UPDATE SET
                theme = COALESCE($2, user_settings.theme),
                font_size = COALESCE($3, user_settings.font_size),
                font_family = COALESCE($4, user_settings.font_family),
                line_spacing = COALESCE($5, user_settings.line_spacing),
                background_color = COALESCE($6, user_settings.background_color)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSettings>(&query)
            .bind(user_id)
            .bind(&input.theme)
            .bind(input.font_size)
            .bind(&input.font_family)
            .bind(input.line_spacing)
            .bind(&input.background_color)
            .fetch_one(pool)
            .await
    }
}
