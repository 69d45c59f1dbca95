use crate::models::settings::GridSettings;
use crate::services::database::Database;
use anyhow::{anyhow, Context, Result};

use super::mapper::row_to_settings;

pub struct SettingsService<'a> {
    db: &'a Database,
}

impl<'a> SettingsService<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Get the current grid settings
    pub fn get(&self) -> Result<GridSettings> {
        let conn = self.db.connection();

        let settings = conn
            .query_row(
                "SELECT id, day_start, day_end, slot_minutes, first_day_of_week
                 FROM settings WHERE id = 1",
                [],
                row_to_settings,
            )
            .context("Failed to load settings")?;

        Ok(settings)
    }

    /// Update grid settings
    pub fn update(&self, settings: &GridSettings) -> Result<()> {
        settings
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        let conn = self.db.connection();

        conn.execute(
            "UPDATE settings \
             SET day_start = ?1, \
                 day_end = ?2, \
                 slot_minutes = ?3, \
                 first_day_of_week = ?4, \
                 updated_at = CURRENT_TIMESTAMP \
             WHERE id = 1",
            rusqlite::params![
                settings.day_start.trim(),
                settings.day_end.trim(),
                settings.slot_minutes,
                settings.first_day_of_week,
            ],
        )
        .context("Failed to update settings")?;

        Ok(())
    }
}
