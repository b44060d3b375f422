//! Settings storage (key/value).

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};
use crate::config::Settings;

const SETTINGS_KEY: &str = "user_settings";

impl Database {
    /// Get a raw setting value.
    pub fn get_setting(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row("SELECT value FROM settings WHERE key = ?", [key], |row| row.get(0))
            .optional()
            .map_err(Into::into)
    }

    /// Set a raw setting value.
    pub fn set_setting(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![key, value],
        )?;
        Ok(())
    }

    /// Load user settings, or defaults if none were saved.
    pub fn load_settings(&self) -> DbResult<Settings> {
        let settings: Settings = match self.get_setting(SETTINGS_KEY)? {
            Some(json) => serde_json::from_str(&json)?,
            None => Settings::default(),
        };
        settings
            .validate()
            .map_err(|e| DbError::InvalidSettings(e.to_string()))?;
        Ok(settings)
    }

    /// Save user settings.
    pub fn save_settings(&self, settings: &Settings) -> DbResult<()> {
        let json = serde_json::to_string(settings)?;
        self.set_setting(SETTINGS_KEY, &json)
    }
}
