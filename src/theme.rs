//! Persisted dark/light theme flag.
//!
//! Stored as a JSON boolean (`true` = dark) under
//! [`config::THEME_PREFERENCE_KEY`]. Missing or unreadable values fall
//! back to dark; failures never reach the caller on the read path.

use std::path::PathBuf;

use rusqlite::Connection;

use crate::config;
use crate::db::{self, DatabaseError};
use crate::models::Theme;

/// Decode a stored value. `None` for anything but a JSON boolean.
pub fn decode_theme(raw: &str) -> Option<Theme> {
    serde_json::from_str::<bool>(raw.trim())
        .ok()
        .map(Theme::from_dark_flag)
}

pub fn encode_theme(theme: Theme) -> String {
    // bool serialization cannot fail
    serde_json::to_string(&theme.is_dark()).unwrap_or_else(|_| "true".to_string())
}

/// Read the theme from an open app database.
pub fn load_theme(conn: &Connection) -> Theme {
    match db::get_user_preference(conn, config::THEME_PREFERENCE_KEY) {
        Ok(Some(raw)) => decode_theme(&raw).unwrap_or_else(|| {
            tracing::warn!(value = %raw, "Corrupt theme preference, using dark");
            Theme::default()
        }),
        Ok(None) => Theme::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Cannot read theme preference, using dark");
            Theme::default()
        }
    }
}

pub fn save_theme(conn: &Connection, theme: Theme) -> Result<(), DatabaseError> {
    db::set_user_preference(conn, config::THEME_PREFERENCE_KEY, &encode_theme(theme))
}

/// Where preferences live. `Memory` keeps them for the process only
/// and is used by tests and when no data directory is writable.
#[derive(Debug, Clone)]
pub enum PreferenceStore {
    Disk(PathBuf),
    Memory,
}

impl PreferenceStore {
    pub fn default_disk() -> Self {
        Self::Disk(config::app_db_path())
    }

    fn open(&self) -> Result<Option<Connection>, DatabaseError> {
        match self {
            Self::Disk(path) => db::open_app_database(path).map(Some),
            Self::Memory => Ok(None),
        }
    }

    /// Theme at startup. Any failure yields dark.
    pub fn read_theme(&self) -> Theme {
        match self.open() {
            Ok(Some(conn)) => load_theme(&conn),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "Cannot open preferences, using dark theme");
                Theme::default()
            }
        }
    }

    pub fn write_theme(&self, theme: Theme) -> Result<(), DatabaseError> {
        match self.open()? {
            Some(conn) => save_theme(&conn, theme),
            None => Ok(()),
        }
    }
}
