//! Session configuration
//!
//! Chosen once when a session starts, persisted as a JSON file next to the
//! binary. The sim never mutates these at runtime.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Who is playing this session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum UserKind {
    /// Regular player: upkeep drains score, stage gates apply
    #[default]
    Normal,
    /// Diagnostic mode: no upkeep, confirm key advances the stage directly
    Dev,
}

impl UserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserKind::Normal => "normal",
            UserKind::Dev => "dev",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "normal" => Some(UserKind::Normal),
            "dev" => Some(UserKind::Dev),
            _ => None,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// User mode for this session
    pub user_kind: UserKind,
    /// Connected user count. Stub for a future multi-user mode; stays 1 at
    /// runtime but is kept configurable so stage gates can be exercised.
    pub total_users: u32,
    /// RNG seed for the session
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_kind: UserKind::Normal,
            total_users: 1,
            seed: 1,
        }
    }
}

/// Settings file load/save failure
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "settings io error: {e}"),
            SettingsError::Parse(e) => write!(f, "settings parse error: {e}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_kind_round_trip() {
        assert_eq!(UserKind::from_str("dev"), Some(UserKind::Dev));
        assert_eq!(UserKind::from_str("Normal"), Some(UserKind::Normal));
        assert_eq!(UserKind::from_str("admin"), None);
        assert_eq!(UserKind::Dev.as_str(), "dev");
    }

    #[test]
    fn test_settings_json_round_trip() {
        let settings = Settings {
            user_kind: UserKind::Dev,
            total_users: 3,
            seed: 99,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.user_kind, UserKind::Dev);
        assert_eq!(back.total_users, 3);
        assert_eq!(back.seed, 99);
    }

    #[test]
    fn test_settings_reject_unknown_kind() {
        let json = r#"{"user_kind":"admin","total_users":1,"seed":1}"#;
        assert!(serde_json::from_str::<Settings>(json).is_err());
    }
}
