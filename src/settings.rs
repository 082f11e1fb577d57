use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, StmtError};
use crate::normalizer::{Policy, Profile, DEFAULT_DOMESTIC_CURRENCY};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub profile: Profile,
    #[serde(default = "default_domestic_currency")]
    pub domestic_currency: String,
}

fn default_domestic_currency() -> String {
    DEFAULT_DOMESTIC_CURRENCY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            domestic_currency: default_domestic_currency(),
        }
    }
}

impl Settings {
    pub fn policy(&self, profile: Option<Profile>) -> Policy {
        Policy::for_profile(profile.unwrap_or(self.profile), &self.domestic_currency)
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("stmtfix")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content)
        .map_err(|e| StmtError::Settings(format!("{}: {e}", path.display())))
}

/// Settings from the user config file; defaults when missing or unreadable.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path()).unwrap_or_else(|e| {
        tracing::warn!("ignoring settings: {e}");
        Settings::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::{CurrencyStyle, DateStyle};

    #[test]
    fn test_load_returns_defaults_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let s = load_settings_from(&dir.path().join("settings.json")).unwrap();
        assert_eq!(s.profile, Profile::Permissive);
        assert_eq!(s.domestic_currency, "INR");
    }

    #[test]
    fn test_load_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"profile": "strict"}"#).unwrap();
        let s = load_settings_from(&path).unwrap();
        assert_eq!(s.profile, Profile::Strict);
        assert_eq!(s.domestic_currency, "INR");
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{profile").unwrap();
        assert!(matches!(
            load_settings_from(&path),
            Err(StmtError::Settings(_))
        ));
    }

    #[test]
    fn test_flag_overrides_profile() {
        let s = Settings {
            profile: Profile::Permissive,
            domestic_currency: "LKR".to_string(),
        };
        let p = s.policy(Some(Profile::Strict));
        assert_eq!(p.date, DateStyle::Strict);
        assert_eq!(p.currency, CurrencyStyle::FixedCode);
        assert_eq!(s.policy(None).domestic_currency, "LKR");
    }
}
