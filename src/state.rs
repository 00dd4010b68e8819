use crate::services::{ApiError, RickAndMortyClient, RICK_AND_MORTY_API_BASE};
use crate::utils::paths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const API_BASE_ENV: &str = "RICKMORTY_API_BASE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Max age per-character lookups may be served from cache (10 days).
    #[serde(default = "default_revalidate_secs")]
    pub revalidate_secs: u64,
    /// Known total used when the listing can't be reached.
    #[serde(default = "default_fallback_total")]
    pub fallback_total_characters: u64,
    #[serde(default = "default_true")]
    pub use_system_proxy: bool,
}

fn default_api_base_url() -> String {
    RICK_AND_MORTY_API_BASE.to_string()
}

fn default_user_agent() -> String {
    "RickMortyExplorer/0.1.0".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_revalidate_secs() -> u64 {
    crate::routes::REVALIDATE_SECS
}

fn default_fallback_total() -> u64 {
    826
}

fn default_true() -> bool {
    true
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            revalidate_secs: default_revalidate_secs(),
            fallback_total_characters: default_fallback_total(),
            use_system_proxy: true,
        }
    }
}

impl AppSettings {
    /// Read settings from `path`. Missing or broken files fall back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable settings {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                log::warn!("Failed to read settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Environment wins over the file for the API base.
    pub fn apply_env(mut self) -> Self {
        if let Ok(base) = std::env::var(API_BASE_ENV) {
            if !base.trim().is_empty() {
                self.api_base_url = base.trim().to_string();
            }
        }
        self
    }
}

pub struct AppState {
    pub settings: AppSettings,
    pub settings_path: PathBuf,
    pub client: RickAndMortyClient,
}

impl AppState {
    pub fn new(config: Option<PathBuf>) -> Result<Self, ApiError> {
        let settings_path = config.unwrap_or_else(|| {
            let _ = paths::init_directories();
            paths::get_settings_file()
        });
        let settings = AppSettings::load_from(&settings_path).apply_env();
        Self::with_settings(settings, settings_path)
    }

    pub fn with_settings(settings: AppSettings, settings_path: PathBuf) -> Result<Self, ApiError> {
        let client = RickAndMortyClient::new(&settings)?;
        log::info!("Using character API at {}", client.base_url());

        Ok(Self {
            settings,
            settings_path,
            client,
        })
    }

    pub fn save_settings(&self) -> anyhow::Result<()> {
        self.settings.save_to(&self.settings_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let settings = AppSettings::load_from(&dir.path().join("nope.json"));
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.revalidate_secs, 864000);
        assert_eq!(settings.fallback_total_characters, 826);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "apiBaseUrl": "http://localhost:8080/api", "timeoutSecs": 5 }"#)
            .unwrap();

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings.api_base_url, "http://localhost:8080/api");
        assert_eq!(settings.timeout_secs, 5);
        assert_eq!(settings.connect_timeout_secs, 10);
        assert!(settings.use_system_proxy);
    }

    #[test]
    fn broken_file_falls_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn env_overrides_api_base() {
        std::env::set_var(API_BASE_ENV, "  http://127.0.0.1:9000/api  ");
        let overridden = AppSettings::default().apply_env();

        std::env::set_var(API_BASE_ENV, "   ");
        let blank = AppSettings {
            api_base_url: "http://from-file/api".into(),
            ..AppSettings::default()
        }
        .apply_env();

        std::env::remove_var(API_BASE_ENV);
        let unset = AppSettings::default().apply_env();

        assert_eq!(overridden.api_base_url, "http://127.0.0.1:9000/api");
        assert_eq!(blank.api_base_url, "http://from-file/api");
        assert_eq!(unset.api_base_url, RICK_AND_MORTY_API_BASE);
    }

    #[test]
    fn save_then_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        let settings = AppSettings {
            user_agent: "test-agent".into(),
            use_system_proxy: false,
            ..AppSettings::default()
        };

        let state = AppState::with_settings(settings.clone(), path.clone()).unwrap();
        state.save_settings().unwrap();
        assert_eq!(AppSettings::load_from(&path), settings);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"userAgent\""));
    }
}
