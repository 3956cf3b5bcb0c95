//! Persisted settings for the lnwallet controllers.
//!
//! The settings document (`display_fiat`, `unit`, `fiat`, the cached
//! `exchange_rate` map) lives as a TOML file under the platform config
//! directory. Loading layers defaults, the file, and `LNWALLET_*`
//! environment variables; saving writes atomically through a temp file
//! so a crash never leaves a half-written document behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use thiserror::Error;
use tracing::debug;

use lnwallet_core::{CoreError, Settings, SettingsStore};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to serialize settings: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("settings loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings file path ──────────────────────────────────────────────

/// Resolve the settings file path via XDG / platform conventions.
pub fn settings_path() -> PathBuf {
    ProjectDirs::from("io", "lnwallet", "lnwallet").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("settings.toml");
            p
        },
        |dirs| dirs.config_dir().join("settings.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("lnwallet");
    p
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load settings from the canonical path plus environment overrides.
pub fn load_settings() -> Result<Settings, ConfigError> {
    load_settings_from(&settings_path())
}

/// Load settings from an explicit file path. Defaults fill any missing
/// field; a missing file yields pure defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Settings::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LNWALLET_"));

    let settings: Settings = figment.extract()?;
    Ok(settings)
}

/// Load settings, falling back to defaults on any failure.
pub fn load_settings_or_default() -> Settings {
    load_settings().unwrap_or_default()
}

// ── Saving ──────────────────────────────────────────────────────────

/// Serialize settings to TOML and write them to the canonical path.
pub fn save_settings(settings: &Settings) -> Result<(), ConfigError> {
    save_settings_to(&settings_path(), settings)
}

/// Atomic save: write to a temp file in the target directory, then
/// rename over the destination.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let toml_str = toml::to_string_pretty(settings)?;
    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(toml_str.as_bytes())?;
    tmp.persist(path).map_err(|err| err.error)?;

    debug!(path = %path.display(), "settings saved");
    Ok(())
}

// ── SettingsStore implementation ────────────────────────────────────

/// File-backed implementation of the core's settings persistence seam.
pub struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    /// Store at the canonical platform path.
    pub fn new() -> Self {
        Self {
            path: settings_path(),
        }
    }

    /// Store at an explicit path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted document, defaulting on any failure.
    pub fn load(&self) -> Settings {
        load_settings_from(&self.path).unwrap_or_default()
    }
}

impl Default for FileSettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore {
    async fn save(&self, settings: &Settings) -> Result<(), CoreError> {
        save_settings_to(&self.path, settings).map_err(|err| CoreError::Settings {
            message: err.to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use lnwallet_core::Unit;

    use super::*;

    fn sample_settings() -> Settings {
        let mut settings = Settings {
            display_fiat: true,
            unit: Unit::Bit,
            fiat: "eur".into(),
            ..Settings::default()
        };
        settings.exchange_rate.insert("eur".into(), 0.0001);
        settings
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let settings = sample_settings();
        save_settings_to(&path, &settings).unwrap();
        let loaded = load_settings_from(&path).unwrap();

        assert_eq!(loaded, settings);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_settings_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(loaded, Settings::default());
        assert_eq!(loaded.fiat, "usd");
        assert_eq!(loaded.unit, Unit::Btc);
    }

    #[test]
    fn partial_file_is_filled_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "display_fiat = true\n").unwrap();

        let loaded = load_settings_from(&path).unwrap();
        assert!(loaded.display_fiat);
        assert_eq!(loaded.unit, Unit::Btc);
        assert_eq!(loaded.fiat, "usd");
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("settings.toml");
        save_settings_to(&path, &Settings::default()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        save_settings_to(&path, &Settings::default()).unwrap();
        save_settings_to(&path, &sample_settings()).unwrap();
        let loaded = load_settings_from(&path).unwrap();
        assert!(loaded.display_fiat);
    }

    #[tokio::test]
    async fn file_settings_store_persists_through_the_seam() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let store = FileSettingsStore::at(&path);

        store.save(&sample_settings()).await.unwrap();

        assert_eq!(store.load(), sample_settings());
    }
}
