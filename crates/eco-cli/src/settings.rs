//! User settings, read from `settings.toml`.
//!
//! The default location is the platform configuration folder:
//! - Linux: ~/.config/ecoinspect/
//! - macOS: ~/Library/Application Support/id.go.ecoinspect.EcoInspect/
//! - Windows: %APPDATA%/EcoInspect/EcoInspect/config/
//!
//! A missing or unreadable file is never an error; defaults are used.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const APP_QUALIFIER: &str = "id.go";
const APP_ORG: &str = "EcoInspect";
const APP_NAME: &str = "EcoInspect";
const CONFIG_FILENAME: &str = "settings.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub wizard: WizardSettings,
    pub geolocation: GeolocationSettings,
    pub print: PrintSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Directory holding the slot files. Defaults to the platform data folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardSettings {
    /// Simulated commit delay when finalizing an inspection.
    pub submit_latency_ms: u64,
}

impl Default for WizardSettings {
    fn default() -> Self {
        Self {
            submit_latency_ms: 1500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeolocationSettings {
    pub timeout_ms: u64,
}

impl Default for GeolocationSettings {
    fn default() -> Self {
        Self { timeout_ms: 10_000 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    /// Pause between preparing the print view and printing.
    pub delay_ms: u64,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self { delay_ms: 500 }
    }
}

impl Settings {
    pub fn submit_latency(&self) -> Duration {
        Duration::from_millis(self.wizard.submit_latency_ms)
    }

    pub fn location_timeout(&self) -> Duration {
        Duration::from_millis(self.geolocation.timeout_ms)
    }

    pub fn print_delay(&self) -> Duration {
        Duration::from_millis(self.print.delay_ms)
    }

    /// Data directory: explicit override, then settings, then the platform
    /// data folder, then `./ecoinspect-data`.
    pub fn data_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        if let Some(dir) = override_dir {
            return dir.to_path_buf();
        }
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }
        ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("ecoinspect-data"))
    }
}

/// Default settings file location, if the platform has one.
pub fn settings_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

/// Load settings from `path`, or from [`settings_path`] when `None`.
pub fn load_settings(path: Option<&Path>) -> Settings {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match settings_path() {
            Some(path) => path,
            None => {
                tracing::warn!("Could not determine settings path, using defaults");
                return Settings::default();
            }
        },
    };

    match fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                tracing::debug!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                tracing::warn!("Failed to parse settings file {:?}: {}, using defaults", path, e);
                Settings::default()
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No settings file at {:?}, using defaults", path);
            Settings::default()
        }
        Err(e) => {
            tracing::warn!("Failed to read settings file {:?}: {}, using defaults", path, e);
            Settings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_other_defaults() {
        let settings: Settings = toml::from_str("[wizard]\nsubmit_latency_ms = 0\n").unwrap();
        assert_eq!(settings.submit_latency(), Duration::ZERO);
        assert_eq!(settings.location_timeout(), Duration::from_secs(10));
        assert_eq!(settings.print_delay(), Duration::from_millis(500));
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "[wizard\nsubmit_latency_ms = ").unwrap();
        assert_eq!(load_settings(Some(&path)), Settings::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(Some(&dir.path().join("absent.toml")));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn data_dir_prefers_override() {
        let settings: Settings = toml::from_str("[storage]\ndata_dir = \"/srv/eco\"\n").unwrap();
        assert_eq!(settings.data_dir(None), PathBuf::from("/srv/eco"));
        assert_eq!(
            settings.data_dir(Some(Path::new("/tmp/other"))),
            PathBuf::from("/tmp/other")
        );
    }

    #[test]
    fn defaults_serialize() {
        let text = toml::to_string_pretty(&Settings::default()).unwrap();
        let parsed: Settings = toml::from_str(&text).unwrap();
        assert_eq!(parsed, Settings::default());
    }
}
