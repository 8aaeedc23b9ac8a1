//! Durable user settings — window opacity and the provider API key.
//!
//! Two independent scalars backed by one JSON file. Reads fall back to
//! documented defaults; every write persists immediately (no batching,
//! no undo).

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::RwLock;
use std::{fs, io};

/// Opacity used when nothing has been saved yet.
pub const DEFAULT_OPACITY: f64 = 0.9;

const MIN_OPACITY: f64 = 0.1;
const MAX_OPACITY: f64 = 1.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserSettings {
    window_opacity: f64,
    api_key: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            window_opacity: DEFAULT_OPACITY,
            api_key: String::new(),
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    /// Default location: `<config dir>/snap-solve/settings.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snap-solve")
            .join("settings.json")
    }

    /// Open the store, reading saved settings if present.
    /// A corrupt file falls back to defaults rather than failing startup.
    pub fn open(path: PathBuf) -> Self {
        let data = if path.exists() {
            fs::read_to_string(&path)
                .ok()
                .and_then(|raw| serde_json::from_str(&raw).ok())
                .unwrap_or_default()
        } else {
            UserSettings::default()
        };

        Self {
            path,
            data: RwLock::new(data),
        }
    }

    pub fn opacity(&self) -> f64 {
        self.data.read().unwrap().window_opacity
    }

    /// Set and persist the window opacity, clamped to [0.1, 1.0].
    /// Returns the value actually stored.
    pub fn set_opacity(&self, value: f64) -> io::Result<f64> {
        let clamped = value.clamp(MIN_OPACITY, MAX_OPACITY);
        let mut guard = self.data.write().unwrap();
        guard.window_opacity = clamped;
        self.persist(&guard)?;
        Ok(clamped)
    }

    pub fn api_key(&self) -> String {
        self.data.read().unwrap().api_key.clone()
    }

    /// Set and persist the provider credential. Empty is a valid value —
    /// it means "not configured" and blocks submission downstream.
    pub fn set_api_key(&self, key: String) -> io::Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.api_key = key;
        self.persist(&guard)
    }

    fn persist(&self, data: &UserSettings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, serialized)
    }
}
