//! Current-result slot with write-through persistence.
//!
//! At most one analysis is "current". Every successful request replaces
//! the slot (never merges), and the slot is written to disk so the latest
//! result survives a view reload. Single writer — the presentation layer.

use super::types::Analysis;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

pub struct ResultStore {
    path: PathBuf,
    current: Mutex<Option<Analysis>>,
}

impl ResultStore {
    /// Default location: `<config dir>/snap-solve/last_analysis.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("snap-solve")
            .join("last_analysis.json")
    }

    /// Open the store, loading the persisted result if one exists.
    /// A missing or unreadable file simply means "no current result".
    pub fn open(path: PathBuf) -> Self {
        let current = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok());

        Self {
            path,
            current: Mutex::new(current),
        }
    }

    pub fn current(&self) -> Option<Analysis> {
        self.current.lock().unwrap().clone()
    }

    /// Replace the current result and persist it immediately.
    /// Persistence failures are logged, not fatal — the in-memory slot
    /// is still authoritative for this session.
    pub fn replace(&self, analysis: Analysis) {
        if let Some(parent) = self.path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(&analysis) {
            Ok(raw) => {
                if let Err(e) = fs::write(&self.path, raw) {
                    log::warn!("[RESULT] Failed to persist analysis: {}", e);
                }
            }
            Err(e) => log::warn!("[RESULT] Failed to serialize analysis: {}", e),
        }

        *self.current.lock().unwrap() = Some(analysis);
    }

    /// Drop the current result (session reset).
    pub fn clear(&self) {
        if self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                log::warn!("[RESULT] Failed to remove persisted analysis: {}", e);
            }
        }
        *self.current.lock().unwrap() = None;
    }
}
