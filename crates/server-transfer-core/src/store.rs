// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Core - Configuration store
//
// Settings and messages are loaded together into one immutable snapshot.
// Readers hold an Arc to the snapshot they started with; reload swaps in a
// complete replacement, so nobody sees half-old, half-new configuration.

use crate::messages::{MessageCatalog, MessageKey};
use crate::settings::load_settings;
use crate::types::{AppError, Settings};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

/// Everything loaded from the data directory at one point in time
#[derive(Debug, Clone)]
pub struct ConfigSnapshot {
    pub settings: Settings,
    pub messages: MessageCatalog,
}

impl ConfigSnapshot {
    /// Load config.yml then messages.yml (the catalog needs the prefix)
    pub fn load(data_dir: &Path) -> Result<Self, AppError> {
        let settings = load_settings(data_dir)?;
        let messages = MessageCatalog::load(data_dir, &settings.prefix)?;
        Ok(Self { settings, messages })
    }

    pub fn message(&self, key: MessageKey) -> String {
        self.messages.get(key)
    }

    pub fn render(&self, key: MessageKey, player: Option<&str>, host: Option<&str>, port: u16) -> String {
        self.messages.render(key, player, host, port)
    }
}

/// Owner of the current configuration snapshot
pub struct ConfigStore {
    data_dir: PathBuf,
    current: RwLock<Arc<ConfigSnapshot>>,
}

impl ConfigStore {
    /// Open the store in `data_dir`, creating shipped defaults as needed
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let data_dir = data_dir.into();
        tracing::info!("Data directory: {:?}", data_dir);

        let snapshot = ConfigSnapshot::load(&data_dir)?;
        Ok(Self {
            data_dir,
            current: RwLock::new(Arc::new(snapshot)),
        })
    }

    /// Get the platform config directory for the plugin
    pub fn default_data_dir() -> Result<PathBuf, AppError> {
        let config_dir = directories::ProjectDirs::from("com", "servertransfer", "transfer")
            .ok_or_else(|| AppError::FileIo("Could not determine config directory".to_string()))?
            .config_dir()
            .to_path_buf();
        Ok(config_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<ConfigSnapshot> {
        Arc::clone(&self.current.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Re-read both files. On failure the previous snapshot stays active.
    pub fn reload(&self) -> Result<Arc<ConfigSnapshot>, AppError> {
        tracing::info!("Reloading configuration");
        let snapshot = match ConfigSnapshot::load(&self.data_dir) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                tracing::error!("Reload failed, keeping previous configuration: {}", e);
                return Err(e);
            }
        };

        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Arc::clone(&snapshot);
        tracing::info!(
            "Configuration reloaded (default target {}:{})",
            snapshot.settings.default_host,
            snapshot.settings.default_port
        );
        Ok(snapshot)
    }
}

/// Write `contents` to `path` unless the file already exists
pub(crate) fn ensure_default_file(path: &Path, contents: &str) -> Result<(), AppError> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::FileIo(format!("Failed to create config dir: {}", e)))?;
    }

    tracing::info!("Creating default {:?}", path);
    fs::write(path, contents)
        .map_err(|e| AppError::FileIo(format!("Failed to write {}: {}", path.display(), e)))?;
    Ok(())
}
