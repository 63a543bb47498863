// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Core - Settings loading
//
// Settings live in config.yml inside the data directory. The shipped
// defaults are written there on first run; missing or invalid keys fall
// back to built-in literals.

use crate::store::ensure_default_file;
use crate::style::colorize;
use crate::types::{AppError, Settings, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_PREFIX};
use serde::Deserialize;
use serde_yaml::Value;
use std::fs;
use std::path::Path;

/// Settings file name inside the data directory
pub const SETTINGS_FILE: &str = "config.yml";

/// Shipped default settings
pub const DEFAULT_SETTINGS_YAML: &str = include_str!("resources/config.yml");

/// Raw config.yml contents; values are checked when converted
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct SettingsFile {
    #[serde(default)]
    prefix: Option<Value>,
    #[serde(default)]
    default_host: Option<Value>,
    #[serde(default)]
    default_port: Option<Value>,
}

impl SettingsFile {
    fn into_settings(self) -> Settings {
        let prefix = self
            .prefix
            .as_ref()
            .and_then(scalar_to_string)
            .unwrap_or_else(|| DEFAULT_PREFIX.to_string());

        let default_host = match self.default_host.as_ref().and_then(scalar_to_string) {
            Some(host) if !host.trim().is_empty() => host,
            Some(_) => {
                tracing::warn!("default-host is blank, using {}", DEFAULT_HOST);
                DEFAULT_HOST.to_string()
            }
            None => DEFAULT_HOST.to_string(),
        };

        let default_port = match self.default_port {
            None => DEFAULT_PORT,
            Some(value) => match value.as_i64() {
                Some(port) if (1..=65535).contains(&port) => port as u16,
                _ => {
                    tracing::warn!(
                        "default-port {:?} is not a port in 1-65535, using {}",
                        value,
                        DEFAULT_PORT
                    );
                    DEFAULT_PORT
                }
            },
        };

        Settings {
            prefix: colorize(&prefix),
            default_host,
            default_port,
        }
    }
}

/// Read a YAML scalar the way a string lookup would (numbers and bools as text)
pub(crate) fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Parse settings text, falling back to defaults when it is malformed
pub fn parse_settings(content: &str) -> Settings {
    let file = match serde_yaml::from_str::<Option<SettingsFile>>(content) {
        Ok(file) => file.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to parse settings, using defaults: {}", e);
            SettingsFile::default()
        }
    };
    file.into_settings()
}

/// Load settings from the data directory, creating config.yml if absent
pub fn load_settings(data_dir: &Path) -> Result<Settings, AppError> {
    let file_path = data_dir.join(SETTINGS_FILE);
    ensure_default_file(&file_path, DEFAULT_SETTINGS_YAML)?;

    tracing::info!("Loading settings from {:?}", file_path);
    let content = fs::read_to_string(&file_path)
        .map_err(|e| AppError::FileIo(format!("Failed to read settings: {}", e)))?;

    Ok(parse_settings(&content))
}
