// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Core - Message catalog
//
// User-facing text lives in messages.yml. The shipped bundle supplies every
// key; the copy in the data directory overrides it entry by entry.

use crate::settings::scalar_to_string;
use crate::store::ensure_default_file;
use crate::style::colorize;
use crate::types::AppError;
use serde_yaml::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::Path;

/// Message file name inside the data directory
pub const MESSAGES_FILE: &str = "messages.yml";

/// Shipped default messages
pub const DEFAULT_MESSAGES_YAML: &str = include_str!("resources/messages.yml");

/// Keys of the messages sent by the transfer command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    NoPermission,
    ConsoleMustSpecifyPlayer,
    InvalidPort,
    PlayerNotOnline,
    TransferringSelf,
    TransferringOther,
    BeingTransferred,
    UsagePlayer,
    UsageAdmin,
}

impl MessageKey {
    pub const ALL: [MessageKey; 9] = [
        MessageKey::NoPermission,
        MessageKey::ConsoleMustSpecifyPlayer,
        MessageKey::InvalidPort,
        MessageKey::PlayerNotOnline,
        MessageKey::TransferringSelf,
        MessageKey::TransferringOther,
        MessageKey::BeingTransferred,
        MessageKey::UsagePlayer,
        MessageKey::UsageAdmin,
    ];

    /// Key as written in messages.yml
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NoPermission => "no-permission",
            Self::ConsoleMustSpecifyPlayer => "console-must-specify-player",
            Self::InvalidPort => "invalid-port",
            Self::PlayerNotOnline => "player-not-online",
            Self::TransferringSelf => "transferring-self",
            Self::TransferringOther => "transferring-other",
            Self::BeingTransferred => "being-transferred",
            Self::UsagePlayer => "usage-player",
            Self::UsageAdmin => "usage-admin",
        }
    }
}

impl AsRef<str> for MessageKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Merged message templates plus the prefix put in front of each one
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    prefix: String,
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    /// Build a catalog from the default bundle text and an override bundle text.
    /// `prefix` is expected to be styled already.
    pub fn from_sources(prefix: impl Into<String>, defaults: &str, overrides: &str) -> Self {
        let mut templates = parse_bundle(defaults, "default messages");
        templates.extend(parse_bundle(overrides, MESSAGES_FILE));

        Self {
            prefix: prefix.into(),
            templates,
        }
    }

    /// Load messages.yml from the data directory, creating it if absent
    pub fn load(data_dir: &Path, prefix: &str) -> Result<Self, AppError> {
        let file_path = data_dir.join(MESSAGES_FILE);
        ensure_default_file(&file_path, DEFAULT_MESSAGES_YAML)?;

        tracing::info!("Loading messages from {:?}", file_path);
        let content = fs::read_to_string(&file_path)
            .map_err(|e| AppError::FileIo(format!("Failed to read messages: {}", e)))?;

        let catalog = Self::from_sources(prefix, DEFAULT_MESSAGES_YAML, &content);
        tracing::debug!("Loaded {} message templates", catalog.len());
        Ok(catalog)
    }

    /// Prefixed, styled message; unknown keys render as "Missing message: <key>"
    pub fn get(&self, key: impl AsRef<str>) -> String {
        let key = key.as_ref();
        let template = match self.templates.get(key) {
            Some(template) => template.clone(),
            None => format!("Missing message: {}", key),
        };
        format!("{}{}", self.prefix, colorize(&template))
    }

    /// Same as [`get`](Self::get), then fills `{player}`, `{host}` and `{port}`.
    /// Absent player/host leave their placeholders untouched.
    pub fn render(
        &self,
        key: impl AsRef<str>,
        player: Option<&str>,
        host: Option<&str>,
        port: u16,
    ) -> String {
        let mut message = self.get(key);
        if let Some(player) = player {
            message = message.replace("{player}", player);
        }
        if let Some(host) = host {
            message = message.replace("{host}", host);
        }
        message.replace("{port}", &port.to_string())
    }

    pub fn contains(&self, key: impl AsRef<str>) -> bool {
        self.templates.contains_key(key.as_ref())
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Parse a flat key -> template bundle. Non-scalar values are skipped and a
/// malformed document counts as empty.
fn parse_bundle(content: &str, source: &str) -> HashMap<String, String> {
    let entries = match serde_yaml::from_str::<Option<BTreeMap<String, Value>>>(content) {
        Ok(entries) => entries.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to parse {}, ignoring it: {}", source, e);
            return HashMap::new();
        }
    };

    entries
        .into_iter()
        .filter_map(|(key, value)| match scalar_to_string(&value) {
            Some(template) => Some((key, template)),
            None => {
                tracing::debug!("Skipping non-text entry {} in {}", key, source);
                None
            }
        })
        .collect()
}
