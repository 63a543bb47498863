// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Core - Type definitions

use crate::style::colorize;

/// Prefix used when `prefix` is missing from config.yml (unstyled form)
pub const DEFAULT_PREFIX: &str = "&8[&bTransfer&8] ";

/// Host used when `default-host` is missing or blank
pub const DEFAULT_HOST: &str = "play.example.com";

/// Port used when `default-port` is missing or out of range
pub const DEFAULT_PORT: u16 = 25565;

/// Loaded settings (immutable between reloads)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Message prefix, already styled
    pub prefix: String,
    /// Host suggested by tab completion
    pub default_host: String,
    /// Port used when the command gives none (1-65535)
    pub default_port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefix: colorize(DEFAULT_PREFIX),
            default_host: DEFAULT_HOST.to_string(),
            default_port: DEFAULT_PORT,
        }
    }
}

/// Rejections raised by the transfer gateway before delegating
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransferError {
    #[error("Player cannot be null")]
    InvalidTarget,

    #[error("Host cannot be empty")]
    InvalidHost,

    #[error("Port must be in range 1-65535, got {0}")]
    InvalidPort(i64),
}

/// Error types for loading configuration
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileIo(err.to_string())
    }
}
