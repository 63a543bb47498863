// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Core - Shared logic for all hosts
//
// This crate provides:
// - Settings and error types
// - MessageCatalog for prefixed, styled, placeholder-driven messages
// - ConfigStore holding an atomically reloaded configuration snapshot
// - TransferGateway validating requests before the host transfer capability
// - TransferCommand implementing /transfer and its tab completion
// - TransferPlugin wiring everything together for a host
//
// The host environment (player registry, permissions, the transfer itself)
// is reached only through the traits in `host`.

pub mod command;
pub mod gateway;
pub mod host;
pub mod messages;
pub mod plugin;
pub mod settings;
pub mod store;
pub mod style;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used items
pub use command::{
    classify, parse_port, CommandOutcome, TransferCommand, TransferIntent, PERMISSION_OTHER,
    PERMISSION_USE,
};
pub use gateway::{TransferGateway, TransferRequest};
pub use host::{CommandSender, MessageSink, Player, PlayerRegistry, TransferCapability};
pub use messages::{MessageCatalog, MessageKey};
pub use plugin::TransferPlugin;
pub use store::{ConfigSnapshot, ConfigStore};
pub use style::{colorize, strip_styles};
pub use types::{AppError, Settings, TransferError};
