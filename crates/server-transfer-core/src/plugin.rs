// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Core - Plugin lifecycle
//
// Wires the configuration store, the gateway and the command together for a
// host. The host registers `command()` as the /transfer executor and tab
// completer, and may hand `transfer_service()` to other components.

use crate::command::TransferCommand;
use crate::gateway::TransferGateway;
use crate::host::{PlayerRegistry, TransferCapability};
use crate::store::{ConfigSnapshot, ConfigStore};
use crate::types::AppError;
use std::path::PathBuf;
use std::sync::Arc;

/// Running plugin state
pub struct TransferPlugin {
    config: Arc<ConfigStore>,
    gateway: Arc<TransferGateway>,
    command: TransferCommand,
}

impl TransferPlugin {
    /// Load configuration from `data_dir` and build the command
    pub fn enable(
        data_dir: impl Into<PathBuf>,
        players: Arc<dyn PlayerRegistry>,
        capability: Arc<dyn TransferCapability>,
    ) -> Result<Self, AppError> {
        let config = Arc::new(ConfigStore::open(data_dir)?);
        let gateway = Arc::new(TransferGateway::new(capability));
        let command = TransferCommand::new(Arc::clone(&config), players, Arc::clone(&gateway));

        tracing::info!("Server Transfer v{} enabled", env!("CARGO_PKG_VERSION"));
        tracing::info!("Transfer API available via transfer_service()");

        Ok(Self {
            config,
            gateway,
            command,
        })
    }

    /// Validating transfer API for other host components
    pub fn transfer_service(&self) -> Arc<TransferGateway> {
        Arc::clone(&self.gateway)
    }

    pub fn command(&self) -> &TransferCommand {
        &self.command
    }

    pub fn config(&self) -> &Arc<ConfigStore> {
        &self.config
    }

    /// Re-read config.yml and messages.yml
    pub fn reload(&self) -> Result<Arc<ConfigSnapshot>, AppError> {
        self.config.reload()
    }

    pub fn disable(self) {
        tracing::info!("Server Transfer disabled");
    }
}
