// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Core - /transfer command
//
// Usage:
//   /transfer <host> [port]            transfer yourself (transfer.use)
//   /transfer <player> <host> [port]   transfer someone else (transfer.other)
//
// With two arguments the first one is treated as a player name when such a
// player is online, otherwise as a host followed by a port.

use crate::gateway::{TransferGateway, TransferRequest};
use crate::host::{CommandSender, Player, PlayerRegistry};
use crate::messages::MessageKey;
use crate::store::{ConfigSnapshot, ConfigStore};
use crate::types::TransferError;
use std::sync::Arc;

pub const PERMISSION_USE: &str = "transfer.use";
pub const PERMISSION_OTHER: &str = "transfer.other";

/// What one invocation asks for; the port stays raw until it is validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferIntent {
    /// Move the invoker
    SelfTransfer { host: String, port: Option<String> },
    /// Move another online player
    Other {
        target: String,
        host: String,
        port: Option<String>,
    },
}

/// Classify the arguments by count. `None` means the usage text applies.
pub fn classify(args: &[&str], players: &dyn PlayerRegistry) -> Option<TransferIntent> {
    match *args {
        [host] => Some(TransferIntent::SelfTransfer {
            host: host.to_string(),
            port: None,
        }),
        [first, second] if players.is_online(first) => Some(TransferIntent::Other {
            target: first.to_string(),
            host: second.to_string(),
            port: None,
        }),
        [host, port] => Some(TransferIntent::SelfTransfer {
            host: host.to_string(),
            port: Some(port.to_string()),
        }),
        [target, host, port] => Some(TransferIntent::Other {
            target: target.to_string(),
            host: host.to_string(),
            port: Some(port.to_string()),
        }),
        _ => None,
    }
}

/// Parse a port token: base-10, 1 to 65535. Anything else is `None`.
pub fn parse_port(token: &str) -> Option<u16> {
    token.parse::<u16>().ok().filter(|port| *port >= 1)
}

/// Result of one command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The request was handed to the transfer capability
    Transferred {
        target: String,
        host: String,
        port: u16,
    },
    /// Stopped with the given message sent to the invoker
    Rejected(MessageKey),
    /// Wrong argument count; the given message was sent to the invoker
    Usage(MessageKey),
    /// The gateway refused a request the command let through
    Failed(TransferError),
}

/// Handler for /transfer and its tab completion
pub struct TransferCommand {
    config: Arc<ConfigStore>,
    players: Arc<dyn PlayerRegistry>,
    gateway: Arc<TransferGateway>,
}

impl TransferCommand {
    pub fn new(
        config: Arc<ConfigStore>,
        players: Arc<dyn PlayerRegistry>,
        gateway: Arc<TransferGateway>,
    ) -> Self {
        Self {
            config,
            players,
            gateway,
        }
    }

    /// Run the command with the arguments after its name
    pub fn execute(&self, sender: &CommandSender, args: &[&str]) -> CommandOutcome {
        let config = self.config.snapshot();

        let intent = match classify(args, self.players.as_ref()) {
            Some(intent) => intent,
            None => return self.send_usage(&config, sender),
        };
        tracing::debug!("{} issued /transfer as {:?}", sender.name(), intent);

        match intent {
            TransferIntent::SelfTransfer { host, port } => {
                self.transfer_self(&config, sender, &host, port.as_deref())
            }
            TransferIntent::Other { target, host, port } => {
                self.transfer_other(&config, sender, &target, &host, port.as_deref())
            }
        }
    }

    /// Handles /transfer <host> [port]
    fn transfer_self(
        &self,
        config: &ConfigSnapshot,
        sender: &CommandSender,
        host: &str,
        port_arg: Option<&str>,
    ) -> CommandOutcome {
        // Console cannot transfer "itself"
        let player = match sender.as_player() {
            Some(player) => player,
            None => return reject(config, sender, MessageKey::ConsoleMustSpecifyPlayer),
        };

        if !player.has_permission(PERMISSION_USE) {
            return reject(config, sender, MessageKey::NoPermission);
        }

        let port = match resolve_port(config, port_arg) {
            Some(port) => port,
            None => return reject(config, sender, MessageKey::InvalidPort),
        };

        let request = match validate(Arc::clone(player), host, port) {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };

        player.send_message(&config.render(MessageKey::TransferringSelf, None, Some(host), port));
        self.submit(&request)
    }

    /// Handles /transfer <player> <host> [port]
    fn transfer_other(
        &self,
        config: &ConfigSnapshot,
        sender: &CommandSender,
        target_name: &str,
        host: &str,
        port_arg: Option<&str>,
    ) -> CommandOutcome {
        // Console bypasses the permission check
        if let Some(player) = sender.as_player() {
            if !player.has_permission(PERMISSION_OTHER) {
                return reject(config, sender, MessageKey::NoPermission);
            }
        }

        let target = match self.players.player_exact(target_name) {
            Some(target) => target,
            None => {
                sender.send_message(&config.render(
                    MessageKey::PlayerNotOnline,
                    Some(target_name),
                    None,
                    0,
                ));
                return CommandOutcome::Rejected(MessageKey::PlayerNotOnline);
            }
        };

        let port = match resolve_port(config, port_arg) {
            Some(port) => port,
            None => return reject(config, sender, MessageKey::InvalidPort),
        };

        let request = match validate(Arc::clone(&target), host, port) {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };

        sender.send_message(&config.render(
            MessageKey::TransferringOther,
            Some(target.name()),
            Some(host),
            port,
        ));
        target.send_message(&config.render(MessageKey::BeingTransferred, None, Some(host), port));
        self.submit(&request)
    }

    fn submit(&self, request: &TransferRequest) -> CommandOutcome {
        self.gateway.submit(request);
        CommandOutcome::Transferred {
            target: request.target().name().to_string(),
            host: request.host().to_string(),
            port: request.port(),
        }
    }

    fn send_usage(&self, config: &ConfigSnapshot, sender: &CommandSender) -> CommandOutcome {
        let key = match sender.as_player() {
            None => MessageKey::UsageAdmin,
            Some(player) if player.has_permission(PERMISSION_OTHER) => MessageKey::UsageAdmin,
            Some(player) if player.has_permission(PERMISSION_USE) => MessageKey::UsagePlayer,
            Some(_) => return reject(config, sender, MessageKey::NoPermission),
        };
        sender.send_message(&config.message(key));
        CommandOutcome::Usage(key)
    }

    /// Tab completion for the argument currently being typed (the last one).
    /// Candidates are filtered case-insensitively by prefix, order preserved.
    pub fn complete(&self, sender: &CommandSender, args: &[&str]) -> Vec<String> {
        let current = match args.last() {
            Some(current) => current.to_lowercase(),
            None => return Vec::new(),
        };

        let config = self.config.snapshot();
        let default_host = &config.settings.default_host;
        let default_port = config.settings.default_port.to_string();

        let mut candidates = Vec::new();
        match args.len() {
            // host for self, or player for others
            1 => match sender.as_player() {
                Some(player) => {
                    let other = player.has_permission(PERMISSION_OTHER);
                    if other {
                        candidates.extend(self.players.online_names());
                    }
                    if other || player.has_permission(PERMISSION_USE) {
                        candidates.push(default_host.clone());
                    }
                }
                None => candidates.extend(self.players.online_names()),
            },
            // host for others, or port for self
            2 => {
                if self.players.is_online(args[0]) {
                    candidates.push(default_host.clone());
                } else {
                    candidates.push(default_port);
                }
            }
            3 => candidates.push(default_port),
            _ => {}
        }

        candidates
            .into_iter()
            .filter(|candidate| candidate.to_lowercase().starts_with(&current))
            .collect()
    }
}

fn resolve_port(config: &ConfigSnapshot, port_arg: Option<&str>) -> Option<u16> {
    match port_arg {
        None => Some(config.settings.default_port),
        Some(token) => parse_port(token),
    }
}

/// Check the request before anyone is told a transfer is under way
fn validate(
    target: Arc<dyn Player>,
    host: &str,
    port: u16,
) -> Result<TransferRequest, CommandOutcome> {
    TransferRequest::new(Some(target), host, i64::from(port)).map_err(|e| {
        tracing::error!("Transfer to {}:{} refused: {}", host, port, e);
        CommandOutcome::Failed(e)
    })
}

fn reject(config: &ConfigSnapshot, sender: &CommandSender, key: MessageKey) -> CommandOutcome {
    sender.send_message(&config.message(key));
    CommandOutcome::Rejected(key)
}
