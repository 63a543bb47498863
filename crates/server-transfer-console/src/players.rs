// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Console - In-memory host
//
// Stands in for a game server: a list of online players that print their
// chat to stdout, and a transfer capability that disconnects the player.

use server_transfer_core::{strip_styles, MessageSink, Player, PlayerRegistry, TransferCapability};
use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

/// Player seed parsed from `NAME[:perm,perm]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSpec {
    pub name: String,
    pub permissions: Vec<String>,
}

impl FromStr for PlayerSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, permissions) = match s.split_once(':') {
            Some((name, perms)) => (name, perms),
            None => (s, ""),
        };
        let name = name.trim();
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(format!("invalid player name: {:?}", name));
        }

        Ok(Self {
            name: name.to_string(),
            permissions: permissions
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
        })
    }
}

/// Online player whose chat goes to stdout
pub struct ConsolePlayer {
    name: String,
    permissions: Vec<String>,
}

impl ConsolePlayer {
    pub fn new(spec: PlayerSpec) -> Self {
        Self {
            name: spec.name,
            permissions: spec.permissions,
        }
    }
}

impl MessageSink for ConsolePlayer {
    fn send_message(&self, message: &str) {
        println!("[to {}] {}", self.name, strip_styles(message));
    }
}

impl Player for ConsolePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// The operator console itself
pub struct StdoutConsole;

impl MessageSink for StdoutConsole {
    fn send_message(&self, message: &str) {
        println!("{}", strip_styles(message));
    }
}

/// Connected players, in join order
#[derive(Default)]
pub struct InMemoryPlayers {
    players: RwLock<Vec<Arc<ConsolePlayer>>>,
}

impl InMemoryPlayers {
    /// Add a player; replaces an online player with the same name
    pub fn join(&self, spec: PlayerSpec) -> Arc<ConsolePlayer> {
        let player = Arc::new(ConsolePlayer::new(spec));
        let mut players = self.players.write().unwrap_or_else(PoisonError::into_inner);
        players.retain(|p| p.name != player.name);
        players.push(Arc::clone(&player));
        tracing::info!("{} joined the game", player.name);
        player
    }

    /// Remove a player; returns whether they were online
    pub fn leave(&self, name: &str) -> bool {
        let mut players = self.players.write().unwrap_or_else(PoisonError::into_inner);
        let original_len = players.len();
        players.retain(|p| p.name != name);
        let removed = players.len() != original_len;
        if removed {
            tracing::info!("{} left the game", name);
        }
        removed
    }
}

impl PlayerRegistry for InMemoryPlayers {
    fn player_exact(&self, name: &str) -> Option<Arc<dyn Player>> {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|p| p.name == name)
            .map(|p| Arc::clone(p) as Arc<dyn Player>)
    }

    fn online_players(&self) -> Vec<Arc<dyn Player>> {
        self.players
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|p| Arc::clone(p) as Arc<dyn Player>)
            .collect()
    }
}

/// Simulated handoff: the player is sent away and leaves this server
pub struct DisconnectingTransfer {
    players: Arc<InMemoryPlayers>,
}

impl DisconnectingTransfer {
    pub fn new(players: Arc<InMemoryPlayers>) -> Self {
        Self { players }
    }
}

impl TransferCapability for DisconnectingTransfer {
    fn transfer(&self, player: &dyn Player, host: &str, port: u16) {
        tracing::info!("Handing {} off to {}:{}", player.name(), host, port);
        self.players.leave(player.name());
    }
}
