// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Core - Host capabilities
//
// Everything the plugin needs from the game server, passed in at
// construction. Hosts implement these over their own player objects; tests
// implement them with in-memory fakes.

use std::fmt;
use std::sync::Arc;

/// Something that can receive rendered chat text
pub trait MessageSink: Send + Sync {
    fn send_message(&self, message: &str);
}

/// A connected player
pub trait Player: MessageSink {
    /// Canonical display name
    fn name(&self) -> &str;

    fn has_permission(&self, permission: &str) -> bool;
}

/// Lookup of currently connected players
pub trait PlayerRegistry: Send + Sync {
    /// Online player whose name matches exactly
    fn player_exact(&self, name: &str) -> Option<Arc<dyn Player>>;

    fn online_players(&self) -> Vec<Arc<dyn Player>>;

    fn online_names(&self) -> Vec<String> {
        self.online_players()
            .iter()
            .map(|player| player.name().to_string())
            .collect()
    }

    fn is_online(&self, name: &str) -> bool {
        self.player_exact(name).is_some()
    }
}

/// The host's native server handoff. Failures are reported to the player by
/// the host itself (typically a disconnect).
pub trait TransferCapability: Send + Sync {
    fn transfer(&self, player: &dyn Player, host: &str, port: u16);
}

/// Whoever issued a command
#[derive(Clone)]
pub enum CommandSender {
    /// Server console or another non-player caller
    Console(Arc<dyn MessageSink>),
    Player(Arc<dyn Player>),
}

impl CommandSender {
    pub fn send_message(&self, message: &str) {
        match self {
            Self::Console(console) => console.send_message(message),
            Self::Player(player) => player.send_message(message),
        }
    }

    pub fn as_player(&self) -> Option<&Arc<dyn Player>> {
        match self {
            Self::Console(_) => None,
            Self::Player(player) => Some(player),
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self, Self::Player(_))
    }

    /// Name used in logs
    pub fn name(&self) -> &str {
        match self {
            Self::Console(_) => "CONSOLE",
            Self::Player(player) => player.name(),
        }
    }
}

impl fmt::Debug for CommandSender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Console(_) => f.write_str("Console"),
            Self::Player(player) => f.debug_tuple("Player").field(&player.name()).finish(),
        }
    }
}
