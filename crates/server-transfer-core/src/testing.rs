// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Core - In-memory host fakes for unit tests

use crate::host::{MessageSink, Player, PlayerRegistry, TransferCapability};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

pub struct FakePlayer {
    name: String,
    permissions: HashSet<String>,
    inbox: Mutex<Vec<String>>,
}

impl FakePlayer {
    pub fn new(name: &str, permissions: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            inbox: Mutex::new(Vec::new()),
        })
    }

    pub fn messages(&self) -> Vec<String> {
        self.inbox.lock().unwrap().clone()
    }
}

impl MessageSink for FakePlayer {
    fn send_message(&self, message: &str) {
        self.inbox.lock().unwrap().push(message.to_string());
    }
}

impl Player for FakePlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

#[derive(Default)]
pub struct FakeConsole {
    inbox: Mutex<Vec<String>>,
}

impl FakeConsole {
    pub fn messages(&self) -> Vec<String> {
        self.inbox.lock().unwrap().clone()
    }
}

impl MessageSink for FakeConsole {
    fn send_message(&self, message: &str) {
        self.inbox.lock().unwrap().push(message.to_string());
    }
}

#[derive(Default)]
pub struct FakeRegistry {
    players: Mutex<Vec<Arc<FakePlayer>>>,
}

impl FakeRegistry {
    pub fn with(players: &[&Arc<FakePlayer>]) -> Arc<Self> {
        Arc::new(Self {
            players: Mutex::new(players.iter().map(|p| Arc::clone(p)).collect()),
        })
    }
}

impl PlayerRegistry for FakeRegistry {
    fn player_exact(&self, name: &str) -> Option<Arc<dyn Player>> {
        self.players
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.name == name)
            .map(|p| Arc::clone(p) as Arc<dyn Player>)
    }

    fn online_players(&self) -> Vec<Arc<dyn Player>> {
        self.players
            .lock()
            .unwrap()
            .iter()
            .map(|p| Arc::clone(p) as Arc<dyn Player>)
            .collect()
    }
}

/// Records every delegated transfer as (player, host, port)
#[derive(Default)]
pub struct RecordingCapability {
    calls: Mutex<Vec<(String, String, u16)>>,
}

impl RecordingCapability {
    pub fn calls(&self) -> Vec<(String, String, u16)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TransferCapability for RecordingCapability {
    fn transfer(&self, player: &dyn Player, host: &str, port: u16) {
        self.calls
            .lock()
            .unwrap()
            .push((player.name().to_string(), host.to_string(), port));
    }
}
