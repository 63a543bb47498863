// SPDX-License-Identifier: AGPL-3.0
// Server Transfer Console - Main entry point
//
// Hosts the transfer plugin against an in-memory player list and reads
// operator input from stdin, one command per line.

mod players;

use clap::Parser;
use players::{DisconnectingTransfer, InMemoryPlayers, PlayerSpec, StdoutConsole};
use server_transfer_core::{CommandSender, ConfigStore, PlayerRegistry, TransferPlugin};
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "server-transfer")]
#[command(about = "Exercise the /transfer command from a terminal", long_about = None)]
struct Cli {
    /// Directory holding config.yml and messages.yml (defaults to the user config dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Online player as NAME[:perm,perm] (repeatable)
    #[arg(long = "player", value_name = "NAME[:PERMS]")]
    players: Vec<PlayerSpec>,

    /// Run commands as this online player instead of the console
    #[arg(long = "as", value_name = "NAME")]
    as_player: Option<String>,
}

/// One line of operator input
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Transfer(Vec<String>),
    Complete(Vec<String>),
    Join(PlayerSpec),
    Leave(String),
    Online,
    Reload,
    Quit,
    Empty,
}

fn parse_input(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(Input::Empty);
    };
    let rest: Vec<String> = words.map(str::to_string).collect();

    match verb.trim_start_matches('/') {
        "transfer" => Ok(Input::Transfer(rest)),
        "complete" => {
            // a trailing space starts a new, empty argument
            let mut args = rest;
            if line.ends_with(char::is_whitespace) || args.is_empty() {
                args.push(String::new());
            }
            Ok(Input::Complete(args))
        }
        "join" => match rest.as_slice() {
            [name] => name.parse().map(Input::Join),
            [name, perms] => format!("{}:{}", name, perms).parse().map(Input::Join),
            _ => Err("usage: join <name> [perm,perm]".to_string()),
        },
        "leave" => match rest.as_slice() {
            [name] => Ok(Input::Leave(name.clone())),
            _ => Err("usage: leave <name>".to_string()),
        },
        "online" | "list" => Ok(Input::Online),
        "reload" => Ok(Input::Reload),
        "quit" | "exit" | "stop" => Ok(Input::Quit),
        other => Err(format!(
            "unknown command {:?} (transfer, complete, join, leave, online, reload, quit)",
            other
        )),
    }
}

/// The console, or the `--as` player while they are online
fn current_sender(players: &InMemoryPlayers, as_player: Option<&str>) -> Option<CommandSender> {
    match as_player {
        None => Some(CommandSender::Console(Arc::new(StdoutConsole))),
        Some(name) => {
            let sender = players.player_exact(name).map(CommandSender::Player);
            if sender.is_none() {
                eprintln!("{} is not online", name);
            }
            sender
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => ConfigStore::default_data_dir().map_err(|e| e.to_string())?,
    };

    let players = Arc::new(InMemoryPlayers::default());
    for spec in cli.players {
        players.join(spec);
    }
    let capability = Arc::new(DisconnectingTransfer::new(Arc::clone(&players)));

    let plugin = TransferPlugin::enable(data_dir, players.clone(), capability)
        .map_err(|e| format!("Failed to enable plugin: {}", e))?;

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| format!("Failed to read input: {}", e))?;

        let input = match parse_input(&line) {
            Ok(input) => input,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match input {
            Input::Empty => {}
            Input::Quit => break,
            Input::Transfer(args) => {
                if let Some(sender) = current_sender(&players, cli.as_player.as_deref()) {
                    let args: Vec<&str> = args.iter().map(String::as_str).collect();
                    let outcome = plugin.command().execute(&sender, &args);
                    tracing::debug!("Command outcome: {:?}", outcome);
                }
            }
            Input::Complete(args) => {
                if let Some(sender) = current_sender(&players, cli.as_player.as_deref()) {
                    let args: Vec<&str> = args.iter().map(String::as_str).collect();
                    println!("{}", plugin.command().complete(&sender, &args).join(" "));
                }
            }
            Input::Join(spec) => {
                players.join(spec);
            }
            Input::Leave(name) => {
                if !players.leave(&name) {
                    eprintln!("{} is not online", name);
                }
            }
            Input::Online => println!("{}", players.online_names().join(", ")),
            Input::Reload => match plugin.reload() {
                Ok(_) => println!("Configuration reloaded."),
                Err(e) => eprintln!("Reload failed: {}", e),
            },
        }
    }

    plugin.disable();
    Ok(())
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("server_transfer_console=info".parse().unwrap())
                .add_directive("server_transfer_core=info".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Server Transfer console v{}", env!("CARGO_PKG_VERSION"));

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
