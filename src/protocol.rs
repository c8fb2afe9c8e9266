//! Line-based text protocol for driving the engine.
//!
//! The protocol follows the shape of GTP: each command may carry a numeric
//! id, successful replies start with `=` and failures with `?`, and every
//! reply is terminated by an empty line. This lets a simple front end (or a
//! person at a terminal) play a game without linking against the crate.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version (1)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `clear_board` - Reset to the starting position
//! - `showboard` - Print the board diagram
//! - `side` - Side to move (`attacker` or `defender`)
//! - `state` - `playing`, `defender_won` or `attacker_won`
//! - `piece <vertex>` - Occupant of a cell (`king`, `defender`, `attacker`, `empty`)
//! - `select <vertex>` - Whether the side to move may pick that piece
//! - `moves <vertex>` - Destinations for the piece on that cell
//! - `play <from> <to>` - Play a move, reply with the captured cells
//! - `setboard <side> <row>...` - Load a position from rows in diagram syntax
//!
//! ## Example
//!
//! ```ignore
//! use hnefatafl_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run()?;
//! ```

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::trace;

use crate::board::{Piece, Side};
use crate::position::{GameState, Position, parse_coord, str_coord};

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "known_command",
    "list_commands",
    "moves",
    "name",
    "piece",
    "play",
    "protocol_version",
    "quit",
    "select",
    "setboard",
    "showboard",
    "side",
    "state",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    /// Current game position
    pos: Position,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Create an engine at the starting position.
    pub fn new() -> Self {
        Self::with_position(Position::new())
    }

    /// Create an engine at a given position.
    pub fn with_position(pos: Position) -> Self {
        Self { pos }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    /// Run the command loop on arbitrary streams until `quit` or end of input.
    pub fn run_with<R: BufRead, W: Write>(
        &mut self,
        input: R,
        mut output: W,
    ) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("failed to read command")?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            if parts.is_empty() {
                continue;
            }

            let command = parts[0].to_lowercase();
            let args = &parts[1..];
            trace!(?id, %command, ?args, "command");

            let (success, message) = self.execute(&command, args);
            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();

            write!(output, "{prefix}{id_str} {message}\n\n").context("failed to write reply")?;
            output.flush().context("failed to flush reply")?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "hnefatafl-rust".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(cmd) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                (true, if known { "true" } else { "false" }.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" => {
                self.pos = Position::new();
                (true, String::new())
            }

            "showboard" => (true, format!("\n{}", self.pos.board())),

            "side" => (true, self.pos.current_side().to_string()),

            "state" => {
                let state = match self.pos.current_state() {
                    GameState::Playing => "playing",
                    GameState::DefenderWon => "defender_won",
                    GameState::AttackerWon => "attacker_won",
                };
                (true, state.to_string())
            }

            "piece" => match Self::vertex_arg(args, 0) {
                Ok((x, y)) => {
                    let name = match self.pos.piece_at(x, y) {
                        Some(Piece::King) => "king",
                        Some(Piece::Defender) => "defender",
                        Some(Piece::Attacker) => "attacker",
                        None => "empty",
                    };
                    (true, name.to_string())
                }
                Err(e) => (false, e),
            },

            "select" => match Self::vertex_arg(args, 0) {
                Ok((x, y)) => (true, self.pos.can_select(x, y).to_string()),
                Err(e) => (false, e),
            },

            "moves" => match Self::vertex_arg(args, 0) {
                Ok((x, y)) => {
                    let mut moves = self.pos.valid_moves_from(x, y);
                    moves.sort_by_key(|&(mx, my)| (my, mx));
                    (true, Self::join_coords(&moves))
                }
                Err(e) => (false, e),
            },

            "play" => {
                if args.len() < 2 {
                    return (false, "missing arguments".to_string());
                }
                let origin = match Self::vertex_arg(args, 0) {
                    Ok(pt) => pt,
                    Err(e) => return (false, e),
                };
                let dest = match Self::vertex_arg(args, 1) {
                    Ok(pt) => pt,
                    Err(e) => return (false, e),
                };
                match self.pos.move_from(origin, dest) {
                    Ok(captured) => (true, Self::join_coords(&captured)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "setboard" => {
                let side = match args.first().map(|s| s.to_lowercase()) {
                    Some(s) if s == "attacker" => Side::Attacker,
                    Some(s) if s == "defender" => Side::Defender,
                    Some(_) => return (false, "invalid side".to_string()),
                    None => return (false, "missing arguments".to_string()),
                };
                let layout = args[1..].join("\n");
                match Position::from_layout(&layout, side) {
                    Ok(pos) => {
                        self.pos = pos;
                        (true, String::new())
                    }
                    Err(e) => (false, e.to_string()),
                }
            }

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn vertex_arg(args: &[&str], i: usize) -> Result<(usize, usize), String> {
        let arg = args.get(i).ok_or_else(|| "missing argument".to_string())?;
        parse_coord(arg).ok_or_else(|| format!("invalid vertex: {arg}"))
    }

    fn join_coords(points: &[(usize, usize)]) -> String {
        points
            .iter()
            .map(|&pt| str_coord(pt))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
