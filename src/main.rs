//! Hnefatafl-Rust: a 9x9 Tafl rules engine.
//!
//! ## Usage
//!
//! - `hnefatafl-rust` - Show a demo
//! - `hnefatafl-rust play` - Start the text protocol on stdin/stdout
//! - `hnefatafl-rust demo` - Play a random game and print the result

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hnefatafl_rust::constants::{DEFAULT_SEED, MAX_GAME_LEN};
use hnefatafl_rust::playout::random_game;
use hnefatafl_rust::position::Position;
use hnefatafl_rust::protocol::ProtocolEngine;

/// Hnefatafl-Rust: a 9x9 Tafl rules engine
#[derive(Parser)]
#[command(name = "hnefatafl-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log moves and captures to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol server for use with a front end
    Play,
    /// Play a random game and show the final board
    Demo {
        /// Seed for the random move picker
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
        /// Stop after this many moves
        #[arg(long, default_value_t = MAX_GAME_LEN)]
        plies: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over --verbose; logs go to stderr so protocol replies stay clean.
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Play) => {
            info!("starting protocol loop");
            let mut engine = ProtocolEngine::new();
            engine.run().context("protocol loop failed")?;
        }
        Some(Commands::Demo { seed, plies }) => run_demo(seed, plies),
        None => run_demo(DEFAULT_SEED, MAX_GAME_LEN),
    }
    Ok(())
}

fn run_demo(seed: u64, plies: usize) {
    println!("Hnefatafl-Rust: 9x9 Tafl Rules Engine\n");

    let mut pos = Position::new();
    println!("=== Starting Position ===");
    println!("{}", pos.board());

    println!("=== Random Game (seed {seed}) ===");
    let mut rng = fastrand::Rng::with_seed(seed);
    let result = random_game(&mut pos, &mut rng, Some(plies));
    println!("{}", pos.board());
    println!("Moves played: {}", result.plies);
    println!("Pieces captured: {}", result.captures);
    println!("Stopped because: {:?}", result.reason);
    println!("Final state: {:?}", result.state);
}
