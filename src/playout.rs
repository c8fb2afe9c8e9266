//! Random playouts (uniform random self-play).
//!
//! A playout picks uniformly among all legal moves of the side to move until
//! the game is decided, the side to move is stuck, or the ply limit runs
//! out. It is used to soak-test the rules engine and by the `demo` command.

use tracing::debug;

use crate::constants::MAX_GAME_LEN;
use crate::position::{GameState, Position};

/// Why a playout stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// One side won.
    Finished,
    /// The side to move had no legal move.
    NoMoves,
    /// The ply limit was reached first.
    PlyLimit,
}

/// Summary of a finished playout.
#[derive(Clone, Debug)]
pub struct PlayoutResult {
    /// Number of moves played
    pub plies: usize,
    /// Total number of pieces captured by both sides
    pub captures: usize,
    /// Game state when the playout stopped
    pub state: GameState,
    pub reason: StopReason,
}

/// Play random legal moves on `pos` until the game stops.
///
/// `pos` is left at the final position. `max_plies` of `None` means
/// [`MAX_GAME_LEN`].
pub fn random_game(
    pos: &mut Position,
    rng: &mut fastrand::Rng,
    max_plies: Option<usize>,
) -> PlayoutResult {
    let limit = max_plies.unwrap_or(MAX_GAME_LEN);
    let mut plies = 0;
    let mut captures = 0;

    let reason = loop {
        if pos.current_state() != GameState::Playing {
            break StopReason::Finished;
        }
        if plies >= limit {
            break StopReason::PlyLimit;
        }
        let moves = pos.legal_moves();
        if moves.is_empty() {
            break StopReason::NoMoves;
        }
        let (origin, dest) = moves[rng.usize(..moves.len())];
        match pos.move_from(origin, dest) {
            Ok(captured) => captures += captured.len(),
            // legal_moves only yields moves move_from accepts
            Err(e) => unreachable!("generated move rejected: {e}"),
        }
        plies += 1;
    };

    let state = pos.current_state();
    debug!(plies, captures, ?state, ?reason, "playout finished");
    PlayoutResult {
        plies,
        captures,
        state,
        reason,
    }
}
