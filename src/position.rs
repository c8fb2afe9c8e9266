//! Tafl position representation and move execution.
//!
//! This module provides the core rules engine:
//! - Selection of pieces for the side to move
//! - Sliding move generation with blocking and the king-only corners
//! - Custodian (sandwich) capture resolution
//! - Turn alternation and win detection
//!
//! The game state is never stored. It is recomputed from the board every
//! time [`Position::current_state`] is called.

use tracing::{debug, warn};

use crate::board::{Board, LayoutError, Piece, Point, Side, is_corner};
use crate::constants::{CORNERS, DELTA, INITIAL_LAYOUT, N};

/// Whether the game is still running, and who won if not.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    Playing,
    /// The king reached a corner.
    DefenderWon,
    /// The king was captured.
    AttackerWon,
}

/// Reason a move was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Origin or destination is off the board
    OutOfBounds,
    /// Origin is empty or holds a piece of the side not to move
    NotSelectable,
    /// Destination is not reachable from the origin
    IllegalDestination,
    /// The game has already been decided
    GameOver,
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::OutOfBounds => write!(f, "Error Illegal move: off the board"),
            MoveError::NotSelectable => write!(f, "Error Illegal move: no piece of yours there"),
            MoveError::IllegalDestination => {
                write!(f, "Error Illegal move: destination not reachable")
            }
            MoveError::GameOver => write!(f, "Error Illegal move: game is over"),
        }
    }
}

impl std::error::Error for MoveError {}

/// A Tafl position: the board plus the side to move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side: Side,
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

impl Position {
    /// The canonical starting position with the attackers to move.
    pub fn new() -> Self {
        match Self::from_layout(INITIAL_LAYOUT, Side::Attacker) {
            Ok(pos) => pos,
            Err(e) => unreachable!("built-in layout is invalid: {e}"),
        }
    }

    /// Build a position from a text diagram (see [`Board::parse`]).
    pub fn from_layout(layout: &str, side: Side) -> Result<Self, LayoutError> {
        Ok(Self {
            board: Board::parse(layout)?,
            side,
        })
    }

    /// Board size. Fixed for the lifetime of the position.
    pub fn dimension(&self) -> usize {
        N
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Occupant of a cell, `None` for empty or off-board cells.
    pub fn piece_at(&self, x: usize, y: usize) -> Option<Piece> {
        self.board.get(x, y)
    }

    /// Whose turn it is.
    pub fn current_side(&self) -> Side {
        self.side
    }

    /// Whether the side to move may pick up the piece at `(x, y)`.
    pub fn can_select(&self, x: usize, y: usize) -> bool {
        self.board
            .get(x, y)
            .is_some_and(|piece| self.side.owns(piece))
    }

    /// Every destination reachable from `(x, y)` by the side to move.
    ///
    /// Pieces slide like rooks and stop before the first occupied cell.
    /// Corners are only reachable by the king. Returns an empty list when
    /// the piece cannot be selected. The order of the result is unspecified.
    pub fn valid_moves_from(&self, x: usize, y: usize) -> Vec<Point> {
        if !self.can_select(x, y) {
            return Vec::new();
        }
        let is_king = self.board.get(x, y) == Some(Piece::King);

        let mut moves = Vec::with_capacity(2 * (N - 1));
        for delta in DELTA {
            let mut steps = 1;
            while let Some(pt) = Board::offset((x, y), delta, steps) {
                if self.board.get(pt.0, pt.1).is_some() {
                    break;
                }
                if is_king || !is_corner(pt) {
                    moves.push(pt);
                }
                steps += 1;
            }
        }
        moves
    }

    /// Every `(origin, destination)` pair available to the side to move.
    pub fn legal_moves(&self) -> Vec<(Point, Point)> {
        self.board
            .pieces()
            .filter(|&(_, piece)| self.side.owns(piece))
            .flat_map(|((x, y), _)| {
                self.valid_moves_from(x, y)
                    .into_iter()
                    .map(move |dest| ((x, y), dest))
            })
            .collect()
    }

    /// Play a move and return the cells of the captured pieces.
    ///
    /// The destination must be one of [`Position::valid_moves_from`] for the
    /// origin; anything else is refused and leaves the position untouched.
    /// The turn passes to the other side after every successful move,
    /// including the one that ends the game.
    pub fn move_from(&mut self, origin: Point, dest: Point) -> Result<Vec<Point>, MoveError> {
        if let Err(e) = self.check_move(origin, dest) {
            warn!(?origin, ?dest, side = %self.side, error = %e, "move rejected");
            return Err(e);
        }

        self.board.swap(origin, dest);

        let captured = capture_set(&self.board, dest, self.side);
        for &pt in &captured {
            self.board.set(pt, None);
        }
        debug!(?origin, ?dest, side = %self.side, ?captured, "move played");

        self.side = self.side.opponent();
        Ok(captured)
    }

    fn check_move(&self, origin: Point, dest: Point) -> Result<(), MoveError> {
        if !Board::in_bounds(origin.0, origin.1) || !Board::in_bounds(dest.0, dest.1) {
            return Err(MoveError::OutOfBounds);
        }
        if self.current_state() != GameState::Playing {
            return Err(MoveError::GameOver);
        }
        if !self.can_select(origin.0, origin.1) {
            return Err(MoveError::NotSelectable);
        }
        if !self.valid_moves_from(origin.0, origin.1).contains(&dest) {
            return Err(MoveError::IllegalDestination);
        }
        Ok(())
    }

    /// Derive the game state from the board.
    ///
    /// A missing king is checked first, so a board without a king always
    /// reports an attacker win.
    pub fn current_state(&self) -> GameState {
        let Some(king) = self.board.king() else {
            return GameState::AttackerWon;
        };
        if CORNERS.contains(&king) {
            return GameState::DefenderWon;
        }
        GameState::Playing
    }
}

/// Cells captured when a piece of `mover` lands on `dest`.
///
/// An enemy piece next to `dest` is captured when the cell beyond it, in the
/// same direction, holds a piece of `mover`. The king is captured the same
/// way as a defender. All four directions are checked against the same
/// board, so captures never trigger further captures.
pub fn capture_set(board: &Board, dest: Point, mover: Side) -> Vec<Point> {
    DELTA
        .iter()
        .filter_map(|&delta| {
            let adjacent = Board::offset(dest, delta, 1)?;
            let beyond = Board::offset(dest, delta, 2)?;
            let victim = board.get(adjacent.0, adjacent.1)?;
            let anvil = board.get(beyond.0, beyond.1)?;
            (mover.opponent().owns(victim) && mover.owns(anvil)).then_some(adjacent)
        })
        .collect()
}

/// Parse a coordinate string (e.g. "e5") into a Point.
///
/// Columns are letters `a` to `i` from the left, rows are numbered from 1
/// at the top. Returns `None` for malformed or off-board input.
pub fn parse_coord(s: &str) -> Option<Point> {
    let s = s.trim();
    let mut chars = s.chars();
    let col_char = chars.next()?.to_ascii_lowercase();
    if !col_char.is_ascii_lowercase() {
        return None;
    }
    let x = (col_char as u8 - b'a') as usize;
    let row: usize = chars.as_str().parse().ok()?;
    let y = row.checked_sub(1)?;
    Board::in_bounds(x, y).then_some((x, y))
}

/// Convert a Point to a coordinate string (e.g. "e5").
pub fn str_coord((x, y): Point) -> String {
    let c = (b'a' + x as u8) as char;
    format!("{c}{}", y + 1)
}
