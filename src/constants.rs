//! Constants for board geometry, the starting layout, and playout limits.
//!
//! The board is stored as a flat array of `N * N` cells indexed `x + y * N`,
//! with `(0, 0)` in the top-left corner.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN).
pub const N: usize = 9;

/// Total number of cells on the board.
pub const BOARDSIZE: usize = N * N;

/// The four corner cells. Only the king may enter them, and a king standing
/// on one wins the game for the defenders.
pub const CORNERS: [(usize, usize); 4] = [(0, 0), (N - 1, 0), (0, N - 1), (N - 1, N - 1)];

/// The centre cell, where the king starts.
pub const CENTER: (usize, usize) = (N / 2, N / 2);

// =============================================================================
// Starting Layout
// =============================================================================

/// Canonical starting position, one row per line, top row first.
///
/// `K` = king, `D` = defender, `A` = attacker, `.` = empty.
pub const INITIAL_LAYOUT: &str = "\
...AAA...
....A....
....D....
A...D...A
AADDKDDAA
A...D...A
....D....
....A....
...AAA...";

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Orthogonal offsets as `(dx, dy)`.
/// Order: North, South, West, East
pub const DELTA: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

// =============================================================================
// Playout Parameters
// =============================================================================

/// Maximum number of plies in a random playout.
pub const MAX_GAME_LEN: usize = N * N * 3;

/// Seed used by the demo when none is given on the command line.
pub const DEFAULT_SEED: u64 = 1;
