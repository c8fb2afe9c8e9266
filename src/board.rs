//! Board grid, piece and side types.
//!
//! The grid is a flat `Vec<Option<Piece>>` of `N * N` cells indexed
//! `x + y * N`. Every accessor is bounds-checked: reads outside the board
//! return `None` rather than panicking.

use std::fmt;

use crate::constants::{BOARDSIZE, CORNERS, N};

/// A piece on the board. Pieces have no identity beyond their cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Piece {
    King,
    Defender,
    Attacker,
}

impl Piece {
    /// The side this piece fights for.
    pub fn side(self) -> Side {
        match self {
            Piece::King | Piece::Defender => Side::Defender,
            Piece::Attacker => Side::Attacker,
        }
    }

    fn to_char(self) -> char {
        match self {
            Piece::King => 'K',
            Piece::Defender => 'D',
            Piece::Attacker => 'A',
        }
    }
}

/// One of the two players.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Defender,
    Attacker,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Defender => Side::Attacker,
            Side::Attacker => Side::Defender,
        }
    }

    /// Whether `piece` belongs to this side. The defenders own the king.
    #[inline]
    pub fn owns(self, piece: Piece) -> bool {
        piece.side() == self
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Defender => write!(f, "defender"),
            Side::Attacker => write!(f, "attacker"),
        }
    }
}

/// A cell on the board as `(x, y)`.
pub type Point = (usize, usize);

/// Whether `pt` is one of the four corner cells.
#[inline]
pub fn is_corner(pt: Point) -> bool {
    CORNERS.contains(&pt)
}

/// Error returned when a text diagram cannot be turned into a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// The diagram does not describe exactly `N * N` cells.
    WrongCellCount(usize),
    /// A character other than `K`, `D`, `A` or `.` was found.
    UnknownPiece(char),
    /// More than one king was placed.
    MultipleKings,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::WrongCellCount(n) => {
                write!(f, "layout has {n} cells, expected {BOARDSIZE}")
            }
            LayoutError::UnknownPiece(c) => write!(f, "unknown piece character '{c}'"),
            LayoutError::MultipleKings => write!(f, "layout has more than one king"),
        }
    }
}

impl std::error::Error for LayoutError {}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Option<Piece>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with no pieces on it.
    pub fn empty() -> Self {
        Self {
            cells: vec![None; BOARDSIZE],
        }
    }

    /// Parse a text diagram, one character per cell, top row first.
    ///
    /// Whitespace is ignored, so rows may be split across lines or padded.
    pub fn parse(layout: &str) -> Result<Self, LayoutError> {
        let mut cells = Vec::with_capacity(BOARDSIZE);
        for c in layout.chars().filter(|c| !c.is_whitespace()) {
            let cell = match c {
                '.' => None,
                'K' | 'k' => Some(Piece::King),
                'D' | 'd' => Some(Piece::Defender),
                'A' | 'a' => Some(Piece::Attacker),
                other => return Err(LayoutError::UnknownPiece(other)),
            };
            cells.push(cell);
        }
        if cells.len() != BOARDSIZE {
            return Err(LayoutError::WrongCellCount(cells.len()));
        }
        if cells.iter().filter(|&&c| c == Some(Piece::King)).count() > 1 {
            return Err(LayoutError::MultipleKings);
        }
        Ok(Self { cells })
    }

    #[inline]
    fn idx(x: usize, y: usize) -> usize {
        y * N + x
    }

    #[inline]
    pub fn in_bounds(x: usize, y: usize) -> bool {
        x < N && y < N
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Piece> {
        if !Self::in_bounds(x, y) {
            return None;
        }
        self.cells[Self::idx(x, y)]
    }

    /// Overwrite a cell. Writes outside the board are ignored.
    pub(crate) fn set(&mut self, (x, y): Point, piece: Option<Piece>) {
        if Self::in_bounds(x, y) {
            self.cells[Self::idx(x, y)] = piece;
        }
    }

    /// Exchange the contents of two on-board cells.
    pub(crate) fn swap(&mut self, a: Point, b: Point) {
        debug_assert!(Self::in_bounds(a.0, a.1) && Self::in_bounds(b.0, b.1));
        self.cells.swap(Self::idx(a.0, a.1), Self::idx(b.0, b.1));
    }

    /// The cell `steps` cells away from `pt` along `delta`, if it is on the board.
    pub fn offset(pt: Point, delta: (isize, isize), steps: isize) -> Option<Point> {
        let x = pt.0.checked_add_signed(delta.0 * steps)?;
        let y = pt.1.checked_add_signed(delta.1 * steps)?;
        Self::in_bounds(x, y).then_some((x, y))
    }

    /// Where the king stands, or `None` once it has been captured.
    pub fn king(&self) -> Option<Point> {
        self.cells
            .iter()
            .position(|&c| c == Some(Piece::King))
            .map(|i| (i % N, i / N))
    }

    /// All occupied cells with their pieces, in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Point, Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.map(|p| ((i % N, i / N), p)))
    }

    /// Number of pieces of the given kind on the board.
    pub fn count(&self, piece: Piece) -> usize {
        self.cells.iter().filter(|&&c| c == Some(piece)).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..N {
            for x in 0..N {
                let ch = self.get(x, y).map_or('.', Piece::to_char);
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
