// SPDX-License-Identifier: MIT OR Apache-2.0

//! chessview core - chess rules engine
//!
//! This crate provides the rules authority consumed by the board viewer:
//! - Board representation and the standard starting position
//! - Legal move generation including castling, en passant and promotion
//! - Check, checkmate and stalemate detection
//! - Move history with exact undo
//! - Coordinate notation and FEN position setup

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod engine;
pub mod fen;
pub mod notation;
pub mod rules;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub use board::Board;
pub use engine::{CastlingRights, GameState, RulesEngine};
pub use notation::notation;

/// Number of ranks and files on the board
pub const BOARD_DIMENSION: u8 = 8;

/// Side in a chess game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// White moves first
    White,
    /// Black player
    Black,
}

impl Color {
    /// Returns the opposite color
    pub fn opposite(&self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row delta of a pawn push for this side (white moves towards row 0)
    pub fn pawn_direction(&self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Row holding this side's king and rooks at the start
    pub fn back_rank(&self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    /// Single-letter prefix used by piece image names
    pub fn prefix(&self) -> char {
        match self {
            Color::White => 'w',
            Color::Black => 'b',
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

/// Kind of chess piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// All kinds, in image-loading order
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Upper-case letter for the kind
    pub fn letter(&self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    /// Parse an upper- or lower-case piece letter
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

/// A piece on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Owner of the piece
    pub color: Color,
    /// What the piece is
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Two-character code such as `wK` or `bP`
    pub fn code(&self) -> String {
        format!("{}{}", self.color.prefix(), self.kind.letter())
    }

    /// FEN letter: upper case for white, lower case for black
    pub fn fen_letter(&self) -> char {
        match self.color {
            Color::White => self.kind.letter(),
            Color::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }
}

/// Board square addressed by (row, column)
///
/// Row 0 is the eighth rank (black's back rank), row 7 the first rank.
/// Column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Create a square; both coordinates must be below 8
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < BOARD_DIMENSION && col < BOARD_DIMENSION);
        Self { row, col }
    }

    /// Create a square from signed coordinates, `None` when off the board
    pub fn checked(row: i32, col: i32) -> Option<Self> {
        let range = 0..i32::from(BOARD_DIMENSION);
        if range.contains(&row) && range.contains(&col) {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    /// Square displaced by the given deltas, if still on the board
    pub fn offset(&self, d_row: i8, d_col: i8) -> Option<Self> {
        Self::checked(
            i32::from(self.row) + i32::from(d_row),
            i32::from(self.col) + i32::from(d_col),
        )
    }

    /// Parse algebraic form such as `e4`
    pub fn from_algebraic(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as u8 - b'a';
        let row = BOARD_DIMENSION - (rank as u8 - b'0');
        Some(Self::new(row, col))
    }

    /// File letter, `a` through `h`
    pub fn file_char(&self) -> char {
        (b'a' + self.col) as char
    }

    /// Rank digit, `1` through `8`
    pub fn rank_char(&self) -> char {
        (b'0' + BOARD_DIMENSION - self.row) as char
    }

    /// All 64 squares in row-major order
    pub fn all() -> impl Iterator<Item = Square> {
        (0..BOARD_DIMENSION)
            .flat_map(|row| (0..BOARD_DIMENSION).map(move |col| Square::new(row, col)))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// Unvalidated proposal to move whatever stands on `from` to `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCandidate {
    pub from: Square,
    pub to: Square,
}

impl MoveCandidate {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

/// Special handling attached to a committed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// Plain move or capture
    Normal,
    /// Pawn advancing two squares, leaving an en-passant target
    DoublePush,
    /// Pawn capturing a pawn that just double-pushed past it
    EnPassant,
    /// King castling; the rook travels between the given squares
    Castle { rook_from: Square, rook_to: Square },
    /// Pawn reaching the last rank and becoming the given kind
    Promotion(PieceKind),
}

/// A move the rules engine accepted and applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedMove {
    pub from: Square,
    pub to: Square,
    /// Piece that moved, as it stood on `from`
    pub piece: Piece,
    /// Piece removed from the board, if any
    pub captured: Option<Piece>,
    pub kind: MoveKind,
}

impl CommittedMove {
    /// The square pair this move answers
    pub fn candidate(&self) -> MoveCandidate {
        MoveCandidate::new(self.from, self.to)
    }

    /// Square the captured piece stood on (differs from `to` for en passant)
    pub fn capture_square(&self) -> Option<Square> {
        self.captured?;
        match self.kind {
            MoveKind::EnPassant => Some(Square::new(self.from.row(), self.to.col())),
            _ => Some(self.to),
        }
    }

    /// Piece standing on `to` once the move is applied
    pub fn landed_piece(&self) -> Piece {
        match self.kind {
            MoveKind::Promotion(kind) => Piece::new(self.piece.color, kind),
            _ => self.piece,
        }
    }
}

/// Terminal or non-terminal status of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Active,
    Checkmate,
    Stalemate,
}

/// Snapshot of the game status for the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatus {
    pub phase: GamePhase,
    /// Whether the side to move is in check
    pub in_check: bool,
    pub side_to_move: Color,
    pub white_king: Square,
    pub black_king: Square,
}

impl GameStatus {
    /// King location for the given side
    pub fn king(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// King currently under attack, if any
    pub fn checked_king(&self) -> Option<Square> {
        self.in_check.then(|| self.king(self.side_to_move))
    }

    pub fn is_over(&self) -> bool {
        self.phase != GamePhase::Active
    }

    /// Side that delivered mate
    pub fn winner(&self) -> Option<Color> {
        match self.phase {
            GamePhase::Checkmate => Some(self.side_to_move.opposite()),
            _ => None,
        }
    }
}

/// Errors reported by the rules engine
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The candidate is not in the current legal-move list
    #[error("Illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    /// The FEN text could not be parsed
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),
}
