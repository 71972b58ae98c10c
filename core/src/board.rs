// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation

use crate::{Color, Piece, PieceKind, Square, BOARD_DIMENSION};
use serde::{Deserialize, Serialize};
use std::fmt;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The 8x8 grid of squares, each empty or holding one piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Create a board with no pieces
    pub fn empty() -> Self {
        Self {
            squares: [[None; 8]; 8],
        }
    }

    /// Create the standard starting position
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for (col, kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            board.set(Square::new(0, col), Some(Piece::new(Color::Black, *kind)));
            board.set(Square::new(1, col), Some(Piece::new(Color::Black, PieceKind::Pawn)));
            board.set(Square::new(6, col), Some(Piece::new(Color::White, PieceKind::Pawn)));
            board.set(Square::new(7, col), Some(Piece::new(Color::White, *kind)));
        }
        board
    }

    /// Get the piece at the specified square
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize]
    }

    /// Replace the contents of a square, returning what stood there
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        std::mem::replace(
            &mut self.squares[square.row() as usize][square.col() as usize],
            piece,
        )
    }

    /// Move whatever stands on `from` to `to`, returning the displaced piece
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.set(from, None);
        self.set(to, moving)
    }

    /// Whether the square holds a piece of the given color
    pub fn is_owned_by(&self, square: Square, color: Color) -> bool {
        matches!(self.get(square), Some(piece) if piece.color == color)
    }

    /// Iterate over occupied squares in row-major order
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.get(square).map(|piece| (square, piece)))
    }

    /// Locate the king of the given color
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.color == color && piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Count pieces of the given color
    pub fn count_for(&self, color: Color) -> usize {
        self.pieces().filter(|(_, piece)| piece.color == color).count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_DIMENSION {
            write!(f, "{} ", BOARD_DIMENSION - row)?;
            for col in 0..BOARD_DIMENSION {
                let symbol = match self.get(Square::new(row, col)) {
                    Some(piece) => piece.fen_letter(),
                    None => '.',
                };
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        write!(f, "  ")?;
        for col in 0..BOARD_DIMENSION {
            write!(f, " {}", (b'a' + col) as char)?;
        }
        writeln!(f)
    }
}
