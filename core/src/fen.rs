// SPDX-License-Identifier: MIT OR Apache-2.0

//! Forsyth-Edwards Notation parsing and generation

use crate::{
    board::Board, CastlingRights, Color, GameError, GameState, Piece, PieceKind, Square,
    BOARD_DIMENSION,
};

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl GameState {
    /// Set up a position from FEN text
    ///
    /// Placement and side to move are required. Castling and en-passant
    /// fields default to `-`; the move clocks are accepted and ignored.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let mut fields = fen.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| GameError::InvalidFen("empty input".to_string()))?;
        let board = parse_placement(placement)?;

        let side = match fields.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => {
                return Err(GameError::InvalidFen(format!("bad side to move '{}'", other)))
            }
            None => return Err(GameError::InvalidFen("missing side to move".to_string())),
        };

        let castling = parse_castling(fields.next().unwrap_or("-"))?;

        let en_passant = match fields.next().unwrap_or("-") {
            "-" => None,
            text => Some(Square::from_algebraic(text).ok_or_else(|| {
                GameError::InvalidFen(format!("bad en-passant square '{}'", text))
            })?),
        };

        GameState::from_parts(board, side, castling, en_passant)
    }

    /// Describe the position as FEN; move clocks are not tracked and render as `0 1`
    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for row in 0..BOARD_DIMENSION {
            let mut gap = 0;
            for col in 0..BOARD_DIMENSION {
                match self.board().get(Square::new(row, col)) {
                    Some(piece) => {
                        if gap > 0 {
                            placement.push_str(&gap.to_string());
                            gap = 0;
                        }
                        placement.push(piece.fen_letter());
                    }
                    None => gap += 1,
                }
            }
            if gap > 0 {
                placement.push_str(&gap.to_string());
            }
            if row + 1 < BOARD_DIMENSION {
                placement.push('/');
            }
        }

        let side = match self.side_to_move() {
            Color::White => "w",
            Color::Black => "b",
        };

        let rights = self.castling();
        let mut castling: String = [
            (rights.white_kingside, 'K'),
            (rights.white_queenside, 'Q'),
            (rights.black_kingside, 'k'),
            (rights.black_queenside, 'q'),
        ]
        .iter()
        .filter(|(allowed, _)| *allowed)
        .map(|(_, letter)| *letter)
        .collect();
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant()
            .map_or_else(|| "-".to_string(), |square| square.to_string());

        format!("{} {} {} {} 0 1", placement, side, castling, en_passant)
    }
}

fn parse_placement(placement: &str) -> Result<Board, GameError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != BOARD_DIMENSION as usize {
        return Err(GameError::InvalidFen(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut board = Board::empty();
    for (row, rank) in ranks.iter().enumerate() {
        let mut col: u8 = 0;
        for symbol in rank.chars() {
            if let Some(skip) = symbol.to_digit(10) {
                col = col
                    .checked_add(skip as u8)
                    .filter(|next| *next <= BOARD_DIMENSION)
                    .ok_or_else(|| GameError::InvalidFen(format!("rank {} is too long", rank)))?;
                continue;
            }
            let kind = PieceKind::from_letter(symbol)
                .ok_or_else(|| GameError::InvalidFen(format!("unknown piece '{}'", symbol)))?;
            let color = if symbol.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            if col >= BOARD_DIMENSION {
                return Err(GameError::InvalidFen(format!("rank {} is too long", rank)));
            }
            board.set(Square::new(row as u8, col), Some(Piece::new(color, kind)));
            col += 1;
        }
        if col != BOARD_DIMENSION {
            return Err(GameError::InvalidFen(format!(
                "rank '{}' covers {} files",
                rank, col
            )));
        }
    }

    Ok(board)
}

fn parse_castling(text: &str) -> Result<CastlingRights, GameError> {
    let mut rights = CastlingRights::NONE;
    if text == "-" {
        return Ok(rights);
    }
    for letter in text.chars() {
        match letter {
            'K' => rights.white_kingside = true,
            'Q' => rights.white_queenside = true,
            'k' => rights.black_kingside = true,
            'q' => rights.black_queenside = true,
            other => {
                return Err(GameError::InvalidFen(format!(
                    "bad castling flag '{}'",
                    other
                )))
            }
        }
    }
    Ok(rights)
}
