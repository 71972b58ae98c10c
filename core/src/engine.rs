// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rules engine interface and the standard chess game state

use crate::rules::{self, apply_to_board, revert_on_board};
use crate::{
    board::Board, Color, CommittedMove, GameError, GamePhase, GameStatus, MoveCandidate, MoveKind,
    Piece, PieceKind, Square,
};
use serde::{Deserialize, Serialize};

/// Rules authority consumed by the board controller
///
/// Implementations own the board, decide legality and keep the move history.
/// A rejected candidate must leave the state untouched.
pub trait RulesEngine {
    /// Fresh standard starting position with white to move and no history
    fn new_game() -> Self
    where
        Self: Sized;

    /// Complete list of legal candidates for the side to move
    fn legal_moves(&self) -> Vec<MoveCandidate>;

    /// Apply the candidate if it is legal, otherwise reject without mutating
    fn try_commit(&mut self, candidate: MoveCandidate) -> Result<CommittedMove, GameError>;

    /// Pop the most recent move, `None` when the history is empty
    fn undo(&mut self) -> Option<CommittedMove>;

    /// Phase, check flag and king locations for the side to move
    fn status(&self) -> GameStatus;

    fn board(&self) -> &Board;

    fn side_to_move(&self) -> Color;

    fn history_len(&self) -> usize;

    fn last_move(&self) -> Option<&CommittedMove>;

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board().get(square)
    }
}

/// Which castling moves are still available
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_kingside: true,
        white_queenside: true,
        black_kingside: true,
        black_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_kingside: false,
        white_queenside: false,
        black_kingside: false,
        black_queenside: false,
    };

    pub fn kingside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_kingside,
            Color::Black => self.black_kingside,
        }
    }

    pub fn queenside(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_queenside,
            Color::Black => self.black_queenside,
        }
    }

    /// Drop any right tied to a king or rook home square touched by a move
    fn revoke_touching(&mut self, square: Square) {
        match (square.row(), square.col()) {
            (7, 4) => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            (7, 7) => self.white_kingside = false,
            (7, 0) => self.white_queenside = false,
            (0, 4) => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
            (0, 7) => self.black_kingside = false,
            (0, 0) => self.black_queenside = false,
            _ => {}
        }
    }
}

/// History record holding what a move overwrote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct HistoryEntry {
    mv: CommittedMove,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

/// Represents the current state of a chess game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    castling: CastlingRights,
    /// Square a pawn skipped over on the previous move
    en_passant: Option<Square>,
    white_king: Square,
    black_king: Square,
    history: Vec<HistoryEntry>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Create a game at the standard starting position
    pub fn new() -> Self {
        Self {
            board: Board::starting(),
            side_to_move: Color::White,
            castling: CastlingRights::ALL,
            en_passant: None,
            white_king: Square::new(7, 4),
            black_king: Square::new(0, 4),
            history: Vec::new(),
        }
    }

    /// Build a state from its parts; both kings must be on the board
    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> Result<Self, GameError> {
        let missing = |color: Color| GameError::InvalidFen(format!("no {} king", color));
        let white_king = board.find_king(Color::White).ok_or_else(|| missing(Color::White))?;
        let black_king = board.find_king(Color::Black).ok_or_else(|| missing(Color::Black))?;
        Ok(Self {
            board,
            side_to_move,
            castling,
            en_passant,
            white_king,
            black_king,
            history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// King location for the given side
    pub fn king(&self, color: Color) -> Square {
        match color {
            Color::White => self.white_king,
            Color::Black => self.black_king,
        }
    }

    /// Committed moves, oldest first
    pub fn history(&self) -> impl Iterator<Item = &CommittedMove> + '_ {
        self.history.iter().map(|entry| &entry.mv)
    }

    /// Whether the side to move is in check
    pub fn in_check(&self) -> bool {
        let side = self.side_to_move;
        rules::is_attacked(&self.board, self.king(side), side.opposite())
    }

    /// Apply an already validated move
    fn apply(&mut self, mv: CommittedMove) {
        self.history.push(HistoryEntry {
            mv,
            castling: self.castling,
            en_passant: self.en_passant,
        });

        apply_to_board(&mut self.board, &mv);

        if mv.piece.kind == PieceKind::King {
            match mv.piece.color {
                Color::White => self.white_king = mv.to,
                Color::Black => self.black_king = mv.to,
            }
        }

        self.castling.revoke_touching(mv.from);
        self.castling.revoke_touching(mv.to);

        self.en_passant = match mv.kind {
            MoveKind::DoublePush => Some(Square::new(
                (mv.from.row() + mv.to.row()) / 2,
                mv.from.col(),
            )),
            _ => None,
        };

        self.side_to_move = self.side_to_move.opposite();
    }
}

impl RulesEngine for GameState {
    fn new_game() -> Self {
        Self::new()
    }

    fn legal_moves(&self) -> Vec<MoveCandidate> {
        rules::legal_moves(self)
            .iter()
            .map(CommittedMove::candidate)
            .collect()
    }

    fn try_commit(&mut self, candidate: MoveCandidate) -> Result<CommittedMove, GameError> {
        let Some(mv) = rules::legal_moves(self)
            .into_iter()
            .find(|mv| mv.candidate() == candidate)
        else {
            tracing::debug!(from = %candidate.from, to = %candidate.to, "Candidate is not legal");
            return Err(GameError::IllegalMove {
                from: candidate.from,
                to: candidate.to,
            });
        };

        self.apply(mv);
        Ok(mv)
    }

    fn undo(&mut self) -> Option<CommittedMove> {
        let entry = self.history.pop()?;
        let mv = entry.mv;

        revert_on_board(&mut self.board, &mv);

        if mv.piece.kind == PieceKind::King {
            match mv.piece.color {
                Color::White => self.white_king = mv.from,
                Color::Black => self.black_king = mv.from,
            }
        }

        self.castling = entry.castling;
        self.en_passant = entry.en_passant;
        self.side_to_move = self.side_to_move.opposite();

        Some(mv)
    }

    fn status(&self) -> GameStatus {
        let in_check = self.in_check();
        let phase = if !rules::legal_moves(self).is_empty() {
            GamePhase::Active
        } else if in_check {
            GamePhase::Checkmate
        } else {
            GamePhase::Stalemate
        };

        GameStatus {
            phase,
            in_check,
            side_to_move: self.side_to_move,
            white_king: self.white_king,
            black_king: self.black_king,
        }
    }

    fn board(&self) -> &Board {
        &self.board
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn history_len(&self) -> usize {
        self.history.len()
    }

    fn last_move(&self) -> Option<&CommittedMove> {
        self.history.last().map(|entry| &entry.mv)
    }
}
