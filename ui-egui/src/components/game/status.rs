// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game result and status text

use chessview_core::{Color, GamePhase, GameStatus};

/// Banner text for a finished game, `None` while play continues
pub fn result_text(status: &GameStatus) -> Option<&'static str> {
    match (status.phase, status.winner()) {
        (GamePhase::Active, _) => None,
        (GamePhase::Checkmate, Some(Color::White)) => Some("White wins by checkmate"),
        (GamePhase::Checkmate, _) => Some("Black wins by checkmate"),
        (GamePhase::Stalemate, _) => Some("Stalemate"),
    }
}

/// One-line status summary used for the window title and logs
pub struct GameStatusText;

impl GameStatusText {
    pub fn summary(status: &GameStatus, moves_played: usize) -> String {
        if let Some(result) = result_text(status) {
            return result.to_string();
        }
        let check = if status.in_check { ", check" } else { "" };
        format!(
            "{} to move{} (move {})",
            status.side_to_move,
            check,
            moves_played / 2 + 1
        )
    }
}
