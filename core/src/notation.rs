// SPDX-License-Identifier: MIT OR Apache-2.0

//! Human-readable move text for logs

use crate::{CommittedMove, MoveKind};

/// Coordinate notation: `e2e4`, `e4xd5`, `e7e8=Q`, `O-O`, `O-O-O`
pub fn notation(mv: &CommittedMove) -> String {
    if let MoveKind::Castle { rook_from, .. } = mv.kind {
        return if rook_from.col() > mv.from.col() {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let separator = if mv.captured.is_some() { "x" } else { "" };
    let mut text = format!("{}{}{}", mv.from, separator, mv.to);
    if let MoveKind::Promotion(kind) = mv.kind {
        text.push('=');
        text.push(kind.letter());
    }
    text
}
