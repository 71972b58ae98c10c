// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board rendering components

mod interaction;
mod renderer;

pub use interaction::{command_for_key, translate_event, BoardInteraction};
pub use renderer::{banner_layout, banner_text, highlight_layers, BoardRenderer, HighlightKind};

use chessview_core::Square;
use egui::{Pos2, Rect, Vec2};

/// Screen rectangle covered by a square
pub fn square_rect(square: Square, board_rect: Rect, square_size: f32) -> Rect {
    fractional_rect(f32::from(square.row()), f32::from(square.col()), board_rect, square_size)
}

/// Screen rectangle of a square-sized cell at a fractional board position
pub fn fractional_rect(row: f32, col: f32, board_rect: Rect, square_size: f32) -> Rect {
    let min = Pos2::new(
        board_rect.min.x + col * square_size,
        board_rect.min.y + row * square_size,
    );
    Rect::from_min_size(min, Vec2::splat(square_size))
}

/// Whether a square takes the light colour; a8 (row 0, col 0) is light
pub fn is_light(square: Square) -> bool {
    (square.row() + square.col()) % 2 == 0
}
