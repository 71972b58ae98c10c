// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board rendering logic
//!
//! Drawing order per frame:
//! - checker squares
//! - highlight overlays (check, selection, targets) unless a move is animating
//! - pieces, with the moving piece last while animating
//! - game-over dimming and banner

use chessview_core::{Piece, Square};
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, Vec2};

use crate::assets::PieceSet;
use crate::components::game::result_text;
use crate::config::{BannerConfig, BoardConfig, PieceConfig};
use crate::session::{BoardView, PieceMotion};

/// Kind of translucent overlay drawn on a square
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightKind {
    Check,
    Selected,
    Target,
}

/// Overlays for a frame, in paint order
pub fn highlight_layers(view: &BoardView) -> Vec<(Square, HighlightKind)> {
    if view.motion.is_some() {
        return Vec::new();
    }

    let mut layers = Vec::with_capacity(view.targets.len() + 2);
    if let Some(king) = view.status.checked_king() {
        layers.push((king, HighlightKind::Check));
    }
    if let Some(selected) = view.selected {
        if view.board.is_owned_by(selected, view.status.side_to_move) {
            layers.push((selected, HighlightKind::Selected));
        }
    }
    layers.extend(view.targets.iter().map(|square| (*square, HighlightKind::Target)));
    layers
}

/// Game-over text, held back until the final move has finished animating
pub fn banner_text(view: &BoardView) -> Option<&'static str> {
    if view.motion.is_some() {
        return None;
    }
    result_text(&view.status)
}

/// Banner geometry: where the text goes and the clamped panel around it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerLayout {
    pub text_rect: Rect,
    pub panel: Rect,
}

/// Center the text on the window and clamp the padded panel inside the margin
pub fn banner_layout(window: Rect, text_size: Vec2, padding: f32, margin: f32) -> BannerLayout {
    let text_rect = Rect::from_center_size(window.center(), text_size);
    let panel = text_rect.expand(padding);
    let bounds = window.shrink(margin);
    BannerLayout {
        text_rect,
        panel: clamp_within(panel, bounds),
    }
}

/// Move `rect` inside `bounds`; an axis that does not fit is centered instead
fn clamp_within(rect: Rect, bounds: Rect) -> Rect {
    let min_x = clamp_axis(rect.min.x, rect.width(), bounds.min.x, bounds.width());
    let min_y = clamp_axis(rect.min.y, rect.height(), bounds.min.y, bounds.height());
    Rect::from_min_size(Pos2::new(min_x, min_y), rect.size())
}

fn clamp_axis(start: f32, len: f32, bound_start: f32, bound_len: f32) -> f32 {
    if len >= bound_len {
        bound_start + (bound_len - len) / 2.0
    } else if start < bound_start {
        bound_start
    } else if start + len > bound_start + bound_len {
        bound_start + bound_len - len
    } else {
        start
    }
}

/// Board renderer component
pub struct BoardRenderer {
    board: BoardConfig,
    banner: BannerConfig,
    style: PieceConfig,
    pieces: PieceSet,
}

impl BoardRenderer {
    pub fn new(
        board: BoardConfig,
        banner: BannerConfig,
        style: PieceConfig,
        pieces: PieceSet,
    ) -> Self {
        Self {
            board,
            banner,
            style,
            pieces,
        }
    }

    pub fn square_size(&self) -> f32 {
        self.board.square_size
    }

    /// Render one frame of the board
    pub fn render(&self, painter: &Painter, board_rect: Rect, view: &BoardView) {
        self.render_squares(painter, board_rect);
        self.render_highlights(painter, board_rect, view);

        for (square, piece) in view.board.pieces() {
            let rect = super::square_rect(square, board_rect, self.square_size());
            self.draw_piece(painter, rect, piece);
        }

        if let Some(motion) = &view.motion {
            self.render_motion(painter, board_rect, motion);
        }

        if let Some(text) = banner_text(view) {
            self.render_banner(painter, board_rect, text);
        }
    }

    /// Render the checker pattern
    fn render_squares(&self, painter: &Painter, board_rect: Rect) {
        for square in Square::all() {
            let rect = super::square_rect(square, board_rect, self.square_size());
            painter.rect_filled(rect, 0.0, self.square_color(square));
        }
    }

    fn render_highlights(&self, painter: &Painter, board_rect: Rect, view: &BoardView) {
        let alpha = self.board.highlight_alpha;
        for (square, kind) in highlight_layers(view) {
            let color = match kind {
                HighlightKind::Check => self.board.check_color,
                HighlightKind::Selected => self.board.selected_color,
                HighlightKind::Target => self.board.target_color,
            };
            let rect = super::square_rect(square, board_rect, self.square_size());
            painter.rect_filled(rect, 0.0, color.with_alpha(alpha));
        }
    }

    /// Clear the landing square, restore any captured piece, then draw the mover
    fn render_motion(&self, painter: &Painter, board_rect: Rect, motion: &PieceMotion) {
        let size = self.square_size();
        let mv = &motion.mv;

        painter.rect_filled(
            super::square_rect(mv.to, board_rect, size),
            0.0,
            self.square_color(mv.to),
        );

        if let (Some(captured), Some(at)) = (mv.captured, mv.capture_square()) {
            self.draw_piece(painter, super::square_rect(at, board_rect, size), captured);
        }

        let rect = super::fractional_rect(motion.row, motion.col, board_rect, size);
        self.draw_piece(painter, rect, mv.piece);
    }

    fn render_banner(&self, painter: &Painter, window: Rect, text: &str) {
        let cfg = &self.banner;
        painter.rect_filled(window, 0.0, Color32::from(cfg.dim_color));

        let font = FontId::proportional(cfg.font_size);
        let text_color = Color32::from(cfg.text_color);
        let galley = painter.layout_no_wrap(text.to_string(), font.clone(), text_color);
        let layout = banner_layout(window, galley.size(), cfg.padding, cfg.margin);

        painter.rect_filled(layout.panel, 0.0, Color32::from(cfg.panel_color));
        painter.rect_stroke(
            layout.panel,
            0.0,
            Stroke::new(cfg.border_width, Color32::from(cfg.border_color)),
        );

        let center = layout.text_rect.center();
        painter.text(
            center + Vec2::splat(cfg.shadow_offset),
            Align2::CENTER_CENTER,
            text,
            font.clone(),
            Color32::from(cfg.shadow_color),
        );
        painter.text(center, Align2::CENTER_CENTER, text, font, text_color);
    }

    fn draw_piece(&self, painter: &Painter, rect: Rect, piece: Piece) {
        if let Some(texture) = self.pieces.texture(piece) {
            let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
            painter.image(texture.id(), rect, uv, Color32::WHITE);
            return;
        }

        let (fill, ink) = match piece.color {
            chessview_core::Color::White => (self.style.white_fill, self.style.black_fill),
            chessview_core::Color::Black => (self.style.black_fill, self.style.white_fill),
        };
        let radius = rect.width() * self.style.token_radius_ratio;
        painter.circle_filled(rect.center(), radius, Color32::from(fill));
        painter.circle_stroke(
            rect.center(),
            radius,
            Stroke::new(2.0, Color32::from(self.style.outline)),
        );
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            piece.kind.letter(),
            FontId::proportional(rect.width() * 0.45),
            Color32::from(ink),
        );
    }

    fn square_color(&self, square: Square) -> Color32 {
        if super::is_light(square) {
            Color32::from(self.board.light_square)
        } else {
            Color32::from(self.board.dark_square)
        }
    }
}
