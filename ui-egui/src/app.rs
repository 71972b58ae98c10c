// SPDX-License-Identifier: MIT OR Apache-2.0

//! Main application state and frame loop glue.

use chessview_core::{GameState, RulesEngine};
use eframe::egui;
use tracing::info;

use crate::assets::{PieceImages, PieceSet};
use crate::components::{BoardInteraction, BoardRenderer, GameStatusText};
use crate::config::ViewerConfig;
use crate::session::{Session, TickClock, TickOutcome};

/// Main application state
pub struct ChessApp {
    /// Controller and animation playback
    session: Session,
    /// Board painter; owns the uploaded piece textures
    renderer: BoardRenderer,
    /// Raw input translation; queues events between ticks
    interaction: BoardInteraction,
    /// Fixed tick rate, independent of how often egui redraws
    clock: TickClock,
    config: ViewerConfig,
    /// Last title sent to the window
    title: String,
    closing: bool,
}

impl ChessApp {
    /// Create the app, uploading piece images when a set was loaded
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: ViewerConfig,
        game: GameState,
        images: Option<PieceImages>,
    ) -> Self {
        let pieces = match images {
            Some(images) => images.upload(&cc.egui_ctx),
            None => PieceSet::Tokens,
        };
        let renderer = BoardRenderer::new(
            config.board.clone(),
            config.banner.clone(),
            config.pieces.clone(),
            pieces,
        );
        info!(fen = %game.to_fen(), "Board ready");

        Self {
            session: Session::with_engine(game, &config),
            renderer,
            interaction: BoardInteraction::new(),
            clock: TickClock::new(),
            title: config.window.title.clone(),
            config,
            closing: false,
        }
    }

    fn update_title(&mut self, ctx: &egui::Context) {
        let controller = self.session.controller();
        let summary =
            GameStatusText::summary(&controller.status(), controller.engine().history_len());
        let title = format!("{} - {}", self.config.window.title, summary);
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }
}

impl eframe::App for ChessApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.closing {
            return;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let (board_rect, _) =
                    ui.allocate_exact_size(self.config.board_size(), egui::Sense::click());

                self.interaction.gather(ctx, board_rect);
                let now = ctx.input(|input| input.time);
                let interval = self.config.tick_interval(self.session.is_animating());
                let due = self.interaction.quit_requested() || self.clock.try_tick(now, interval);
                if due && self.session.tick(self.interaction.take()) == TickOutcome::Quit {
                    info!(
                        ticks = self.session.ticks(),
                        dropped = self.session.dropped_events(),
                        "Closing viewer"
                    );
                    self.closing = true;
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    return;
                }

                let painter = ui.painter_at(board_rect);
                self.renderer.render(&painter, board_rect, &self.session.view());
            });

        if self.closing {
            return;
        }

        self.update_title(ctx);

        let now = ctx.input(|input| input.time);
        let interval = self.config.tick_interval(self.session.is_animating());
        ctx.request_repaint_after(self.clock.remaining(now, interval));
    }
}
