// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quick chess demo - headless replay of a short game through the frame loop
//! This drives the same session the window uses, without opening a window

use anyhow::{bail, Result};
use chessview_core::{notation, RulesEngine, Square};
use chessview_ui_egui::components::result_text;
use chessview_ui_egui::{InputEvent, Session, TickOutcome, ViewerConfig};
use tracing_subscriber::EnvFilter;

/// Fool's mate, the shortest possible checkmate
const MOVES: [(&str, &str); 4] = [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")];

fn press(config: &ViewerConfig, name: &str) -> Result<InputEvent> {
    let Some(square) = Square::from_algebraic(name) else {
        bail!("Unknown square {}", name);
    };
    let size = config.board.square_size;
    Ok(InputEvent::PointerDown {
        x: (f32::from(square.col()) + 0.5) * size,
        y: (f32::from(square.row()) + 0.5) * size,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ViewerConfig::default();
    let mut session = Session::new(&config);

    for (from, to) in MOVES {
        session.tick([press(&config, from)?, press(&config, to)?]);

        let mut ticks = 1;
        while session.is_animating() {
            if session.tick([]) == TickOutcome::Quit {
                return Ok(());
            }
            ticks += 1;
        }

        let engine = session.controller().engine();
        let Some(last) = engine.last_move() else {
            bail!("{}{} was not accepted", from, to);
        };
        println!("{:>2}. {:<6} ({} ticks)", engine.history_len(), notation(last), ticks);
    }

    let view = session.view();
    println!();
    println!("{}", view.board);
    println!();
    println!("{}", result_text(&view.status).unwrap_or("Game in progress"));

    Ok(())
}
