// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]
#![deny(clippy::all)]

//! Chess board viewer UI library
//!
//! - `controller`: selection state machine over a rules engine
//! - `piece_animation`: interpolated piece movement
//! - `session`: headless frame loop driving both
//! - `components`: egui painting and input translation
//! - `app`: the eframe application

pub mod app;
pub mod assets;
pub mod components;
pub mod config;
pub mod controller;
pub mod piece_animation;
pub mod session;

pub use config::ViewerConfig;
pub use controller::{square_at, BoardController, ClickOutcome, Command, Selection};
pub use piece_animation::{ActiveAnimation, AnimationFrame, MoveAnimation};
pub use session::{BoardView, InputEvent, PieceMotion, Session, TickClock, TickOutcome};
