// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board interaction handling
//!
//! Translates raw egui events into [`InputEvent`]s for the session. Pointer
//! positions are made relative to the board origin; mapping to squares is the
//! controller's job.

use egui::{Event, Key, PointerButton, Rect};

use crate::controller::Command;
use crate::session::InputEvent;

/// Key bound to a board command
pub fn command_for_key(key: Key) -> Option<Command> {
    match key {
        Key::Z => Some(Command::Undo),
        Key::R => Some(Command::Restart),
        _ => None,
    }
}

/// Translate one egui event, `None` for events the board does not use
pub fn translate_event(event: &Event, board_rect: Rect) -> Option<InputEvent> {
    match event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed: true,
            ..
        } => {
            let offset = *pos - board_rect.min;
            Some(InputEvent::PointerDown {
                x: offset.x,
                y: offset.y,
            })
        }
        Event::Key {
            key,
            pressed: true,
            repeat: false,
            ..
        } => {
            if *key == Key::Escape {
                Some(InputEvent::Quit)
            } else {
                command_for_key(*key).map(InputEvent::Command)
            }
        }
        _ => None,
    }
}

/// Board interaction handler
///
/// Input arrives on every redraw but the loop ticks at a fixed rate, so
/// events are queued until the next tick takes them.
#[derive(Debug, Default)]
pub struct BoardInteraction {
    pending: Vec<InputEvent>,
}

impl BoardInteraction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue this frame's input in arrival order
    pub fn gather(&mut self, ctx: &egui::Context, board_rect: Rect) {
        let events: Vec<InputEvent> = ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| translate_event(event, board_rect))
                .collect()
        });
        self.queue(events);

        if ctx.input(|input| input.viewport().close_requested()) {
            self.queue([InputEvent::Quit]);
        }
    }

    pub fn queue(&mut self, events: impl IntoIterator<Item = InputEvent>) {
        self.pending.extend(events);
    }

    /// Whether a quit is waiting; it should not wait for the next tick
    pub fn quit_requested(&self) -> bool {
        self.pending.contains(&InputEvent::Quit)
    }

    /// Hand every queued event to the tick
    pub fn take(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.pending)
    }
}
