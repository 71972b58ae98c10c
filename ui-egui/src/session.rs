// SPDX-License-Identifier: MIT OR Apache-2.0

//! Headless frame loop
//!
//! A [`Session`] owns the controller and the animation in flight. Each call to
//! [`Session::tick`] is one frame:
//! - while a move is animating, one frame is advanced and input is dropped
//! - otherwise the tick's events are dispatched to the controller in order
//! - a move committed during the tick starts animating in the same frame
//!
//! Quit is honored in every tick, including between animation frames.

use chessview_core::{Board, CommittedMove, GameState, GameStatus, RulesEngine, Square};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ViewerConfig;
use crate::controller::{BoardController, ClickOutcome, Command};
use crate::piece_animation::{ActiveAnimation, MoveAnimation};

/// Input gathered from the window for one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button pressed at pixel coordinates relative to the board origin
    PointerDown { x: f32, y: f32 },
    Command(Command),
    Quit,
}

/// Whether the loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
}

/// Moving piece drawn at a fractional square position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PieceMotion {
    pub mv: CommittedMove,
    pub row: f32,
    pub col: f32,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub board: Board,
    pub status: GameStatus,
    pub selected: Option<Square>,
    pub targets: Vec<Square>,
    /// Set while a move is animating; highlights are not drawn then
    pub motion: Option<PieceMotion>,
}

/// Controller plus animation playback, driven one tick at a time
#[derive(Debug)]
pub struct Session<E: RulesEngine = GameState> {
    controller: BoardController<E>,
    animation: Option<ActiveAnimation>,
    frames_per_square: u32,
    dropped_events: u64,
    ticks: u64,
}

impl Session<GameState> {
    /// Session over a fresh standard game
    pub fn new(config: &ViewerConfig) -> Self {
        Self::with_engine(GameState::new(), config)
    }
}

impl<E: RulesEngine> Session<E> {
    /// Session over an existing engine state
    pub fn with_engine(engine: E, config: &ViewerConfig) -> Self {
        Self {
            controller: BoardController::with_engine(engine, config.board.square_size),
            animation: None,
            frames_per_square: config.animation.frames_per_square(),
            dropped_events: 0,
            ticks: 0,
        }
    }

    pub fn controller(&self) -> &BoardController<E> {
        &self.controller
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Events discarded because they arrived during an animation
    pub fn dropped_events(&self) -> u64 {
        self.dropped_events
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one frame of the loop
    pub fn tick<I>(&mut self, events: I) -> TickOutcome
    where
        I: IntoIterator<Item = InputEvent>,
    {
        self.ticks += 1;

        if let Some(active) = self.animation.as_mut() {
            if active.advance().is_some() {
                for event in events {
                    if event == InputEvent::Quit {
                        info!("Quit requested during animation");
                        return TickOutcome::Quit;
                    }
                    self.dropped_events += 1;
                    debug!(?event, "Input dropped during animation");
                }
                return TickOutcome::Continue;
            }
            debug!(frames = active.animation().len(), "Animation finished");
            self.animation = None;
        }

        for event in events {
            match event {
                InputEvent::PointerDown { x, y } => {
                    if let ClickOutcome::Committed(mv) = self.controller.pointer_down(x, y) {
                        debug!(from = %mv.from, to = %mv.to, "Animation requested");
                    }
                }
                InputEvent::Command(command) => self.controller.command(command),
                InputEvent::Quit => {
                    info!("Quit requested");
                    return TickOutcome::Quit;
                }
            }
        }

        if let Some(mv) = self.controller.take_pending_animation() {
            let animation = MoveAnimation::new(&mv, self.frames_per_square);
            let mut active = ActiveAnimation::start(animation);
            // First frame is shown this tick
            active.advance();
            self.animation = Some(active);
        }

        TickOutcome::Continue
    }

    /// Snapshot of what should be on screen after the last tick
    pub fn view(&self) -> BoardView {
        let engine = self.controller.engine();
        let motion = self.animation.as_ref().map(|active| {
            let frame = active.current();
            PieceMotion {
                mv: active.animation().mv,
                row: frame.row,
                col: frame.col,
            }
        });

        let (selected, targets) = if motion.is_some() {
            (None, Vec::new())
        } else {
            (
                self.controller.selection().square(),
                self.controller.highlight_set(),
            )
        };

        BoardView {
            board: *engine.board(),
            status: self.controller.status(),
            selected,
            targets,
            motion,
        }
    }
}

/// Paces ticks to a fixed rate when the host redraws more often
///
/// Times are seconds on the host's clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickClock {
    last_tick: Option<f64>,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left until the next tick is due; zero when it is due now
    pub fn remaining(&self, now: f64, interval: Duration) -> Duration {
        match self.last_tick {
            None => Duration::ZERO,
            Some(last) => {
                let elapsed = (now - last).max(0.0);
                Duration::from_secs_f64((interval.as_secs_f64() - elapsed).max(0.0))
            }
        }
    }

    /// Claim the tick due at `now`, if any
    pub fn try_tick(&mut self, now: f64, interval: Duration) -> bool {
        if self.remaining(now, interval).is_zero() {
            self.last_tick = Some(now);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(square: Square) -> InputEvent {
        InputEvent::PointerDown {
            x: f32::from(square.col()) * 64.0 + 32.0,
            y: f32::from(square.row()) * 64.0 + 32.0,
        }
    }

    #[test]
    fn commit_starts_animation_in_same_tick() {
        let mut session = Session::new(&ViewerConfig::default());
        session.tick([click(Square::new(6, 4)), click(Square::new(4, 4))]);
        assert!(session.is_animating());

        let view = session.view();
        let motion = view.motion.expect("piece is moving");
        assert_eq!((motion.row, motion.col), (6.0, 4.0));
        assert!(view.targets.is_empty());
        assert_eq!(view.selected, None);
    }

    #[test]
    fn idle_tick_without_events_changes_nothing() {
        let mut session = Session::new(&ViewerConfig::default());
        let before = session.view();
        assert_eq!(session.tick([]), TickOutcome::Continue);
        assert_eq!(session.view(), before);
    }

    #[test]
    fn clock_allows_one_tick_per_interval() {
        let interval = Duration::from_secs_f64(1.0 / 60.0);
        let mut clock = TickClock::new();
        assert!(clock.try_tick(10.0, interval));
        // Redraws caused by pointer motion inside the interval do not tick
        assert!(!clock.try_tick(10.005, interval));
        assert!(!clock.try_tick(10.010, interval));
        assert!(clock.remaining(10.010, interval) > Duration::ZERO);
        assert!(clock.try_tick(10.017, interval));
        assert!(clock.remaining(10.017, interval) > Duration::from_millis(16));
    }

    #[test]
    fn animation_speed_ignores_extra_redraws() {
        let interval = Duration::from_secs_f64(1.0 / 60.0);
        let mut clock = TickClock::new();
        let mut session = Session::new(&ViewerConfig::default());
        session.tick([click(Square::new(6, 4)), click(Square::new(4, 4))]);
        clock.try_tick(0.0, interval);

        // Host redraws every millisecond for a tenth of a second
        for ms in 1..=100 {
            if clock.try_tick(f64::from(ms) / 1000.0, interval) {
                session.tick([]);
            }
        }
        assert!(session.is_animating());
        assert!(session.ticks() <= 7);
    }
}
