// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board interaction controller
//!
//! Turns pointer and key input into committed moves. Selection is an explicit
//! state machine: `Empty` or `OneSelected(square)`. A second click builds a
//! candidate which is evaluated immediately, so the machine is back in one of
//! those two states before the next event is handled.

use chessview_core::{
    notation, CommittedMove, GameError, GameState, GameStatus, MoveCandidate, RulesEngine, Square,
};
use tracing::{debug, info};

/// Current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    OneSelected(Square),
}

impl Selection {
    pub fn square(&self) -> Option<Square> {
        match self {
            Selection::Empty => None,
            Selection::OneSelected(square) => Some(*square),
        }
    }
}

/// Discrete key commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Take back the most recent move
    Undo,
    /// Start a fresh game
    Restart,
}

/// What a click did to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed: off the board, not the mover's piece, or the game is over
    Ignored,
    /// A piece of the side to move became selected
    Selected(Square),
    /// The selected square was clicked again
    Deselected,
    /// The candidate was legal and has been applied
    Committed(CommittedMove),
    /// The candidate was illegal and the clicked square became the new selection
    Repicked(Square),
    /// The candidate was illegal and the selection was dropped
    Rejected,
}

/// Map a pixel position relative to the board origin to a square
///
/// Negative or out-of-range coordinates map to `None`.
pub fn square_at(x: f32, y: f32, square_size: f32) -> Option<Square> {
    if x.is_nan() || y.is_nan() || x < 0.0 || y < 0.0 || square_size <= 0.0 {
        return None;
    }
    let col = (x / square_size).floor() as i32;
    let row = (y / square_size).floor() as i32;
    Square::checked(row, col)
}

/// Owns selection state and sequences input against the rules engine
#[derive(Debug, Clone)]
pub struct BoardController<E: RulesEngine = GameState> {
    engine: E,
    selection: Selection,
    /// Legal candidates for the current position; re-derived after every change
    legal_moves: Vec<MoveCandidate>,
    status: GameStatus,
    square_size: f32,
    pending_animation: Option<CommittedMove>,
}

impl<E: RulesEngine> BoardController<E> {
    /// Controller over a fresh game
    pub fn new(square_size: f32) -> Self {
        Self::with_engine(E::new_game(), square_size)
    }

    /// Controller over an existing engine state
    pub fn with_engine(engine: E, square_size: f32) -> Self {
        let legal_moves = engine.legal_moves();
        let status = engine.status();
        Self {
            engine,
            selection: Selection::Empty,
            legal_moves,
            status,
            square_size,
            pending_animation: None,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn legal_moves(&self) -> &[MoveCandidate] {
        &self.legal_moves
    }

    pub fn square_size(&self) -> f32 {
        self.square_size
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_over()
    }

    /// Squares reachable from the current selection
    pub fn highlight_set(&self) -> Vec<Square> {
        match self.selection {
            Selection::Empty => Vec::new(),
            Selection::OneSelected(from) => self
                .legal_moves
                .iter()
                .filter(|candidate| candidate.from == from)
                .map(|candidate| candidate.to)
                .collect(),
        }
    }

    /// Take the move waiting to be animated, if any
    pub fn take_pending_animation(&mut self) -> Option<CommittedMove> {
        self.pending_animation.take()
    }

    pub fn has_pending_animation(&self) -> bool {
        self.pending_animation.is_some()
    }

    /// Handle a pointer press at pixel coordinates relative to the board origin
    pub fn pointer_down(&mut self, x: f32, y: f32) -> ClickOutcome {
        match square_at(x, y, self.square_size) {
            Some(square) => self.click(square),
            None => {
                debug!(x, y, "Pointer outside the board ignored");
                ClickOutcome::Ignored
            }
        }
    }

    /// Handle a click on a board square
    pub fn click(&mut self, square: Square) -> ClickOutcome {
        if self.is_game_over() {
            debug!(%square, phase = ?self.status.phase, "Click ignored, game is over");
            return ClickOutcome::Ignored;
        }

        let outcome = match self.selection {
            Selection::Empty => {
                if self.owned_by_mover(square) {
                    self.selection = Selection::OneSelected(square);
                    ClickOutcome::Selected(square)
                } else {
                    ClickOutcome::Ignored
                }
            }
            Selection::OneSelected(selected) if selected == square => {
                self.selection = Selection::Empty;
                ClickOutcome::Deselected
            }
            Selection::OneSelected(selected) => {
                self.evaluate(MoveCandidate::new(selected, square))
            }
        };

        debug!(%square, ?outcome, selection = ?self.selection, "Board click handled");
        outcome
    }

    /// Apply a key command; both are accepted in every phase
    pub fn command(&mut self, command: Command) {
        match command {
            Command::Undo => {
                self.undo();
            }
            Command::Restart => self.restart(),
        }
    }

    /// Take back the most recent move without animating it
    pub fn undo(&mut self) -> Option<CommittedMove> {
        let undone = self.engine.undo();
        match &undone {
            Some(mv) => info!(notation = %notation(mv), "Move undone"),
            None => debug!("Nothing to undo"),
        }
        self.selection = Selection::Empty;
        self.pending_animation = None;
        self.refresh();
        undone
    }

    /// Return to the starting position and clear all controller state
    pub fn restart(&mut self) {
        self.engine = E::new_game();
        self.selection = Selection::Empty;
        self.pending_animation = None;
        self.refresh();
        info!("Game restarted");
    }

    fn evaluate(&mut self, candidate: MoveCandidate) -> ClickOutcome {
        let result = if self.legal_moves.contains(&candidate) {
            self.engine.try_commit(candidate)
        } else {
            Err(GameError::IllegalMove {
                from: candidate.from,
                to: candidate.to,
            })
        };

        match result {
            Ok(committed) => {
                // Engine already mutated; animation next, selection last
                self.pending_animation = Some(committed);
                self.selection = Selection::Empty;
                self.refresh();
                info!(
                    notation = %notation(&committed),
                    history = self.engine.history_len(),
                    "Move committed"
                );
                if let Some(winner) = self.status.winner() {
                    info!(%winner, "Checkmate");
                } else if self.is_game_over() {
                    info!("Stalemate");
                }
                ClickOutcome::Committed(committed)
            }
            Err(err) => {
                debug!(%err, "Candidate rejected");
                if self.owned_by_mover(candidate.to) {
                    self.selection = Selection::OneSelected(candidate.to);
                    ClickOutcome::Repicked(candidate.to)
                } else {
                    self.selection = Selection::Empty;
                    ClickOutcome::Rejected
                }
            }
        }
    }

    /// Re-derive legality data after the engine changed
    fn refresh(&mut self) {
        self.legal_moves = self.engine.legal_moves();
        self.status = self.engine.status();
    }

    fn owned_by_mover(&self, square: Square) -> bool {
        self.engine.board().is_owned_by(square, self.engine.side_to_move())
    }
}
