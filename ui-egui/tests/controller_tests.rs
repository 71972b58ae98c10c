// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board controller behaviour against the standard rules engine

use std::cell::Cell;

use chessview_core::{
    Board, Color, CommittedMove, GameError, GamePhase, GameState, GameStatus, MoveCandidate,
    RulesEngine, Square,
};
use chessview_ui_egui::{BoardController, ClickOutcome, Command, Selection};

const SQUARE: f32 = 64.0;

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).expect("valid square name")
}

/// Click the middle of a square through the pixel path
fn press<E: RulesEngine>(controller: &mut BoardController<E>, square: Square) -> ClickOutcome {
    let x = f32::from(square.col()) * SQUARE + SQUARE / 2.0;
    let y = f32::from(square.row()) * SQUARE + SQUARE / 2.0;
    controller.pointer_down(x, y)
}

fn play<E: RulesEngine>(controller: &mut BoardController<E>, from: &str, to: &str) {
    press(controller, sq(from));
    let outcome = press(controller, sq(to));
    assert!(
        matches!(outcome, ClickOutcome::Committed(_)),
        "{}{} should commit, got {:?}",
        from,
        to,
        outcome
    );
}

fn fools_mate() -> BoardController {
    let mut controller = BoardController::new(SQUARE);
    play(&mut controller, "f2", "f3");
    play(&mut controller, "e7", "e5");
    play(&mut controller, "g2", "g4");
    play(&mut controller, "d8", "h4");
    controller
}

#[test]
fn selecting_own_piece_highlights_its_moves() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    assert_eq!(controller.selection(), Selection::Empty);

    let outcome = press(&mut controller, sq("e2"));
    assert_eq!(outcome, ClickOutcome::Selected(sq("e2")));
    assert_eq!(controller.selection(), Selection::OneSelected(sq("e2")));

    let mut targets = controller.highlight_set();
    targets.sort();
    let mut expected = vec![sq("e3"), sq("e4")];
    expected.sort();
    assert_eq!(targets, expected);
}

#[test]
fn empty_and_opponent_squares_do_not_select() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    assert_eq!(press(&mut controller, sq("e4")), ClickOutcome::Ignored);
    assert_eq!(press(&mut controller, sq("e7")), ClickOutcome::Ignored);
    assert_eq!(controller.selection(), Selection::Empty);
    assert!(controller.highlight_set().is_empty());
}

#[test]
fn same_square_twice_deselects() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    press(&mut controller, sq("g1"));
    assert_eq!(press(&mut controller, sq("g1")), ClickOutcome::Deselected);
    assert_eq!(controller.selection(), Selection::Empty);
    assert_eq!(controller.engine().history_len(), 0);
}

#[test]
fn same_square_twice_in_finished_game_stays_empty() {
    let mut controller = fools_mate();
    press(&mut controller, sq("e1"));
    press(&mut controller, sq("e1"));
    assert_eq!(controller.selection(), Selection::Empty);
}

#[test]
fn pawn_double_push_commits_and_flips_side() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    press(&mut controller, sq("e2"));
    let outcome = press(&mut controller, sq("e4"));

    let mv = match outcome {
        ClickOutcome::Committed(mv) => mv,
        other => panic!("expected a committed move, got {:?}", other),
    };
    assert_eq!((mv.from, mv.to), (Square::new(6, 4), Square::new(4, 4)));
    assert_eq!(controller.engine().history_len(), 1);
    assert_eq!(controller.engine().side_to_move(), Color::Black);
    assert_eq!(controller.selection(), Selection::Empty);

    let status = controller.status();
    assert_eq!(status.phase, GamePhase::Active);
    assert!(!status.in_check);
    assert_eq!(status.side_to_move, Color::Black);
}

#[test]
fn legal_moves_are_refreshed_after_commit() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    play(&mut controller, "e2", "e4");

    assert_eq!(controller.legal_moves(), controller.engine().legal_moves().as_slice());
    assert!(controller
        .legal_moves()
        .iter()
        .all(|candidate| controller.engine().board().is_owned_by(candidate.from, Color::Black)));
}

#[test]
fn commit_requests_exactly_one_animation() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    play(&mut controller, "g1", "f3");
    assert!(controller.has_pending_animation());

    let mv = controller.take_pending_animation().expect("animation pending");
    assert_eq!((mv.from, mv.to), (sq("g1"), sq("f3")));
    assert!(controller.take_pending_animation().is_none());
}

#[test]
fn vacated_square_click_is_ignored() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    play(&mut controller, "e2", "e4");
    assert_eq!(press(&mut controller, Square::new(6, 4)), ClickOutcome::Ignored);
    assert_eq!(controller.selection(), Selection::Empty);
}

#[test]
fn illegal_king_move_onto_own_piece_repicks() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    press(&mut controller, sq("e1"));
    let outcome = press(&mut controller, sq("g1"));
    assert_eq!(outcome, ClickOutcome::Repicked(sq("g1")));
    assert_eq!(controller.selection(), Selection::OneSelected(sq("g1")));
    assert_eq!(controller.engine().history_len(), 0);
    assert!(!controller.has_pending_animation());
}

#[test]
fn illegal_move_to_empty_square_clears_selection() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    press(&mut controller, sq("e1"));
    assert_eq!(press(&mut controller, sq("e3")), ClickOutcome::Rejected);
    assert_eq!(controller.selection(), Selection::Empty);
    assert_eq!(controller.engine(), &GameState::new());
}

#[test]
fn illegal_move_onto_opponent_piece_clears_selection() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    press(&mut controller, sq("e2"));
    assert_eq!(press(&mut controller, sq("e7")), ClickOutcome::Rejected);
    assert_eq!(controller.selection(), Selection::Empty);
}

#[test]
fn repick_depends_only_on_ownership_of_clicked_square() {
    // Black to move: clicking another black piece re-picks, a white one does not
    let mut controller = BoardController::<GameState>::new(SQUARE);
    play(&mut controller, "d2", "d4");

    press(&mut controller, sq("b8"));
    assert_eq!(press(&mut controller, sq("c7")), ClickOutcome::Repicked(sq("c7")));
    assert_eq!(press(&mut controller, sq("d4")), ClickOutcome::Rejected);
    assert_eq!(controller.selection(), Selection::Empty);
}

#[test]
fn pointer_outside_board_is_ignored() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    press(&mut controller, sq("e2"));
    assert_eq!(controller.pointer_down(-1.0, 100.0), ClickOutcome::Ignored);
    assert_eq!(controller.pointer_down(100.0, 8.0 * SQUARE), ClickOutcome::Ignored);
    assert_eq!(controller.selection(), Selection::OneSelected(sq("e2")));
}

#[test]
fn checkmate_freezes_board_input() {
    let mut controller = fools_mate();
    let status = controller.status();
    assert_eq!(status.phase, GamePhase::Checkmate);
    assert_eq!(status.winner(), Some(Color::Black));
    assert_eq!(status.checked_king(), Some(sq("e1")));

    let before = controller.engine().clone();
    for square in Square::all() {
        assert_eq!(controller.click(square), ClickOutcome::Ignored);
    }
    assert_eq!(controller.selection(), Selection::Empty);
    assert_eq!(controller.engine(), &before);
}

#[test]
fn stalemate_freezes_board_input() {
    let game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid FEN");
    let mut controller = BoardController::with_engine(game.clone(), SQUARE);
    assert_eq!(controller.status().phase, GamePhase::Stalemate);
    assert_eq!(press(&mut controller, sq("h8")), ClickOutcome::Ignored);
    assert_eq!(controller.engine(), &game);
}

#[test]
fn undo_after_mate_reactivates_game() {
    let mut controller = fools_mate();
    let undone = controller.undo().expect("a move to undo");
    assert_eq!((undone.from, undone.to), (sq("d8"), sq("h4")));
    assert_eq!(controller.status().phase, GamePhase::Active);
    assert!(!controller.has_pending_animation());
    assert_eq!(press(&mut controller, sq("d8")), ClickOutcome::Selected(sq("d8")));
}

#[test]
fn restart_is_accepted_after_mate() {
    let mut controller = fools_mate();
    controller.command(Command::Restart);
    assert_eq!(controller.engine(), &GameState::new());
    assert_eq!(controller.status().phase, GamePhase::Active);
    assert_eq!(controller.selection(), Selection::Empty);
    assert_eq!(controller.legal_moves().len(), 20);
}

#[test]
fn undo_on_empty_history_clears_selection_only() {
    let mut controller = BoardController::<GameState>::new(SQUARE);
    press(&mut controller, sq("b1"));
    assert!(controller.undo().is_none());
    assert_eq!(controller.selection(), Selection::Empty);
    assert_eq!(controller.engine(), &GameState::new());
}

#[test]
fn undo_round_trips_every_legal_move() {
    let positions = [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "4k3/1P6/8/8/8/8/6p1/4K3 b - - 0 1",
    ];

    for fen in positions {
        let start = GameState::from_fen(fen).expect("valid FEN");
        for candidate in start.legal_moves() {
            let mut controller = BoardController::with_engine(start.clone(), SQUARE);
            controller.click(candidate.from);
            assert!(matches!(
                controller.click(candidate.to),
                ClickOutcome::Committed(_)
            ));
            assert_eq!(controller.engine().history_len(), 1);

            controller.command(Command::Undo);
            assert_eq!(controller.engine(), &start, "undo of {:?} in {}", candidate, fen);
            assert_eq!(controller.legal_moves(), start.legal_moves().as_slice());
        }
    }
}

/// Engine wrapper counting how often legality is recomputed
struct CountingEngine {
    inner: GameState,
    legal_queries: Cell<usize>,
}

impl RulesEngine for CountingEngine {
    fn new_game() -> Self {
        Self {
            inner: GameState::new(),
            legal_queries: Cell::new(0),
        }
    }

    fn legal_moves(&self) -> Vec<MoveCandidate> {
        self.legal_queries.set(self.legal_queries.get() + 1);
        self.inner.legal_moves()
    }

    fn try_commit(&mut self, candidate: MoveCandidate) -> Result<CommittedMove, GameError> {
        self.inner.try_commit(candidate)
    }

    fn undo(&mut self) -> Option<CommittedMove> {
        self.inner.undo()
    }

    fn status(&self) -> GameStatus {
        self.inner.status()
    }

    fn board(&self) -> &Board {
        self.inner.board()
    }

    fn side_to_move(&self) -> Color {
        self.inner.side_to_move()
    }

    fn history_len(&self) -> usize {
        self.inner.history_len()
    }

    fn last_move(&self) -> Option<&CommittedMove> {
        self.inner.last_move()
    }
}

#[test]
fn legality_is_recomputed_once_per_mutation() {
    let mut controller = BoardController::<CountingEngine>::new(SQUARE);
    assert_eq!(controller.engine().legal_queries.get(), 1);

    press(&mut controller, sq("e2"));
    press(&mut controller, sq("e2"));
    assert_eq!(controller.engine().legal_queries.get(), 1);

    play(&mut controller, "e2", "e4");
    assert_eq!(controller.engine().legal_queries.get(), 2);

    controller.undo();
    assert_eq!(controller.engine().legal_queries.get(), 3);

    // Rejected candidates never touch the engine
    press(&mut controller, sq("e1"));
    press(&mut controller, sq("e3"));
    assert_eq!(controller.engine().legal_queries.get(), 3);
    assert_eq!(controller.engine().history_len(), 0);
}
