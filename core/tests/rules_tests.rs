// SPDX-License-Identifier: MIT OR Apache-2.0

use chessview_core::{
    Color, GameError, GamePhase, GameState, MoveCandidate, MoveKind, Piece, PieceKind,
    RulesEngine, Square,
};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

fn perft(state: &mut GameState, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for candidate in state.legal_moves() {
        state
            .try_commit(candidate)
            .expect("listed candidate must commit");
        nodes += perft(state, depth - 1);
        state.undo().expect("history holds the move just made");
    }
    nodes
}

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).expect("valid square name")
}

fn mv(from: &str, to: &str) -> MoveCandidate {
    MoveCandidate::new(sq(from), sq(to))
}

#[test]
fn perft_from_start() {
    let mut game = GameState::new();
    assert_eq!(perft(&mut game, 1), 20);
    assert_eq!(perft(&mut game, 2), 400);
    assert_eq!(perft(&mut game, 3), 8902);
    assert_eq!(game, GameState::new(), "perft must leave the game untouched");
}

#[test]
fn perft_kiwipete() {
    let mut game = GameState::from_fen(KIWIPETE).unwrap();
    assert_eq!(perft(&mut game, 1), 48);
    assert_eq!(perft(&mut game, 2), 2039);
}

#[test]
fn perft_rook_endgame() {
    let mut game = GameState::from_fen(ENDGAME).unwrap();
    assert_eq!(perft(&mut game, 1), 14);
    assert_eq!(perft(&mut game, 2), 191);
}

#[test]
fn illegal_candidate_is_rejected_without_mutation() {
    let mut game = GameState::new();
    let before = game.clone();

    let result = game.try_commit(mv("e2", "e5"));
    assert_eq!(
        result,
        Err(GameError::IllegalMove {
            from: sq("e2"),
            to: sq("e5")
        })
    );
    assert_eq!(game, before);

    // Castling with pieces in the way
    assert!(game.try_commit(mv("e1", "g1")).is_err());
    assert_eq!(game, before);
}

#[test]
fn en_passant_capture_and_undo() {
    let mut game = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
    let before = game.clone();

    let committed = game.try_commit(mv("e5", "d6")).expect("en passant is legal");
    assert_eq!(committed.kind, MoveKind::EnPassant);
    assert_eq!(committed.captured, Some(Piece::new(Color::Black, PieceKind::Pawn)));
    assert_eq!(game.board().get(sq("d5")), None);
    assert_eq!(
        game.board().get(sq("d6")),
        Some(Piece::new(Color::White, PieceKind::Pawn))
    );

    game.undo();
    assert_eq!(game, before);
}

#[test]
fn en_passant_cannot_expose_king() {
    let game = GameState::from_fen("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1").unwrap();
    assert!(!game.legal_moves().contains(&mv("b5", "c6")));
}

#[test]
fn castling_rules() {
    let game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let moves = game.legal_moves();
    assert!(moves.contains(&mv("e1", "g1")));
    assert!(moves.contains(&mv("e1", "c1")));

    // A rook on f2 covers f1, so the king may not pass through it
    let guarded = GameState::from_fen("r3k2r/8/8/8/8/8/5r2/R3K2R w KQkq - 0 1").unwrap();
    let moves = guarded.legal_moves();
    assert!(!moves.contains(&mv("e1", "g1")));
    assert!(moves.contains(&mv("e1", "c1")));

    // No castling out of check
    let checked = GameState::from_fen("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1").unwrap();
    let moves = checked.legal_moves();
    assert!(!moves.contains(&mv("e1", "g1")));
    assert!(!moves.contains(&mv("e1", "c1")));
}

#[test]
fn castling_moves_rook_and_revokes_rights() {
    let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let before = game.clone();

    let committed = game.try_commit(mv("e1", "g1")).expect("short castle is legal");
    assert!(matches!(committed.kind, MoveKind::Castle { .. }));
    assert_eq!(
        game.board().get(sq("f1")),
        Some(Piece::new(Color::White, PieceKind::Rook))
    );
    assert_eq!(game.board().get(sq("h1")), None);
    assert_eq!(game.status().white_king, sq("g1"));
    assert!(!game.castling().kingside(Color::White));
    assert!(!game.castling().queenside(Color::White));
    assert!(game.castling().kingside(Color::Black));

    game.undo();
    assert_eq!(game, before);
    assert_eq!(game.status().white_king, sq("e1"));
}

#[test]
fn rook_move_revokes_one_side() {
    let mut game = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    game.try_commit(mv("h1", "h2")).unwrap();
    game.try_commit(mv("a8", "a7")).unwrap();
    assert!(!game.castling().kingside(Color::White));
    assert!(game.castling().queenside(Color::White));
    assert!(!game.castling().queenside(Color::Black));
    assert!(game.castling().kingside(Color::Black));
}

#[test]
fn promotion_always_queens() {
    let mut game = GameState::from_fen("8/4P3/8/8/8/8/8/k6K w - - 0 1").unwrap();
    let before = game.clone();

    let committed = game.try_commit(mv("e7", "e8")).expect("promotion push is legal");
    assert_eq!(committed.kind, MoveKind::Promotion(PieceKind::Queen));
    assert_eq!(
        game.board().get(sq("e8")),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );

    game.undo();
    assert_eq!(game, before);
}

#[test]
fn fools_mate_is_checkmate() {
    let mut game = GameState::new();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        game.try_commit(mv(from, to)).expect("scripted move is legal");
    }

    let status = game.status();
    assert_eq!(status.phase, GamePhase::Checkmate);
    assert!(status.in_check);
    assert_eq!(status.winner(), Some(Color::Black));
    assert_eq!(status.checked_king(), Some(sq("e1")));
    assert!(game.legal_moves().is_empty());
}

#[test]
fn stalemate_is_detected() {
    let game = GameState::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
    let status = game.status();
    assert_eq!(status.phase, GamePhase::Stalemate);
    assert!(!status.in_check);
    assert_eq!(status.winner(), None);
}

#[test]
fn pinned_piece_cannot_leave_the_line() {
    // Knight on e2 is pinned against the king by the rook on e8
    let game = GameState::from_fen("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    assert!(game
        .legal_moves()
        .iter()
        .all(|candidate| candidate.from != sq("e2")));
}

#[test]
fn commit_grows_history_and_undo_restores_exactly() {
    let mut game = GameState::from_fen(KIWIPETE).unwrap();
    for candidate in game.legal_moves() {
        let before = game.clone();
        let history = game.history_len();

        let committed = game.try_commit(candidate).unwrap();
        assert_eq!(game.history_len(), history + 1);
        assert_eq!(game.last_move(), Some(&committed));
        assert_eq!(game.side_to_move(), before.side_to_move().opposite());

        assert_eq!(game.undo(), Some(committed));
        assert_eq!(
            game,
            before,
            "undo after {} must restore the position",
            committed.candidate().from
        );
    }
}

#[test]
fn undo_on_empty_history_is_noop() {
    let mut game = GameState::new();
    assert_eq!(game.undo(), None);
    assert_eq!(game, GameState::new());
}

#[test]
fn opening_pawn_push_flips_side() {
    let mut game = GameState::new();
    game.try_commit(MoveCandidate::new(Square::new(6, 4), Square::new(4, 4)))
        .unwrap();
    assert_eq!(game.history_len(), 1);
    assert_eq!(game.side_to_move(), Color::Black);
    let status = game.status();
    assert_eq!(status.phase, GamePhase::Active);
    assert!(!status.in_check);
}
