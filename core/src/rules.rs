// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move generation and legality checks

use crate::{
    board::Board, engine::GameState, Color, CommittedMove, MoveKind, Piece, PieceKind, Square,
};

const KNIGHT_STEPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Check whether any piece of `by` attacks `target`
pub fn is_attacked(board: &Board, target: Square, by: Color) -> bool {
    let holds = |square: Option<Square>, kinds: &[PieceKind]| {
        matches!(
            square.and_then(|sq| board.get(sq)),
            Some(piece) if piece.color == by && kinds.contains(&piece.kind)
        )
    };

    // A pawn attacks diagonally forward, so look one row behind the target
    let behind = -by.pawn_direction();
    if holds(target.offset(behind, -1), &[PieceKind::Pawn])
        || holds(target.offset(behind, 1), &[PieceKind::Pawn])
    {
        return true;
    }

    if KNIGHT_STEPS
        .iter()
        .any(|&(dr, dc)| holds(target.offset(dr, dc), &[PieceKind::Knight]))
    {
        return true;
    }

    if KING_STEPS
        .iter()
        .any(|&(dr, dc)| holds(target.offset(dr, dc), &[PieceKind::King]))
    {
        return true;
    }

    let slider_hits = |directions: &[(i8, i8)], kinds: &[PieceKind]| {
        directions.iter().any(|&(dr, dc)| {
            let mut current = target.offset(dr, dc);
            while let Some(square) = current {
                if let Some(piece) = board.get(square) {
                    return piece.color == by && kinds.contains(&piece.kind);
                }
                current = square.offset(dr, dc);
            }
            false
        })
    };

    slider_hits(&ORTHOGONAL, &[PieceKind::Rook, PieceKind::Queen])
        || slider_hits(&DIAGONAL, &[PieceKind::Bishop, PieceKind::Queen])
}

/// All legal moves for the side to move
pub fn legal_moves(state: &GameState) -> Vec<CommittedMove> {
    let side = state.side_to_move();
    let king = state.king(side);
    pseudo_legal_moves(state)
        .into_iter()
        .filter(|mv| {
            let mut board = *state.board();
            apply_to_board(&mut board, mv);
            let king_square = if mv.piece.kind == PieceKind::King { mv.to } else { king };
            !is_attacked(&board, king_square, side.opposite())
        })
        .collect()
}

/// Moves that follow piece movement rules but may leave the king in check
fn pseudo_legal_moves(state: &GameState) -> Vec<CommittedMove> {
    let board = state.board();
    let side = state.side_to_move();
    let mut moves = Vec::with_capacity(64);

    for (from, piece) in board.pieces().filter(|(_, piece)| piece.color == side) {
        match piece.kind {
            PieceKind::Pawn => pawn_moves(state, from, piece, &mut moves),
            PieceKind::Knight => step_moves(board, from, piece, &KNIGHT_STEPS, &mut moves),
            PieceKind::Bishop => slide_moves(board, from, piece, &DIAGONAL, &mut moves),
            PieceKind::Rook => slide_moves(board, from, piece, &ORTHOGONAL, &mut moves),
            PieceKind::Queen => {
                slide_moves(board, from, piece, &ORTHOGONAL, &mut moves);
                slide_moves(board, from, piece, &DIAGONAL, &mut moves);
            }
            PieceKind::King => {
                step_moves(board, from, piece, &KING_STEPS, &mut moves);
                castle_moves(state, from, piece, &mut moves);
            }
        }
    }

    moves
}

fn plain(from: Square, to: Square, piece: Piece, captured: Option<Piece>) -> CommittedMove {
    CommittedMove {
        from,
        to,
        piece,
        captured,
        kind: MoveKind::Normal,
    }
}

fn pawn_moves(state: &GameState, from: Square, piece: Piece, moves: &mut Vec<CommittedMove>) {
    let board = state.board();
    let dir = piece.color.pawn_direction();
    let start_row = match piece.color {
        Color::White => 6,
        Color::Black => 1,
    };
    let promotion_row = piece.color.opposite().back_rank();

    let advance = |to: Square, captured: Option<Piece>| {
        let mut mv = plain(from, to, piece, captured);
        if to.row() == promotion_row {
            // A candidate carries no promotion choice, so pawns always queen
            mv.kind = MoveKind::Promotion(PieceKind::Queen);
        }
        mv
    };

    if let Some(one) = from.offset(dir, 0) {
        if board.get(one).is_none() {
            moves.push(advance(one, None));
            if from.row() == start_row {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.get(two).is_none() {
                        moves.push(CommittedMove {
                            kind: MoveKind::DoublePush,
                            ..plain(from, two, piece, None)
                        });
                    }
                }
            }
        }
    }

    for d_col in [-1, 1] {
        let Some(target) = from.offset(dir, d_col) else {
            continue;
        };
        match board.get(target) {
            Some(victim) if victim.color != piece.color => {
                moves.push(advance(target, Some(victim)))
            }
            Some(_) => {}
            None if state.en_passant() == Some(target) => {
                let victim_square = Square::new(from.row(), target.col());
                if let Some(victim) = board.get(victim_square) {
                    moves.push(CommittedMove {
                        kind: MoveKind::EnPassant,
                        ..plain(from, target, piece, Some(victim))
                    });
                }
            }
            None => {}
        }
    }
}

fn step_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    steps: &[(i8, i8)],
    moves: &mut Vec<CommittedMove>,
) {
    for &(dr, dc) in steps {
        let Some(to) = from.offset(dr, dc) else {
            continue;
        };
        match board.get(to) {
            Some(other) if other.color == piece.color => {}
            captured => moves.push(plain(from, to, piece, captured)),
        }
    }
}

fn slide_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    directions: &[(i8, i8)],
    moves: &mut Vec<CommittedMove>,
) {
    for &(dr, dc) in directions {
        let mut current = from.offset(dr, dc);
        while let Some(to) = current {
            match board.get(to) {
                None => moves.push(plain(from, to, piece, None)),
                Some(other) => {
                    if other.color != piece.color {
                        moves.push(plain(from, to, piece, Some(other)));
                    }
                    break;
                }
            }
            current = to.offset(dr, dc);
        }
    }
}

fn castle_moves(state: &GameState, from: Square, king: Piece, moves: &mut Vec<CommittedMove>) {
    let board = state.board();
    let rank = king.color.back_rank();
    let enemy = king.color.opposite();
    if from != Square::new(rank, 4) || is_attacked(board, from, enemy) {
        return;
    }

    let rook = Some(Piece::new(king.color, PieceKind::Rook));
    let empty = |cols: &[u8]| cols.iter().all(|&col| board.get(Square::new(rank, col)).is_none());
    let safe = |col: u8| !is_attacked(board, Square::new(rank, col), enemy);

    // The destination square itself is covered by the legality filter
    if state.castling().kingside(king.color)
        && board.get(Square::new(rank, 7)) == rook
        && empty(&[5, 6])
        && safe(5)
    {
        moves.push(CommittedMove {
            kind: MoveKind::Castle {
                rook_from: Square::new(rank, 7),
                rook_to: Square::new(rank, 5),
            },
            ..plain(from, Square::new(rank, 6), king, None)
        });
    }

    if state.castling().queenside(king.color)
        && board.get(Square::new(rank, 0)) == rook
        && empty(&[1, 2, 3])
        && safe(3)
    {
        moves.push(CommittedMove {
            kind: MoveKind::Castle {
                rook_from: Square::new(rank, 0),
                rook_to: Square::new(rank, 3),
            },
            ..plain(from, Square::new(rank, 2), king, None)
        });
    }
}

/// Apply the piece movement of `mv` to a board
pub(crate) fn apply_to_board(board: &mut Board, mv: &CommittedMove) {
    board.set(mv.from, None);
    board.set(mv.to, Some(mv.landed_piece()));
    match mv.kind {
        MoveKind::EnPassant => {
            if let Some(victim_square) = mv.capture_square() {
                board.set(victim_square, None);
            }
        }
        MoveKind::Castle { rook_from, rook_to } => {
            board.relocate(rook_from, rook_to);
        }
        _ => {}
    }
}

/// Reverse `apply_to_board` exactly
pub(crate) fn revert_on_board(board: &mut Board, mv: &CommittedMove) {
    board.set(mv.from, Some(mv.piece));
    match mv.kind {
        MoveKind::EnPassant => {
            board.set(mv.to, None);
            if let Some(victim_square) = mv.capture_square() {
                board.set(victim_square, mv.captured);
            }
        }
        MoveKind::Castle { rook_from, rook_to } => {
            board.set(mv.to, None);
            board.relocate(rook_to, rook_from);
        }
        _ => {
            board.set(mv.to, mv.captured);
        }
    }
}
