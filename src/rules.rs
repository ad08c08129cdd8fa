// =============================================================================
// Pawn move legality
//
// Each move shape is a pure predicate over the candidate move, the mover's
// color, the board and the previous history record. `classify` tries them in
// a fixed order and is the single source of truth for legality: both the
// game's `apply` and the stalemate scan go through it.
// =============================================================================

use crate::board::Board;
use crate::moves::{Coord, Move, MoveRecord, MoveShape};
use crate::piece::Color;

/// Initial two-square advance from the home rank over two empty squares.
pub fn is_double_step(mv: &Move, color: Color, board: &Board) -> bool {
    if mv.from.rank != color.home_rank() || mv.file_delta() != 0 || mv.rank_delta() != 2 * color.forward() {
        return false;
    }
    match mv.from.offset(0, color.forward()) {
        Some(between) => board.is_empty(between) && board.is_empty(mv.to),
        None => false,
    }
}

/// One square straight ahead onto an empty square.
pub fn is_step(mv: &Move, color: Color, board: &Board) -> bool {
    mv.file_delta() == 0 && mv.rank_delta() == color.forward() && board.is_empty(mv.to)
}

fn is_diagonal(mv: &Move, color: Color) -> bool {
    mv.file_delta().abs() == 1 && mv.rank_delta() == color.forward()
}

/// One square diagonally ahead onto an opposing pawn.
pub fn is_capture(mv: &Move, color: Color, board: &Board) -> bool {
    is_diagonal(mv, color) && board.holds_opponent_of(color, mv.to)
}

/// The square of the pawn an en passant capture removes: beside the mover,
/// on the destination's file.
pub fn passed_pawn_square(mv: &Move) -> Coord {
    Coord { file: mv.to.file, rank: mv.from.rank }
}

/// Diagonal move onto an empty square, taking an opposing pawn that double
/// stepped past on the immediately preceding move.
pub fn is_en_passant(mv: &Move, color: Color, board: &Board, last: Option<&MoveRecord>) -> bool {
    if !is_diagonal(mv, color) || !board.is_empty(mv.to) {
        return false;
    }
    let Some(last) = last else {
        return false;
    };
    let passed = passed_pawn_square(mv);
    last.color == color.opposite()
        && last.shape == MoveShape::DoubleStep
        && last.mv.to == passed
        && board.holds_opponent_of(color, passed)
}

/// Decide which shape, if any, makes `mv` legal for `color`.
/// The caller has already checked that `mv.from` holds a pawn of `color`.
pub fn classify(mv: &Move, color: Color, board: &Board, last: Option<&MoveRecord>) -> Option<MoveShape> {
    if is_double_step(mv, color, board) {
        Some(MoveShape::DoubleStep)
    } else if is_step(mv, color, board) {
        Some(MoveShape::Step)
    } else if is_capture(mv, color, board) {
        Some(MoveShape::Capture)
    } else if is_en_passant(mv, color, board, last) {
        Some(MoveShape::EnPassant)
    } else {
        None
    }
}

/// Every destination a pawn on `from` could reach by any of the four shapes:
/// the three forward-adjacent squares and the double-step square.
pub fn candidate_moves(from: Coord, color: Color) -> impl Iterator<Item = Move> {
    let fwd = color.forward();
    [(-1, fwd), (0, fwd), (1, fwd), (0, 2 * fwd)]
        .into_iter()
        .filter_map(move |(df, dr)| from.offset(df, dr).map(|to| Move::new(from, to)))
}

/// All legal moves for `color` in this position.
pub fn legal_moves(color: Color, board: &Board, last: Option<&MoveRecord>) -> Vec<Move> {
    board
        .pawns(color)
        .flat_map(|from| candidate_moves(from, color))
        .filter(|mv| classify(mv, color, board, last).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::SquareContent;

    fn sq(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    fn mv(s: &str) -> Move {
        Move::from_notation(s).unwrap()
    }

    fn board_with(white: &[&str], black: &[&str]) -> Board {
        let mut board = Board::empty();
        for s in white {
            board.set(sq(s), SquareContent::Pawn(Color::White));
        }
        for s in black {
            board.set(sq(s), SquareContent::Pawn(Color::Black));
        }
        board
    }

    #[test]
    fn double_step_only_from_home_rank() {
        let board = board_with(&["a2", "b3"], &["h7"]);
        assert!(is_double_step(&mv("a2a4"), Color::White, &board));
        assert!(!is_double_step(&mv("b3b5"), Color::White, &board));
        assert!(is_double_step(&mv("h7h5"), Color::Black, &board));
        // Wrong direction for black.
        assert!(!is_double_step(&mv("a2a4"), Color::Black, &board));
    }

    #[test]
    fn blocked_double_step_is_rejected() {
        let blocked_between = board_with(&["e2"], &["e3"]);
        assert_eq!(classify(&mv("e2e4"), Color::White, &blocked_between, None), None);

        let blocked_target = board_with(&["e2"], &["e4"]);
        assert_eq!(classify(&mv("e2e4"), Color::White, &blocked_target, None), None);
        // Single step still fine in that case.
        assert_eq!(classify(&mv("e2e3"), Color::White, &blocked_target, None), Some(MoveShape::Step));
    }

    #[test]
    fn step_needs_empty_destination_and_forward_direction() {
        let board = board_with(&["d4"], &["d5", "c6"]);
        assert!(!is_step(&mv("d4d5"), Color::White, &board));
        assert!(!is_step(&mv("d4d3"), Color::White, &board));
        assert!(is_step(&mv("c6c5"), Color::Black, &board));
        assert!(!is_step(&mv("c6c7"), Color::Black, &board));
    }

    #[test]
    fn capture_needs_opposing_pawn() {
        let board = board_with(&["d4", "e5"], &["c5"]);
        assert!(is_capture(&mv("d4c5"), Color::White, &board));
        assert!(!is_capture(&mv("d4e5"), Color::White, &board));
        assert!(!is_capture(&mv("d4e3"), Color::White, &board));
        assert!(is_capture(&mv("c5d4"), Color::Black, &board));
        assert_eq!(classify(&mv("d4e5"), Color::White, &board, None), None);
    }

    #[test]
    fn en_passant_requires_fresh_adjacent_double_step() {
        let board = board_with(&["e5"], &["d5"]);
        let fresh = MoveRecord::new(mv("d7d5"), Color::Black, MoveShape::DoubleStep);
        assert!(is_en_passant(&mv("e5d6"), Color::White, &board, Some(&fresh)));
        assert_eq!(
            classify(&mv("e5d6"), Color::White, &board, Some(&fresh)),
            Some(MoveShape::EnPassant)
        );

        // Same landing square reached by two single steps does not count.
        let single = MoveRecord::new(mv("d6d5"), Color::Black, MoveShape::Step);
        assert!(!is_en_passant(&mv("e5d6"), Color::White, &board, Some(&single)));

        // Wrong file: the double-stepped pawn is not on the destination file.
        assert!(!is_en_passant(&mv("e5f6"), Color::White, &board, Some(&fresh)));

        assert!(!is_en_passant(&mv("e5d6"), Color::White, &board, None));
    }

    #[test]
    fn en_passant_target_must_be_beside_the_mover() {
        // White pawn on d3 cannot take "en passant" into e4 after e7e5.
        let board = board_with(&["d3"], &["e5"]);
        let last = MoveRecord::new(mv("e7e5"), Color::Black, MoveShape::DoubleStep);
        assert!(!is_en_passant(&mv("d3e4"), Color::White, &board, Some(&last)));
    }

    #[test]
    fn candidates_cover_four_shapes_and_stay_on_board() {
        let from_home: Vec<String> = candidate_moves(sq("a2"), Color::White).map(|m| m.to_notation()).collect();
        assert_eq!(from_home, vec!["a2a3", "a2b3", "a2a4"]);

        let edge: Vec<String> = candidate_moves(sq("h2"), Color::Black).map(|m| m.to_notation()).collect();
        assert_eq!(edge, vec!["h2g1", "h2h1"]);
    }

    #[test]
    fn legal_moves_from_initial_position() {
        let board = Board::new();
        assert_eq!(legal_moves(Color::White, &board, None).len(), 16);
        assert_eq!(legal_moves(Color::Black, &board, None).len(), 16);
    }

    #[test]
    fn locked_pawns_have_no_moves() {
        let board = board_with(&["a4"], &["a5"]);
        assert!(legal_moves(Color::White, &board, None).is_empty());
        assert!(legal_moves(Color::Black, &board, None).is_empty());
    }
}
