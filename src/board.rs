use std::fmt;

use serde::{Deserialize, Serialize};

use crate::moves::Coord;
use crate::piece::{Color, SquareContent};

/// The 8×8 grid. Indexed `squares[rank][file]`, rank 0 = rank 1.
/// Knows nothing about the rules; the game decides what goes where.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Board {
    pub squares: [[SquareContent; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pawns. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board { squares: [[SquareContent::Empty; 8]; 8] }
    }

    pub fn new() -> Self {
        let mut board = Self::empty();
        for color in [Color::White, Color::Black] {
            for sq in &mut board.squares[color.home_rank()] {
                *sq = SquareContent::Pawn(color);
            }
        }
        board
    }

    fn check_bounds(coord: Coord) {
        assert!(
            coord.file < 8 && coord.rank < 8,
            "coordinate out of range: file {} rank {}",
            coord.file,
            coord.rank
        );
    }

    pub fn get(&self, coord: Coord) -> SquareContent {
        Self::check_bounds(coord);
        self.squares[coord.rank][coord.file]
    }

    pub fn set(&mut self, coord: Coord, content: SquareContent) {
        Self::check_bounds(coord);
        self.squares[coord.rank][coord.file] = content;
    }

    pub fn is_empty(&self, coord: Coord) -> bool {
        self.get(coord).is_empty()
    }

    /// True when `coord` holds a pawn of the side opposing `color`.
    pub fn holds_opponent_of(&self, color: Color, coord: Coord) -> bool {
        self.get(coord) == SquareContent::Pawn(color.opposite())
    }

    /// All squares holding a pawn of `color`, rank by rank from a1.
    pub fn pawns(&self, color: Color) -> impl Iterator<Item = Coord> + '_ {
        (0..8usize).flat_map(move |rank| {
            (0..8usize).filter_map(move |file| {
                (self.squares[rank][file] == SquareContent::Pawn(color))
                    .then_some(Coord { file, rank })
            })
        })
    }

    pub fn count(&self, color: Color) -> usize {
        self.pawns(color).count()
    }
}

/// Console rendering, rank 8 at the top.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fill = "  +---+---+---+---+---+---+---+---+";
        for rank in (0..8).rev() {
            writeln!(f, "{fill}")?;
            write!(f, "{} |", rank + 1)?;
            for file in 0..8 {
                write!(f, "{}|", self.squares[rank][file].symbol())?;
            }
            writeln!(f)?;
        }
        writeln!(f, "{fill}")?;
        write!(f, "    a   b   c   d   e   f   g   h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Coord {
        Coord::from_algebraic(s).unwrap()
    }

    #[test]
    fn initial_setup_has_two_rows_of_pawns() {
        let board = Board::new();
        assert_eq!(board.get(sq("a2")), SquareContent::Pawn(Color::White));
        assert_eq!(board.get(sq("h7")), SquareContent::Pawn(Color::Black));
        assert!(board.is_empty(sq("e4")));
        assert!(board.is_empty(sq("e1")));
        assert_eq!(board.count(Color::White), 8);
        assert_eq!(board.count(Color::Black), 8);
        assert!(board.pawns(Color::White).all(|c| c.rank == 1));
    }

    #[test]
    fn set_overwrites_unconditionally() {
        let mut board = Board::new();
        board.set(sq("a2"), SquareContent::Pawn(Color::Black));
        assert!(board.holds_opponent_of(Color::White, sq("a2")));
        assert!(!board.holds_opponent_of(Color::Black, sq("a2")));
        board.set(sq("a2"), SquareContent::Empty);
        assert!(board.is_empty(sq("a2")));
        assert!(!board.holds_opponent_of(Color::White, sq("a2")));
    }

    #[test]
    #[should_panic(expected = "coordinate out of range")]
    fn out_of_range_access_panics() {
        let board = Board::empty();
        board.get(Coord { file: 8, rank: 0 });
    }

    #[test]
    fn renders_console_board() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 18);
        assert_eq!(lines[0], "  +---+---+---+---+---+---+---+---+");
        assert_eq!(lines[1], "8 |   |   |   |   |   |   |   |   |");
        assert_eq!(lines[3], "7 | B | B | B | B | B | B | B | B |");
        assert_eq!(lines[13], "2 | W | W | W | W | W | W | W | W |");
        assert_eq!(lines[17], "    a   b   c   d   e   f   g   h");
    }
}
