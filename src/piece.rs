use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank delta of a single forward step: White moves up the board, Black down.
    pub fn forward(self) -> i32 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank index the side's pawns start on (rank 2 / rank 7).
    pub fn home_rank(self) -> usize {
        match self {
            Color::White => 1,
            Color::Black => 6,
        }
    }

    /// Rank index that wins the game when a pawn arrives on it.
    pub fn far_rank(self) -> usize {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, Default)]
pub enum SquareContent {
    #[default]
    Empty,
    Pawn(Color),
}

impl SquareContent {
    pub fn is_empty(self) -> bool {
        self == SquareContent::Empty
    }

    pub fn color(self) -> Option<Color> {
        match self {
            SquareContent::Empty => None,
            SquareContent::Pawn(c) => Some(c),
        }
    }

    /// Three-character cell used by the console board.
    pub fn symbol(self) -> &'static str {
        match self {
            SquareContent::Empty => "   ",
            SquareContent::Pawn(Color::White) => " W ",
            SquareContent::Pawn(Color::Black) => " B ",
        }
    }
}
