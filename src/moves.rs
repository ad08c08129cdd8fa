use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::Color;

/// A square on the board. File 0 = 'a', rank 0 = '1'.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Coord {
    pub file: usize,
    pub rank: usize,
}

impl Coord {
    pub fn new(file: usize, rank: usize) -> Option<Coord> {
        if file < 8 && rank < 8 {
            Some(Coord { file, rank })
        } else {
            None
        }
    }

    /// Step by a signed file/rank delta, staying on the board.
    pub fn offset(self, df: i32, dr: i32) -> Option<Coord> {
        let file = self.file as i32 + df;
        let rank = self.rank as i32 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Coord { file: file as usize, rank: rank as usize })
        } else {
            None
        }
    }

    /// Parse two characters such as "e4".
    pub fn from_algebraic(s: &str) -> Option<Coord> {
        match s.as_bytes() {
            [f @ b'a'..=b'h', r @ b'1'..=b'8'] => Some(Coord {
                file: (f - b'a') as usize,
                rank: (r - b'1') as usize,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file as u8) as char;
        let rank = (b'1' + self.rank as u8) as char;
        write!(f, "{file}{rank}")
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub fn new(from: Coord, to: Coord) -> Move {
        Move { from, to }
    }

    /// Parse the four-character notation `<file><rank><file><rank>`, e.g. "a2a4".
    /// Anything else, including surrounding whitespace, is rejected.
    pub fn from_notation(s: &str) -> Option<Move> {
        if s.len() != 4 || !s.is_ascii() {
            return None;
        }
        let from = Coord::from_algebraic(&s[..2])?;
        let to = Coord::from_algebraic(&s[2..])?;
        Some(Move { from, to })
    }

    pub fn to_notation(&self) -> String {
        format!("{}{}", self.from, self.to)
    }

    pub fn file_delta(&self) -> i32 {
        self.to.file as i32 - self.from.file as i32
    }

    pub fn rank_delta(&self) -> i32 {
        self.to.rank as i32 - self.from.rank as i32
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// The four ways a pawn may legally move.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum MoveShape {
    DoubleStep,
    Step,
    Capture,
    EnPassant,
}

impl MoveShape {
    pub fn is_capture(self) -> bool {
        matches!(self, MoveShape::Capture | MoveShape::EnPassant)
    }
}

/// An executed move as kept in the game history.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub notation: String,
    pub mv: Move,
    pub color: Color,
    pub shape: MoveShape,
}

impl MoveRecord {
    pub fn new(mv: Move, color: Color, shape: MoveShape) -> MoveRecord {
        MoveRecord { notation: mv.to_notation(), mv, color, shape }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_notation_into_coordinates() {
        let m = Move::from_notation("a2a4").expect("valid notation");
        assert_eq!(m.from, Coord { file: 0, rank: 1 });
        assert_eq!(m.to, Coord { file: 0, rank: 3 });
        assert_eq!(m.rank_delta(), 2);
        assert_eq!(m.file_delta(), 0);

        let m = Move::from_notation("h7g6").expect("valid notation");
        assert_eq!(m.from, Coord { file: 7, rank: 6 });
        assert_eq!(m.to, Coord { file: 6, rank: 5 });
        assert_eq!(m.to_notation(), "h7g6");
    }

    #[test]
    fn rejects_malformed_notation() {
        for bad in ["", "a2a", "a2a44", "i2i4", "a0a1", "a9a8", "A2A4", "a2 a4", " a2a4", "exit", "2a4a", "ä2a4"] {
            assert!(Move::from_notation(bad).is_none(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn same_square_is_syntactically_valid() {
        // Rejected later by the legality check, not by the parser.
        assert!(Move::from_notation("e2e2").is_some());
    }

    #[test]
    fn offset_stays_on_board() {
        let a1 = Coord::new(0, 0).unwrap();
        assert_eq!(a1.offset(-1, 1), None);
        assert_eq!(a1.offset(1, 1), Coord::new(1, 1));
        assert_eq!(Coord::new(7, 7).unwrap().offset(0, 1), None);
        assert_eq!(Coord::new(8, 0), None);
    }
}
