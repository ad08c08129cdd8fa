use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::moves::{Coord, Move, MoveRecord, MoveShape};
use crate::piece::{Color, SquareContent};
use crate::rules;

/// Captures needed to win: every opposing pawn.
pub const CAPTURES_TO_WIN: u8 = 8;

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub score: u8,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Player { name: name.into(), score: 0 }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    WhiteWins,
    BlackWins,
    Stalemate,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::InProgress
    }

    fn win_for(color: Color) -> GameState {
        match color {
            Color::White => GameState::WhiteWins,
            Color::Black => GameState::BlackWins,
        }
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    WinByRank,
    WinByCapture,
    Stalemate,
}

/// Result of a call to [`Game::apply`]. Rejections are ordinary values.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// No move has been applied yet.
    InProgress,
    Applied,
    IllegalInput { input: String },
    NoPawnAtSource { color: Color, square: Coord },
    IllegalMove { mv: Move },
    GameOver { reason: GameOverReason, winner: Option<Color> },
}

impl Outcome {
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Outcome::IllegalInput { .. } | Outcome::NoPawnAtSource { .. } | Outcome::IllegalMove { .. }
        )
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "In progress"),
            Outcome::Applied => write!(f, "Move applied"),
            Outcome::IllegalInput { input } => write!(f, "Invalid Input: {input:?}"),
            Outcome::NoPawnAtSource { color, square } => write!(f, "No {} pawn at {square}", color.name()),
            Outcome::IllegalMove { mv } => write!(f, "Illegal move {mv}"),
            Outcome::GameOver { winner: Some(color), .. } => write!(f, "{color} Wins!"),
            Outcome::GameOver { winner: None, .. } => write!(f, "Stalemate!"),
        }
    }
}

/// One pawns-only game from the initial setup to a terminal state.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    white: Player,
    black: Player,
    history: Vec<MoveRecord>,
    state: GameState,
    status: Outcome,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::with_players("White", "Black")
    }

    pub fn with_players(white: impl Into<String>, black: impl Into<String>) -> Self {
        Self::from_position(Board::new(), Color::White, Player::new(white), Player::new(black))
    }

    /// Start from an arbitrary position. Useful for setting up test positions.
    pub fn from_position(board: Board, side_to_move: Color, white: Player, black: Player) -> Self {
        Game {
            board,
            side_to_move,
            white,
            black,
            history: Vec::new(),
            state: GameState::InProgress,
            status: Outcome::InProgress,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn square_content(&self, coord: Coord) -> SquareContent {
        self.board.get(coord)
    }

    /// (white, black) capture counts.
    pub fn scores(&self) -> (u8, u8) {
        (self.white.score, self.black.score)
    }

    /// Outcome of the last move that changed the game, or `InProgress`
    /// before the first one. Rejected moves leave it untouched.
    pub fn status(&self) -> &Outcome {
        &self.status
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn winner(&self) -> Option<Color> {
        match self.state {
            GameState::WhiteWins => Some(Color::White),
            GameState::BlackWins => Some(Color::Black),
            _ => None,
        }
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    fn player_mut(&mut self, color: Color) -> &mut Player {
        match color {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }

    /// Legal moves for `color` as if it were that side's turn now.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        rules::legal_moves(color, &self.board, self.last_move())
    }

    /// Which shape would make `mv` legal for the side to move, if any.
    pub fn classify(&self, mv: &Move) -> Option<MoveShape> {
        rules::classify(mv, self.side_to_move, &self.board, self.last_move())
    }

    /// Validate and play a move given in four-character notation.
    pub fn apply(&mut self, notation: &str) -> Outcome {
        if self.is_over() {
            return self.status.clone();
        }
        match Move::from_notation(notation) {
            Some(mv) => self.play(&mv),
            None => Outcome::IllegalInput { input: notation.to_string() },
        }
    }

    /// Validate and play an already-parsed move.
    pub fn play(&mut self, mv: &Move) -> Outcome {
        if self.is_over() {
            return self.status.clone();
        }

        let color = self.side_to_move;
        if self.board.get(mv.from) != SquareContent::Pawn(color) {
            return Outcome::NoPawnAtSource { color, square: mv.from };
        }

        let Some(shape) = self.classify(mv) else {
            return Outcome::IllegalMove { mv: *mv };
        };

        self.board.set(mv.from, SquareContent::Empty);
        if shape == MoveShape::EnPassant {
            self.board.set(rules::passed_pawn_square(mv), SquareContent::Empty);
        }
        if shape.is_capture() {
            let player = self.player_mut(color);
            player.score = (player.score + 1).min(CAPTURES_TO_WIN);
        }
        self.board.set(mv.to, SquareContent::Pawn(color));
        self.history.push(MoveRecord::new(*mv, color, shape));

        self.status = self.evaluate_terminal(color, mv);
        if let Outcome::GameOver { reason, winner } = &self.status {
            self.state = match (*reason, *winner) {
                (GameOverReason::Stalemate, _) | (_, None) => GameState::Stalemate,
                (_, Some(w)) => GameState::win_for(w),
            };
        } else {
            self.side_to_move = color.opposite();
        }
        self.status.clone()
    }

    /// Wins are checked before stalemate: a move that both wins and leaves
    /// the opponent without moves is reported as a win.
    fn evaluate_terminal(&self, mover: Color, mv: &Move) -> Outcome {
        if self.player(mover).score >= CAPTURES_TO_WIN {
            return Outcome::GameOver { reason: GameOverReason::WinByCapture, winner: Some(mover) };
        }
        if mv.to.rank == mover.far_rank() {
            return Outcome::GameOver { reason: GameOverReason::WinByRank, winner: Some(mover) };
        }
        if self.legal_moves(mover.opposite()).is_empty() {
            return Outcome::GameOver { reason: GameOverReason::Stalemate, winner: None };
        }
        Outcome::Applied
    }
}
