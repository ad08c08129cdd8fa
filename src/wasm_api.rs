use crate::engine::{pick_move, AiConfig};
use crate::game::{Game, Outcome};
use crate::moves::Move;
use crate::piece::{Color, SquareContent};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct MoveJson {
    from: String,
    to: String,
}

#[derive(Serialize)]
struct BoardState {
    /// `squares[rank][file]`: "W", "B" or null.
    squares: Vec<Vec<Option<String>>>,
    current_turn: String,
    game_over: bool,
    status: Outcome,
    message: String,
    white_score: u8,
    black_score: u8,
    legal_moves: Vec<MoveJson>,
    last_move: Option<String>,
}

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    board_state: Option<BoardState>,
    error: Option<String>,
}

fn color_to_string(c: Color) -> String {
    c.to_string()
}

fn move_json(m: &Move) -> MoveJson {
    MoveJson { from: m.from.to_string(), to: m.to.to_string() }
}

fn build_board_state(game: &Game) -> BoardState {
    let squares = game
        .board()
        .squares
        .iter()
        .map(|row| {
            row.iter()
                .map(|sq| match sq {
                    SquareContent::Empty => None,
                    SquareContent::Pawn(Color::White) => Some("W".to_string()),
                    SquareContent::Pawn(Color::Black) => Some("B".to_string()),
                })
                .collect()
        })
        .collect();

    let legal_moves = if game.is_over() {
        Vec::new()
    } else {
        game.legal_moves(game.side_to_move()).iter().map(move_json).collect()
    };
    let (white_score, black_score) = game.scores();

    BoardState {
        squares,
        current_turn: color_to_string(game.side_to_move()),
        game_over: game.is_over(),
        status: game.status().clone(),
        message: game.status().to_string(),
        white_score,
        black_score,
        legal_moves,
        last_move: game.last_move().map(|r| r.notation.clone()),
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub struct PawnGame {
    game: Game,
    ai_config: AiConfig,
    last_evals: u64,
}

#[wasm_bindgen]
impl PawnGame {
    #[wasm_bindgen(constructor)]
    pub fn new(white_name: String, black_name: String) -> PawnGame {
        PawnGame {
            game: Game::with_players(white_name, black_name),
            ai_config: AiConfig::new(),
            last_evals: 0,
        }
    }

    pub fn set_depth(&mut self, depth: u32) {
        self.ai_config.depth = depth.clamp(1, 3);
    }

    pub fn get_state(&self) -> JsValue {
        to_js(&build_board_state(&self.game))
    }

    /// Play a move in four-character notation, e.g. "e2e4".
    pub fn make_move(&mut self, notation: &str) -> JsValue {
        if self.game.is_over() {
            return to_js(&MoveResult {
                board_state: None,
                error: Some("Game is already over".to_string()),
            });
        }
        let outcome = self.game.apply(notation);
        if outcome.is_rejection() {
            to_js(&MoveResult { board_state: None, error: Some(outcome.to_string()) })
        } else {
            to_js(&MoveResult { board_state: Some(build_board_state(&self.game)), error: None })
        }
    }

    pub fn make_ai_move(&mut self) -> JsValue {
        if let Some(result) = pick_move(&self.game, &self.ai_config) {
            self.last_evals = result.evals;
            self.game.play(&result.mv);
        }
        to_js(&build_board_state(&self.game))
    }

    pub fn get_hint(&self, depth: u32) -> JsValue {
        let mut hint_config = self.ai_config.clone();
        hint_config.depth = depth.clamp(1, 3);
        match pick_move(&self.game, &hint_config) {
            Some(result) => to_js(&move_json(&result.mv)),
            None => JsValue::NULL,
        }
    }

    pub fn get_last_evals(&self) -> u64 {
        self.last_evals
    }
}
