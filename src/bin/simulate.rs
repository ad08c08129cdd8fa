use std::io::Write;

use pawn_chess::engine::{pick_move_with, AiConfig, Weights};
use pawn_chess::game::{Game, GameState};
use pawn_chess::piece::Color;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_GAMES: usize = 20;
const MAX_MOVES: usize = 200;

#[derive(Debug, Default)]
struct MatchResult {
    white_wins: u32,
    black_wins: u32,
    stalemates: u32,
}

fn play_game(white_config: &AiConfig, black_config: &AiConfig, rng: &mut StdRng) -> GameState {
    let mut game = Game::new();
    while !game.is_over() && game.history().len() < MAX_MOVES {
        let config = match game.side_to_move() {
            Color::White => white_config,
            Color::Black => black_config,
        };
        match pick_move_with(&game, config, &mut || rng.gen::<f64>()) {
            Some(result) => {
                game.play(&result.mv);
            }
            None => break,
        }
    }
    game.state()
}

/// Plays `num_games` games with A as White, then the same number with B as
/// White, and reports the totals from A's point of view.
fn run_matchup(label_a: &str, config_a: &AiConfig, label_b: &str, config_b: &AiConfig, num_games: usize) -> MatchResult {
    let mut rng = StdRng::seed_from_u64(num_games as u64);
    let mut result = MatchResult::default();

    for _ in 0..num_games {
        match play_game(config_a, config_b, &mut rng) {
            GameState::WhiteWins => result.white_wins += 1,
            GameState::BlackWins => result.black_wins += 1,
            _ => result.stalemates += 1,
        }
    }
    for _ in 0..num_games {
        match play_game(config_b, config_a, &mut rng) {
            GameState::WhiteWins => result.black_wins += 1,
            GameState::BlackWins => result.white_wins += 1,
            _ => result.stalemates += 1,
        }
    }

    println!(
        "  {label_a} vs {label_b}: {label_a} wins {}, {label_b} wins {}, stalemates {} (out of {})",
        result.white_wins,
        result.black_wins,
        result.stalemates,
        num_games * 2
    );
    std::io::stdout().flush().ok();
    result
}

fn make_config(f: impl FnOnce(&mut Weights)) -> AiConfig {
    let mut c = AiConfig::new();
    c.depth = 1;
    f(&mut c.weights);
    c
}

fn main() {
    let num_games = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_GAMES);

    println!("=== Pawns-Only Chess simulation ({num_games} games per side) ===\n");

    let baseline = make_config(|_| {});
    let greedy = make_config(|w| {
        w.advance = 0.0;
        w.passed_pawn_base = 0.0;
        w.passed_pawn_quadratic = 0.0;
    });
    let runner = make_config(|w| {
        w.advance = 0.3;
        w.passed_pawn_quadratic = 0.4;
    });
    let mut random = AiConfig::new();
    random.depth = 1;
    random.material_module = false;
    random.advancement_module = false;
    random.passed_pawn_module = false;

    run_matchup("baseline", &baseline, "random", &random, num_games);
    run_matchup("baseline", &baseline, "greedy", &greedy, num_games);
    run_matchup("baseline", &baseline, "runner", &runner, num_games);
}
