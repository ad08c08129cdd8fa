use pawn_chess::engine::{pick_move_with, AiConfig};
use pawn_chess::game::{Game, Outcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const MAX_MOVES: usize = 200;
const DEFAULT_SEED: u64 = 42;

#[derive(Serialize)]
struct Transcript<'a> {
    seed: u64,
    moves: Vec<&'a str>,
    outcome: &'a Outcome,
    scores: (u8, u8),
}

/// Plays one seeded computer-vs-computer game and prints the transcript as
/// JSON. The same seed always produces the same output.
fn main() {
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut config = AiConfig::new();
    config.depth = 2;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();

    while !game.is_over() && game.history().len() < MAX_MOVES {
        match pick_move_with(&game, &config, &mut || rng.gen::<f64>()) {
            Some(result) => {
                game.play(&result.mv);
            }
            None => break,
        }
    }

    let transcript = Transcript {
        seed,
        moves: game.history().iter().map(|r| r.notation.as_str()).collect(),
        outcome: game.status(),
        scores: game.scores(),
    };
    match serde_json::to_string_pretty(&transcript) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("failed to encode transcript: {e}"),
    }
    eprintln!("Game over after {} moves: {}", game.history().len(), game.status());
}
