// =============================================================================
// Computer opponent
//
// Negamax search with alpha-beta pruning over `Game` clones. Captures are
// searched first so alpha-beta prunes well. The evaluation is modular: each
// aspect of the position (material, advancement, passed pawns) is scored
// independently and can be toggled via AiConfig.
//
// Positional modules score from White's perspective; evaluate() flips for
// the AI's color. Terminal states are scored from the game result directly.
// =============================================================================

use crate::game::{Game, GameState};
use crate::moves::Move;
use crate::piece::{Color, SquareContent};

/// Platform-appropriate random number in [0, 1).
/// Uses js_sys::Math::random() in WASM builds, rand crate natively.
fn random_f64() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Tunable weights for the evaluation modules.
#[derive(Clone, Debug)]
pub struct Weights {
    /// Value of one capture. Eight captures end the game, so this dominates.
    pub capture: f64,
    /// Bonus per rank a pawn has advanced from its home rank.
    pub advance: f64,
    /// Base bonus for a passed pawn (no enemy pawns ahead on same or adjacent files).
    pub passed_pawn_base: f64,
    /// Additional bonus scaled by advancement². A passed pawn close to the
    /// far rank is nearly a won game.
    pub passed_pawn_quadratic: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Weights {
            capture: 1.0,
            advance: 0.05,
            passed_pawn_base: 0.2,
            passed_pawn_quadratic: 0.15,
        }
    }
}

/// Controls which evaluation modules are active and the search depth.
#[derive(Clone, Debug)]
pub struct AiConfig {
    /// Capture-count difference between the two sides.
    pub material_module: bool,
    /// Linear reward for pushing pawns forward.
    pub advancement_module: bool,
    /// Reward passed pawns, growing as they near the far rank.
    pub passed_pawn_module: bool,
    /// Search depth in full moves (1–3). Internally converted to plies (depth×2).
    pub depth: u32,
    pub weights: Weights,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AiConfig {
    pub fn new() -> Self {
        AiConfig {
            material_module: true,
            advancement_module: true,
            passed_pawn_module: true,
            depth: 2,
            weights: Weights::default(),
        }
    }
}

/// Score for a decided game, before adjusting for search depth.
const WIN_SCORE: f64 = 10000.0;

/// A move paired with its minimax score, used during move selection.
struct ScoredMove {
    mv: Move,
    score: f64,
}

/// The result of a move search, including the chosen move and the number of
/// static evaluations performed during the search.
pub struct PickResult {
    pub mv: Move,
    pub evals: u64,
}

// =============================================================================
// Evaluation
// =============================================================================

/// Evaluate the game from `ai_color`'s perspective by summing all enabled
/// modules. A finished game scores ±WIN_SCORE for a win/loss and 0 for a
/// stalemate regardless of the modules.
pub fn evaluate(game: &Game, ai_color: Color, config: &AiConfig) -> f64 {
    match game.state() {
        GameState::Stalemate => return 0.0,
        GameState::WhiteWins | GameState::BlackWins => {
            return if game.winner() == Some(ai_color) { WIN_SCORE } else { -WIN_SCORE };
        }
        GameState::InProgress => {}
    }

    let mut score = 0.0;
    if config.material_module {
        score += eval_material(game, &config.weights);
    }
    if config.advancement_module {
        score += eval_advancement(game, &config.weights);
    }
    if config.passed_pawn_module {
        score += eval_passed_pawns(game, &config.weights);
    }

    if ai_color == Color::Black {
        -score
    } else {
        score
    }
}

fn eval_material(game: &Game, w: &Weights) -> f64 {
    let (white, black) = game.scores();
    (white as f64 - black as f64) * w.capture
}

/// Ranks travelled from the home rank: 0 on the home rank, 5 one step from
/// the far rank.
fn advancement(rank: usize, color: Color) -> f64 {
    match color {
        Color::White => rank as f64 - 1.0,
        Color::Black => 6.0 - rank as f64,
    }
}

fn eval_advancement(game: &Game, w: &Weights) -> f64 {
    let board = game.board();
    let white: f64 = board.pawns(Color::White).map(|c| advancement(c.rank, Color::White)).sum();
    let black: f64 = board.pawns(Color::Black).map(|c| advancement(c.rank, Color::Black)).sum();
    (white - black) * w.advance
}

/// Check whether a pawn is "passed" - no enemy pawns ahead of it on the
/// same file or adjacent files.
fn is_passed_pawn(game: &Game, rank: usize, file: usize, color: Color) -> bool {
    let enemy = SquareContent::Pawn(color.opposite());
    let squares = &game.board().squares;
    let mut r = rank as i32 + color.forward();
    while (0..8).contains(&r) {
        for df in -1i32..=1 {
            let f = file as i32 + df;
            if (0..8).contains(&f) && squares[r as usize][f as usize] == enemy {
                return false;
            }
        }
        r += color.forward();
    }
    true
}

fn eval_passed_pawns(game: &Game, w: &Weights) -> f64 {
    let mut score = 0.0;
    for color in [Color::White, Color::Black] {
        let s = if color == Color::White { 1.0 } else { -1.0 };
        for c in game.board().pawns(color) {
            if is_passed_pawn(game, c.rank, c.file, color) {
                let adv = advancement(c.rank, color);
                score += s * (w.passed_pawn_base + adv * adv * w.passed_pawn_quadratic);
            }
        }
    }
    score
}

// =============================================================================
// Move ordering
// =============================================================================

/// Captures (including en passant) first, then moves that land closer to
/// the far rank.
fn move_priority(game: &Game, mv: &Move) -> i32 {
    let color = game.side_to_move();
    let mut score = advancement(mv.to.rank, color) as i32;
    if game.classify(mv).map(|s| s.is_capture()).unwrap_or(false) {
        score += 100;
    }
    score
}

fn order_moves(game: &Game, moves: &mut [Move]) {
    moves.sort_by_key(|mv| std::cmp::Reverse(move_priority(game, mv)));
}

// =============================================================================
// Search - Negamax with alpha-beta pruning
// =============================================================================

/// Scores are from the side to move's perspective. Wins found sooner score
/// higher than wins found later, so the AI does not dawdle.
fn negamax(game: &Game, depth: u32, mut alpha: f64, beta: f64, config: &AiConfig, evals: &mut u64) -> f64 {
    if game.is_over() {
        *evals += 1;
        // The side to move is not flipped on a terminal move, so score from
        // the player who would move next.
        let next = game.side_to_move().opposite();
        // Remaining depth rewards faster wins and slower losses.
        let score = evaluate(game, next, config);
        return if score == 0.0 { score } else { score + score.signum() * depth as f64 };
    }
    if depth == 0 {
        *evals += 1;
        return evaluate(game, game.side_to_move(), config);
    }

    let mut legal_moves = game.legal_moves(game.side_to_move());
    order_moves(game, &mut legal_moves);

    let mut best = f64::NEG_INFINITY;
    for mv in &legal_moves {
        let mut clone = game.clone();
        clone.play(mv);
        let score = -negamax(&clone, depth - 1, -beta, -alpha, config, evals);
        best = best.max(score);
        alpha = alpha.max(score);
        if alpha >= beta {
            break;
        }
    }
    best
}

// =============================================================================
// Move selection
// =============================================================================

fn score_moves(game: &Game, legal_moves: &[Move], plies: u32, config: &AiConfig) -> (Vec<ScoredMove>, u64) {
    let mut evals: u64 = 0;
    let scored = legal_moves
        .iter()
        .map(|mv| {
            let mut clone = game.clone();
            clone.play(mv);
            let score = -negamax(&clone, plies - 1, f64::NEG_INFINITY, f64::INFINITY, config, &mut evals);
            ScoredMove { mv: *mv, score }
        })
        .collect();
    (scored, evals)
}

/// Pick the best move for the side to move, breaking ties at random.
pub fn pick_move(game: &Game, config: &AiConfig) -> Option<PickResult> {
    pick_move_with(game, config, &mut random_f64)
}

/// Like [`pick_move`] but with an explicit source of numbers in [0, 1), so
/// seeded games are reproducible.
///
/// Depth is specified in full moves (depth=2 means 4 plies). The first ply is
/// consumed by applying each candidate move.
pub fn pick_move_with(game: &Game, config: &AiConfig, random: &mut dyn FnMut() -> f64) -> Option<PickResult> {
    if game.is_over() {
        return None;
    }
    let mut legal_moves = game.legal_moves(game.side_to_move());
    if legal_moves.is_empty() {
        return None;
    }
    order_moves(game, &mut legal_moves);

    let plies = config.depth.clamp(1, 3) * 2;
    let (scored, evals) = score_moves(game, &legal_moves, plies, config);

    let max_score = scored.iter().map(|s| s.score).fold(f64::NEG_INFINITY, f64::max);
    let best: Vec<&ScoredMove> = scored.iter().filter(|s| (s.score - max_score).abs() < 0.001).collect();

    let index = (random() * best.len() as f64) as usize;
    Some(PickResult { mv: best[index.min(best.len() - 1)].mv, evals })
}
