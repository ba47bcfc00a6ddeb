use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::evaluation::{evaluate, Score, DRAW_SCORE, MATE_SCORE};
use crate::move_generator::{generate, GenType};
use crate::r#move::Move;

/// Hard ceiling on search depth, keeping the worst case bounded no matter
/// what a `go depth` request asks for
pub const MAX_DEPTH: i8 = 6;
pub const DEFAULT_DEPTH: i8 = 4;

const INFINITY: Score = MATE_SCORE + 1;

/// A fixed-depth negamax searcher with a skill dial. Skill maps to a search
/// depth and a noise window: the final move is drawn uniformly from all root
/// moves scoring within the window of the best one, which weakens play in a
/// human-looking way without flattening the search itself
pub struct Search {
    max_depth: i8,
    noise_window: Score,
    rng: StdRng,
}

impl Search {
    pub fn new() -> Search {
        let mut search = Search {
            max_depth: MAX_DEPTH,
            noise_window: 0,
            rng: StdRng::from_entropy(),
        };
        search.set_skill_level(20);
        search
    }

    /// Same as `new`, with a reproducible random source
    pub fn with_seed(seed: u64) -> Search {
        let mut search = Search {
            max_depth: MAX_DEPTH,
            noise_window: 0,
            rng: StdRng::seed_from_u64(seed),
        };
        search.set_skill_level(20);
        search
    }

    /// Maps a skill level (0..=20) onto a depth/noise pair. This is the sole
    /// difficulty lever: lower bands search shallower and accept moves
    /// further away from the best score
    pub fn set_skill_level(&mut self, skill: u8) {
        let (max_depth, noise_window) = match skill.min(20) {
            0..=3 => (1, 350),
            4..=7 => (2, 250),
            8..=11 => (3, 150),
            12..=15 => (4, 75),
            _ => (MAX_DEPTH, 0),
        };
        self.max_depth = max_depth;
        self.noise_window = noise_window;
    }

    pub fn max_depth(&self) -> i8 {
        self.max_depth
    }
    pub fn noise_window(&self) -> Score {
        self.noise_window
    }

    /// Searches every root move at `min(depth_limit, max_depth)` and picks
    /// from the near-best candidates. Returns `None` when the side to move
    /// has no legal moves (checkmate or stalemate; callers can tell the two
    /// apart through `Board::in_check`)
    pub fn best_move(&mut self, board: &mut Board, depth_limit: i8) -> Option<Move> {
        let depth = depth_limit.min(self.max_depth).max(1);
        let moves = generate(board, GenType::Legal);
        if moves.is_empty() {
            return None;
        }

        // Every root move gets a full window so that all scores stay
        // comparable for the candidate pool below
        let mut ranked: Vec<(Move, Score)> = Vec::with_capacity(moves.len());
        for mv in &moves {
            board.make(*mv);
            let score = -alpha_beta(board, depth - 1, -INFINITY, INFINITY, 1);
            board.unmake();
            ranked.push((*mv, score));
        }
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let threshold = ranked[0].1 - self.noise_window;
        let pool: Vec<Move> = ranked
            .iter()
            .filter(|(_, score)| *score >= threshold)
            .map(|(mv, _)| *mv)
            .collect();
        let pool = if pool.is_empty() {
            ranked.iter().map(|(mv, _)| *mv).collect()
        } else {
            pool
        };
        Some(pool[self.rng.gen_range(0..pool.len())])
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new()
    }
}

/// Negamax with alpha-beta pruning over the shared board; every `make` is
/// matched by an `unmake` before returning
pub fn alpha_beta(board: &mut Board, depth: i8, mut alpha: Score, beta: Score, ply: i8) -> Score {
    if depth <= 0 {
        return evaluate(board);
    }

    let moves = generate(board, GenType::Legal);
    if moves.is_empty() {
        // Preferring shallower plies makes faster mates score higher
        return if board.in_check(board.side_to_move()) {
            -MATE_SCORE + ply as Score
        } else {
            DRAW_SCORE
        };
    }

    let mut best_score = -INFINITY;
    for mv in moves.best_first_iter(&score_moves()) {
        board.make(*mv);
        let score = -alpha_beta(board, depth - 1, -beta, -alpha, ply + 1);
        board.unmake();

        if score > best_score {
            best_score = score;
        }
        if best_score > alpha {
            alpha = best_score;
        }
        if alpha >= beta {
            break;
        }
    }
    best_score
}

// Captures ahead of promotions ahead of quiet moves; no exchange
// evaluation, ordering only exists to sharpen the pruning
fn score_moves() -> impl Fn(&Move) -> Score {
    |m| {
        if m.is_capture() {
            2
        } else if m.is_promotion() {
            1
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Color;

    #[test]
    fn finds_scholars_mate() {
        let mut board = Board::new();
        for mv in ["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6"] {
            board.make_from_str(mv).unwrap();
        }
        // Zero noise window at full skill makes the pick deterministic
        let mut search = Search::with_seed(42);
        let best = search.best_move(&mut board, DEFAULT_DEPTH).unwrap();
        assert_eq!(best.to_string(), "h5f7");
    }

    #[test]
    fn stalemate_root_yields_no_move() {
        let mut board = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(generate(&mut board, GenType::Legal).len(), 0);
        assert!(!board.in_check(Color::Black));
        let mut search = Search::with_seed(0);
        assert_eq!(search.best_move(&mut board, DEFAULT_DEPTH), None);
    }

    #[test]
    fn checkmate_root_yields_no_move_and_check() {
        // Fool's mate
        let mut board = Board::new();
        for mv in ["f2f3", "e7e5", "g2g4", "d8h4"] {
            board.make_from_str(mv).unwrap();
        }
        assert!(board.in_check(Color::White));
        let mut search = Search::with_seed(0);
        assert_eq!(search.best_move(&mut board, DEFAULT_DEPTH), None);
    }

    #[test]
    fn skill_bands_tune_depth_and_noise() {
        let mut search = Search::with_seed(0);
        search.set_skill_level(0);
        assert_eq!((search.max_depth(), search.noise_window()), (1, 350));
        search.set_skill_level(9);
        assert_eq!((search.max_depth(), search.noise_window()), (3, 150));
        search.set_skill_level(20);
        assert_eq!((search.max_depth(), search.noise_window()), (MAX_DEPTH, 0));
        // Out-of-range input clamps into the top band
        search.set_skill_level(200);
        assert_eq!(search.max_depth(), MAX_DEPTH);
    }

    #[test]
    fn low_skill_still_returns_a_legal_move() {
        let mut board = Board::new();
        let mut search = Search::with_seed(7);
        search.set_skill_level(0);
        let best = search.best_move(&mut board, DEFAULT_DEPTH).unwrap();
        let legal = generate(&mut board, GenType::Legal);
        assert!(legal.contains(&best));
    }

    #[test]
    fn hanging_queen_is_taken() {
        // White to move with the black queen en prise on d5
        let mut board = Board::from_fen("4k3/8/8/3q4/8/3R4/8/4K3 w - - 0 1").unwrap();
        let mut search = Search::with_seed(3);
        let best = search.best_move(&mut board, 2).unwrap();
        assert_eq!(best.to_string(), "d3d5");
    }

    #[test]
    fn search_leaves_the_board_untouched() {
        let mut board = Board::new();
        let before = board.fen();
        let mut search = Search::with_seed(1);
        search.best_move(&mut board, DEFAULT_DEPTH);
        assert_eq!(board.fen(), before);
    }
}
