//! Minimax Chess Engine
//!
//! Fixed-depth minimax with alpha-beta pruning over a material evaluation.
//! The search is generic over [`GameRules`], so any two-player game that can
//! enumerate, apply and undo moves in place can be searched; chess positions
//! from `chess_core` implement it out of the box.

mod eval;
mod guard;
mod rules;
mod search;

use chess_core::{Engine, Position, SearchResult};
use tracing::debug;

pub use eval::{
    evaluate, piece_value, Evaluator, MaterialEvaluator, Score, DRAW_SCORE, MATE_SCORE,
};
pub use guard::Applied;
pub use rules::{GameRules, MaterialRules};
pub use search::{best_move, search, search_with, SearchOutcome, SCORE_INFINITY};

/// Chess engine searching a fixed number of plies for the side to move.
///
/// White maximizes and Black minimizes, so the reported score is always
/// White-relative.
#[derive(Debug, Clone, Default)]
pub struct MinimaxEngine {
    /// Node counter of the last search
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self { nodes: 0 }
    }

    /// Positions visited by the most recent search.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult {
        // Search a private copy so the caller's position is never touched.
        let mut scratch = pos.clone();
        let outcome = best_move(&mut scratch, depth);
        self.nodes = outcome.nodes;

        debug!(
            fen = %pos.to_fen(),
            depth,
            score = outcome.score,
            nodes = outcome.nodes,
            "engine search finished"
        );

        SearchResult {
            best_move: outcome.best_move,
            score: outcome.score,
            depth,
            nodes: outcome.nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
