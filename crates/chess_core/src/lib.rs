//! Chess rules for the minimax engine: board state, FEN, legal move
//! generation with make/unmake, terminal detection and UCI notation.

pub mod board;
pub mod error;
pub mod movegen;
pub mod perft;
pub mod status;
pub mod types;
pub mod uci;

pub use board::*;
pub use error::{FenError, UciError};
pub use movegen::*;
pub use perft::perft;
pub use status::GameStatus;
pub use types::*;
pub use uci::*;

// =============================================================================
// Engine trait, implemented by anything that can pick a move for a position
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// The best move found (None at depth 0 or in a finished game)
    pub best_move: Option<Move>,
    /// Evaluation on the White-relative scale (positive favours White)
    pub score: i32,
    /// Depth searched in plies
    pub depth: u8,
    /// Number of positions visited
    pub nodes: u64,
}

/// Trait that all chess engines must implement.
pub trait Engine: Send {
    /// Search `pos` to `depth` plies. The caller's position is left untouched.
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult;

    /// Returns the engine's name for UCI identification
    fn name(&self) -> &str;

    /// Returns the engine's author for UCI identification
    fn author(&self) -> &str {
        "minimax-chess"
    }

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
