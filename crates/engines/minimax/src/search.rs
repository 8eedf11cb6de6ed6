//! Minimax search with alpha-beta pruning

use chess_core::Color;
use tracing::{debug, trace, warn};

use crate::eval::{Evaluator, MaterialEvaluator, Score};
use crate::guard::Applied;
use crate::rules::{GameRules, MaterialRules};

/// Stands in for an unbounded score. Its negation is representable.
pub const SCORE_INFINITY: Score = Score::MAX;

/// What a search returns to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome<M> {
    /// Minimax value of the root on the evaluator's scale
    pub score: Score,
    /// Move reaching `score`; None at depth 0 or at a terminal root
    pub best_move: Option<M>,
    /// Positions visited, root included
    pub nodes: u64,
}

/// Searches `pos` with the material evaluator.
///
/// White is the maximizing side by convention; `maximizing` says whether the
/// side to move at the root maximizes. Open bounds are
/// `(-SCORE_INFINITY, SCORE_INFINITY)`.
pub fn search<P: MaterialRules>(
    pos: &mut P,
    depth: u8,
    alpha: Score,
    beta: Score,
    maximizing: bool,
) -> SearchOutcome<P::Move> {
    search_with(pos, &MaterialEvaluator, depth, alpha, beta, maximizing)
}

/// Searches for the side to move with open bounds.
pub fn best_move<P: MaterialRules>(pos: &mut P, depth: u8) -> SearchOutcome<P::Move> {
    let maximizing = pos.side_to_move() == Color::White;
    search(pos, depth, -SCORE_INFINITY, SCORE_INFINITY, maximizing)
}

/// Searches `pos` to `depth` plies, consulting `evaluator` at the leaves.
///
/// The position is mutated during the walk and is back in its original state
/// when this returns.
pub fn search_with<P, E>(
    pos: &mut P,
    evaluator: &E,
    depth: u8,
    alpha: Score,
    beta: Score,
    maximizing: bool,
) -> SearchOutcome<P::Move>
where
    P: GameRules,
    E: Evaluator<P>,
{
    let mut nodes = 0u64;
    let (score, best_move) = alphabeta(
        pos,
        evaluator,
        depth,
        alpha,
        beta,
        maximizing,
        &mut nodes,
    );
    debug!(
        depth,
        score,
        nodes,
        found = best_move.is_some(),
        "search complete"
    );

    SearchOutcome {
        score,
        best_move,
        nodes,
    }
}

fn alphabeta<P, E>(
    pos: &mut P,
    evaluator: &E,
    depth: u8,
    mut alpha: Score,
    mut beta: Score,
    maximizing: bool,
    nodes: &mut u64,
) -> (Score, Option<P::Move>)
where
    P: GameRules,
    E: Evaluator<P>,
{
    *nodes += 1;

    if depth == 0 || pos.is_terminal() {
        return (evaluator.evaluate(pos), None);
    }

    let moves = pos.legal_moves();
    if moves.is_empty() {
        warn!(depth, "non-terminal position has no legal moves");
    }

    let mut best_score = if maximizing {
        -SCORE_INFINITY
    } else {
        SCORE_INFINITY
    };
    let mut best_move = None;

    for (i, &mv) in moves.iter().enumerate() {
        let score = {
            let mut child = Applied::new(pos, mv);
            alphabeta(
                &mut *child,
                evaluator,
                depth - 1,
                alpha,
                beta,
                !maximizing,
                nodes,
            )
            .0
        };

        // Strict comparisons: the earliest of equally good moves is kept.
        if maximizing {
            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            alpha = alpha.max(best_score);
        } else {
            if score < best_score {
                best_score = score;
                best_move = Some(mv);
            }
            beta = beta.min(best_score);
        }

        if beta <= alpha {
            trace!(
                depth,
                alpha,
                beta,
                skipped = moves.len() - i - 1,
                "cut-off"
            );
            break;
        }
    }

    (best_score, best_move)
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
