//! Material evaluation with terminal detection.

use chess_core::{Color, PieceKind};

use crate::rules::MaterialRules;

/// Evaluation on a White-relative scale: positive favours White.
pub type Score = i32;

/// Magnitude of a checkmate; no reachable material sum comes close.
pub const MATE_SCORE: Score = 9999;

/// Score of stalemate and dead positions.
pub const DRAW_SCORE: Score = 0;

/// Material values in pawns, indexed by `PieceKind::idx()`.
/// Order: Pawn, Knight, Bishop, Rook, Queen, King
const PIECE_VALUES: [Score; 6] = [1, 3, 3, 5, 9, 0];

/// Returns the material value of a piece in pawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> Score {
    PIECE_VALUES[kind.idx()]
}

/// Static evaluation consulted at search leaves.
pub trait Evaluator<P: ?Sized> {
    fn evaluate(&self, pos: &P) -> Score;
}

/// Material count plus mate and draw detection.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl<P: MaterialRules> Evaluator<P> for MaterialEvaluator {
    fn evaluate(&self, pos: &P) -> Score {
        evaluate(pos)
    }
}

/// Evaluates the position from White's perspective.
///
/// - Checkmate: the mated side is always the side to move, so White to move
///   scores `-MATE_SCORE` and Black to move scores `+MATE_SCORE`.
/// - Stalemate or insufficient material: `DRAW_SCORE`.
/// - Otherwise White's material minus Black's.
pub fn evaluate<P: MaterialRules>(pos: &P) -> Score {
    if pos.is_checkmate() {
        return match pos.side_to_move() {
            Color::White => -MATE_SCORE,
            Color::Black => MATE_SCORE,
        };
    }
    if pos.is_stalemate() || pos.is_insufficient_material() {
        return DRAW_SCORE;
    }

    PieceKind::ALL
        .iter()
        .map(|&kind| {
            let white = pos.piece_count(Color::White, kind) as Score;
            let black = pos.piece_count(Color::Black, kind) as Score;
            piece_value(kind) * (white - black)
        })
        .sum()
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
