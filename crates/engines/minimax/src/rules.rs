//! The rules interface the search drives.
//!
//! The search never looks inside a position or a move. It enumerates, applies
//! and undoes through [`GameRules`], and the material evaluator reads counts
//! and terminal flags through [`MaterialRules`].

use chess_core::{legal_moves, Color, GameStatus, Move, PieceKind, Position, Undo};

/// A two-player game position that can be walked depth-first in place.
pub trait GameRules {
    /// Opaque transition produced by [`GameRules::legal_moves`].
    type Move: Copy;
    /// Whatever [`GameRules::undo`] needs to restore the prior position.
    type Undo;

    /// Legal moves in a fixed, deterministic order. Empty only when terminal.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Play `mv` in place.
    fn apply(&mut self, mv: Self::Move) -> Self::Undo;

    /// Reverse the most recent `apply(mv)`; the position must come back exactly.
    fn undo(&mut self, mv: Self::Move, undo: Self::Undo);

    /// No further play: mate, stalemate or a dead draw.
    fn is_terminal(&self) -> bool;
}

/// Queries the material evaluator needs on top of move generation.
pub trait MaterialRules: GameRules {
    fn side_to_move(&self) -> Color;
    fn is_checkmate(&self) -> bool;
    fn is_stalemate(&self) -> bool;
    fn is_insufficient_material(&self) -> bool;
    fn piece_count(&self, side: Color, kind: PieceKind) -> u32;
}

impl GameRules for Position {
    type Move = Move;
    type Undo = Undo;

    fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self)
    }

    fn apply(&mut self, mv: Move) -> Undo {
        self.make_move(mv)
    }

    fn undo(&mut self, mv: Move, undo: Undo) {
        self.unmake_move(mv, undo);
    }

    fn is_terminal(&self) -> bool {
        self.status() != GameStatus::Ongoing
    }
}

impl MaterialRules for Position {
    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn is_checkmate(&self) -> bool {
        Position::is_checkmate(self)
    }

    fn is_stalemate(&self) -> bool {
        Position::is_stalemate(self)
    }

    fn is_insufficient_material(&self) -> bool {
        Position::is_insufficient_material(self)
    }

    fn piece_count(&self, side: Color, kind: PieceKind) -> u32 {
        Position::piece_count(self, side, kind)
    }
}
