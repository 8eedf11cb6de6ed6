//! Terminal-state detection: checkmate, stalemate and dead positions.

use crate::{board::Position, movegen::has_legal_move, types::*};

/// Where the game stands for the side to move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    /// The side to move is mated.
    Checkmate,
    Stalemate,
    InsufficientMaterial,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::Ongoing
    }

    /// PGN-style result. `mated` is the side to move of the classified position.
    pub fn result_string(self, mated: Color) -> &'static str {
        match self {
            GameStatus::Ongoing => "*",
            GameStatus::Checkmate => match mated {
                Color::White => "0-1",
                Color::Black => "1-0",
            },
            GameStatus::Stalemate | GameStatus::InsufficientMaterial => "1/2-1/2",
        }
    }
}

impl Position {
    pub fn status(&self) -> GameStatus {
        if !has_legal_move(self) {
            if self.in_check(self.side_to_move) {
                GameStatus::Checkmate
            } else {
                GameStatus::Stalemate
            }
        } else if self.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else {
            GameStatus::Ongoing
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && !has_legal_move(self)
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && !has_legal_move(self)
    }

    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Neither side can ever deliver mate.
    pub fn is_insufficient_material(&self) -> bool {
        Color::ALL.iter().all(|&c| self.lacks_mating_material(c))
    }

    /// Whether `c` alone can never mate, even with the opponent's help.
    fn lacks_mating_material(&self, c: Color) -> bool {
        let own = |kind| self.piece_count(c, kind);
        let both =
            |kind| self.piece_count(Color::White, kind) + self.piece_count(Color::Black, kind);

        if own(PieceKind::Pawn) + own(PieceKind::Rook) + own(PieceKind::Queen) > 0 {
            return false;
        }

        if own(PieceKind::Knight) > 0 {
            // A lone knight, and the opponent has nothing to block with.
            let them = c.other();
            let helpers = [
                PieceKind::Pawn,
                PieceKind::Knight,
                PieceKind::Bishop,
                PieceKind::Rook,
            ];
            return own(PieceKind::Knight) + own(PieceKind::Bishop) == 1
                && helpers.iter().all(|&k| self.piece_count(them, k) == 0);
        }

        if own(PieceKind::Bishop) > 0 {
            let mut colors = (0..64u8)
                .filter(|&s| matches!(self.piece_at(s), Some(pc) if pc.kind == PieceKind::Bishop))
                .map(is_dark_square);
            let first = colors.next();
            let same_color = colors.all(|dark| Some(dark) == first);
            return same_color && both(PieceKind::Pawn) == 0 && both(PieceKind::Knight) == 0;
        }

        true
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod status_tests;
