//! Error types for position setup and UCI parsing.

use thiserror::Error;

/// Reasons a FEN string can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 FEN fields, found {0}")]
    MissingFields(usize),

    #[error("expected 8 ranks in the board field, found {0}")]
    RankCount(usize),

    #[error("invalid piece character '{0}'")]
    InvalidPiece(char),

    #[error("rank {rank} does not describe exactly 8 files")]
    RankLength { rank: usize },

    #[error("invalid side to move '{0}'")]
    InvalidSide(String),

    #[error("invalid castling character '{0}'")]
    InvalidCastling(char),

    #[error("invalid en passant square '{0}'")]
    InvalidEnPassant(String),

    #[error("invalid move counter '{0}'")]
    InvalidCounter(String),
}

/// Errors raised while applying a UCI `position` command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UciError {
    #[error("unknown position keyword '{0}'")]
    UnknownPosition(String),

    #[error(transparent)]
    Fen(#[from] FenError),

    #[error("illegal or malformed move '{0}'")]
    IllegalMove(String),
}
