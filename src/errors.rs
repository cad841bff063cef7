//! Errors used throughout the chess engine.
//!
//! `ChessError` is the single error type returned by game logic and by the
//! boundary converters. Rule violations are reported where they are detected
//! and never silently corrected.
//!
//! - `InvalidMovement` covers everything a caller can get wrong when asking
//!   for a move: no match, ambiguity, unavailable castling, a missing
//!   promotion piece, or a move that would leave the mover's king in check.
//! - `InvalidPosition` is raised while loading placements (missing or extra
//!   kings, overlapping pieces, arena overflow).
//! - The remaining variants belong to the FEN/algebraic converters and to
//!   configuration loading.

use thiserror::Error;

pub type ChessResult<T> = Result<T, ChessError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChessError {
    #[error("invalid movement: {0}")]
    InvalidMovement(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid algebraic notation: {0}")]
    InvalidAlgebraic(String),

    #[error("invalid search configuration: {0}")]
    InvalidConfig(String),
}

impl ChessError {
    pub(crate) fn movement(reason: impl Into<String>) -> Self {
        ChessError::InvalidMovement(reason.into())
    }

    pub(crate) fn position(reason: impl Into<String>) -> Self {
        ChessError::InvalidPosition(reason.into())
    }
}

#[cfg(test)]
mod tests {
    use super::ChessError;

    #[test]
    fn messages_carry_the_reason() {
        let err = ChessError::movement("castling not allowed");
        assert_eq!(err.to_string(), "invalid movement: castling not allowed");
        assert!(matches!(err, ChessError::InvalidMovement(_)));
    }
}
