//! Engine error type.

use thiserror::Error;

/// Errors produced while turning a board snapshot into a move.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// No food on the board, so there is nothing to search back from.
    #[error("no target available: the board has no food")]
    NoTargetAvailable,

    /// The snapshot violates the input contract (dimensions, bounds, missing snake).
    #[error("invalid board state: {0}")]
    InvalidBoardState(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
