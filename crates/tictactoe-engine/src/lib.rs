pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A move was attempted at a position that cannot take it.
///
/// The console layer only offers unmarked positions, so reaching this is a
/// caller bug rather than a game condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum InvalidPositionError {
    #[display("position {index} is outside 1..=9")]
    OutOfRange { index: i64 },
    #[display("position {position} is already occupied")]
    Occupied { position: Position },
    #[display("cannot place an empty marker at position {position}")]
    EmptyMarker { position: Position },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("no legal move left on a full board")]
pub struct NoLegalMoveError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MatchError {
    #[display("invalid move: {_0}")]
    InvalidPosition(InvalidPositionError),
    #[display("computer cannot move: {_0}")]
    NoLegalMove(NoLegalMoveError),
    #[display("cannot {operation} while {phase}")]
    UnexpectedPhase {
        operation: &'static str,
        phase: MatchPhase,
    },
    #[display("the human must choose X or O")]
    InvalidMarkerChoice,
}

impl From<InvalidPositionError> for MatchError {
    fn from(err: InvalidPositionError) -> Self {
        MatchError::InvalidPosition(err)
    }
}

impl From<NoLegalMoveError> for MatchError {
    fn from(err: NoLegalMoveError) -> Self {
        MatchError::NoLegalMove(err)
    }
}
