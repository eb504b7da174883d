use std::{error::Error, fmt};

use shakmaty::{Color, Square};

use crate::session::SessionState;

/// Error when registering a tablebase search path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryError {
    /// The empty path cannot be registered.
    EmptyPath,
    /// The path contains an interior NUL byte. The probing engine receives
    /// paths as NUL-terminated strings and cannot represent it.
    NulByte,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::EmptyPath => f.write_str("cannot register the empty path"),
            RegistryError::NulByte => f.write_str("path contains an interior NUL byte"),
        }
    }
}

impl Error for RegistryError {}

/// Error when constructing a [`PositionQuery`](crate::PositionQuery).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    /// More pieces of one color than the wire encoding can hold.
    TooManyPieces {
        /// Color of the overflowing piece list.
        color: Color,
        /// Number of pieces that would have to be encoded.
        count: usize,
    },
    /// Two pieces were placed on the same square.
    SquareOccupied(Square),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::TooManyPieces { color, count } => write!(
                f,
                "too many {color} pieces ({count}, at most {})",
                crate::query::MAX_PIECES_PER_SIDE
            ),
            QueryError::SquareOccupied(square) => {
                write!(f, "{square} is already occupied")
            }
        }
    }
}

impl Error for QueryError {}

/// A session operation that was rejected because of the current
/// [`SessionState`].
///
/// This is a programming-contract violation on the caller's side, not a
/// recoverable probing condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateError {
    operation: Operation,
    state: SessionState,
}

impl StateError {
    pub(crate) fn new(operation: Operation, state: SessionState) -> StateError {
        StateError { operation, state }
    }

    /// The rejected operation.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The session state at the time of the call.
    pub fn state(&self) -> SessionState {
        self.state
    }
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} called while session is {}", self.operation, self.state)
    }
}

impl Error for StateError {}

/// Session lifecycle operations, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Initialize,
    Probe,
    Shutdown,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Initialize => "initialize",
            Operation::Probe => "probe",
            Operation::Shutdown => "shutdown",
        })
    }
}
