// src/errors.rs
use std::fmt;

use crate::tiles::Tile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// Tile and meld counts do not describe a 13-tile hand, or a fixed meld cannot exist.
    MalformedHand { message: String },
    /// More than four copies of one kind once fixed melds and the winning tile are counted.
    OverusedTile { tile: Tile, count: u8 },
    /// Neither a special form nor any division completes the hand.
    NotWinningHand,
    /// A search bound was exceeded; always a bug in this crate.
    Internal { message: String },
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreError::MalformedHand { message } => {
                write!(f, "Malformed hand: {}", message)
            }
            ScoreError::OverusedTile { tile, count } => {
                write!(f, "Overused tile: {:?} appears {} times", tile, count)
            }
            ScoreError::NotWinningHand => write!(f, "Not a winning hand"),
            ScoreError::Internal { message } => {
                write!(f, "Internal error: {}", message)
            }
        }
    }
}

impl std::error::Error for ScoreError {}

pub type ScoreResult<T> = Result<T, ScoreError>;

#[cfg(feature = "python")]
impl From<ScoreError> for pyo3::PyErr {
    fn from(err: ScoreError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
