//! Errors surfaced to the driver.

use stepmaze_core::Point;
use thiserror::Error;

/// A rejected start or goal placement. The session is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("endpoints can only be placed while the maze is idle")]
    WrongPhase,
    #[error("{0} is outside the maze")]
    OutOfBounds(Point),
    #[error("{0} is a wall")]
    Blocked(Point),
    #[error("the goal must differ from the start")]
    SameAsStart,
    #[error("place a start before the goal")]
    NoStart,
}

/// Bad command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: String, value: String },
    #[error("unknown argument {0}")]
    UnknownArgument(String),
}
