use std::{error, fmt, result::Result as StdResult};

/// Geometry error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An operation was given geometry it can't work with.
    Geometry(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Geometry(s) => write!(f, "{s}"),
        }
    }
}

impl error::Error for Error {}

/// Result type for geometry operations.
pub type Result<T> = StdResult<T, Error>;
