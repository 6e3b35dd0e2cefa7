//! Error types.

use std::{io, result::Result as StdResult, sync::mpsc};

use thiserror::Error;

use crate::{NodeId, geom};

/// Result type for trellis operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    #[error("geometry: {0}")]
    /// Geometry failure from an explicit geometry API.
    Geometry(String),
    #[error("config: {0}")]
    /// A construction-time option was invalid.
    Config(String),
    #[error("focus: {0}")]
    /// Focus-related precondition failure.
    Focus(String),
    #[error("render: {0}")]
    /// Terminal output failure.
    Render(String),
    #[error("layout: {0}")]
    /// Layout failure.
    Layout(String),
    #[error("runloop: {0}")]
    /// Run loop failure.
    RunLoop(String),
    #[error("internal: {0}")]
    /// Internal error.
    Internal(String),
    #[error("invalid operation: {0}")]
    /// An operation that can't be applied to the tree in its current state.
    InvalidOperation(String),

    /// The node does not exist in the arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
    /// The node exists but is not attached to the root.
    #[error("node is detached: {0:?}")]
    Detached(NodeId),
    /// The node already has a parent.
    #[error("node already attached: {0:?}")]
    AlreadyAttached(NodeId),
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} to {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Prospective parent.
        parent: NodeId,
        /// Prospective child.
        child: NodeId,
    },
    /// A component is already borrowed for another call.
    #[error("component is already in use: {0:?}")]
    ReentrantComponentBorrow(NodeId),
}

impl From<mpsc::RecvError> for Error {
    fn from(e: mpsc::RecvError) -> Self {
        Self::RunLoop(e.to_string())
    }
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Render(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
