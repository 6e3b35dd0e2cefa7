//! The component tree, the focus cursor and the repaint cycle.

/// Application state and the repaint cycle.
pub mod app;
/// Context traits handed to components.
pub mod context;
/// Debug output for the tree.
pub mod dump;
mod focus;
/// Node identifiers.
pub mod id;
/// Node storage.
pub mod node;
mod pass;
/// The node arena.
pub mod world;

pub use app::App;
pub use context::{Context, ViewContext};
pub use id::{NodeId, TypedId};
pub use node::Node;
pub use pass::LayoutStats;
pub use world::Core;
