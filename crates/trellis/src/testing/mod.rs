//! Helpers for testing components without a terminal.

/// Buffer matching.
pub mod buf;
/// A test harness driving an app.
pub mod harness;
/// A recording render backend.
pub mod render;

pub use buf::BufTest;
pub use harness::Harness;
pub use render::TestRender;
