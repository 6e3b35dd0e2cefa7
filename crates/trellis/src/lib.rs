//! Trellis: the core of a terminal UI component toolkit.
//!
//! Components live in an arena of nodes. Containers own a layout strategy
//! that places their children, every change is recorded as damage, and each
//! repaint cycle redraws only the damaged regions and sends the terminal the
//! minimal set of writes that brings it up to date.
//!
//! # Quick Start
//!
//! The main entry points are:
//! - [`Core`] - The node arena, focus cursor and layout engine
//! - [`App`] - The repaint cycle on top of a core
//! - [`Component`] - The trait implemented by everything drawn on screen
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Expanse, etc.)
//! - [`layout`] - Layout strategies
//! - [`widgets`] - Built-in components
//! - [`testing`] - Harness and matchers for testing without a terminal

#![warn(missing_docs)]

pub use trellis_geom as geom;

pub mod backend;
pub mod canvas;
pub mod component;
pub mod core;
pub mod cursor;
pub mod damage;
pub mod diff;
pub mod error;
pub mod event;
pub mod layout;
pub mod state;
pub mod style;
pub mod termbuf;
pub mod testing;
pub mod text;
pub mod widgets;

pub use canvas::Canvas;
pub use component::{Component, EventOutcome};
pub use core::{App, Context, Core, NodeId, TypedId, ViewContext};
pub use cursor::{Cursor, CursorShape};
pub use error::{Error, Result};
pub use termbuf::TermBuf;
