//! The component trait and event outcome types.

use std::any::{Any, type_name};

use serde_json::{Value, json};

use crate::{
    canvas::Canvas,
    core::context::{Context, ViewContext},
    cursor::Cursor,
    error::Result,
    event::Event,
    geom::{Expanse, Rect},
    state::NodeName,
};

/// The result of an event handler.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EventOutcome {
    /// The event was processed and propagation stops.
    Handled,
    /// The event was not handled and continues to the parent.
    Bubble,
}

/// Components are the behavior attached to nodes in the core arena.
///
/// A component sees itself in local coordinates: its origin is the top left
/// of the rect its parent's layout assigned it. Any method that changes what
/// the component displays runs with a [`Context`], and must report what it
/// changed through [`Context::damage`]. A mutation that reports nothing is
/// treated as having damaged the whole component.
pub trait Component: Any {
    /// The size this component would like, given a width hint. Must be a pure
    /// function of current content and `available_width`.
    fn preferred_size(&self, available_width: u32) -> Expanse {
        let _ = available_width;
        Expanse::zero()
    }

    /// Draw into `canvas`. `region` is the damaged part of the component in
    /// local coordinates, and the canvas is already clipped to it, so drawing
    /// outside it is harmless.
    fn draw(&self, _canvas: &mut Canvas, _region: Rect, _ctx: &dyn ViewContext) -> Result<()> {
        Ok(())
    }

    /// Handle an event. Mouse locations are local to this component.
    fn on_event(&mut self, _event: &Event, _ctx: &mut dyn Context) -> Result<EventOutcome> {
        Ok(EventOutcome::Bubble)
    }

    /// Can this component hold the focus cursor?
    fn accept_focus(&self) -> bool {
        false
    }

    /// The terminal cursor this component wants while it or one of its
    /// descendants holds focus, relative to its own origin. `None` hides
    /// the cursor unless an ancestor asks for one.
    fn cursor(&self, _ctx: &dyn ViewContext) -> Option<Cursor> {
        None
    }

    /// The node name, derived from the type name by default.
    fn name(&self) -> NodeName {
        let name = type_name::<Self>();
        let short = name.rsplit("::").next().unwrap_or(name);
        NodeName::convert(short)
    }

    /// Component state for JSON tree snapshots.
    fn to_json(&self) -> Value {
        json!({})
    }
}
