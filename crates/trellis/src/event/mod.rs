//! Input events and the types that describe them.

/// Keyboard input.
pub mod key;
/// Mouse input.
pub mod mouse;

use crate::geom::{Expanse, Point};

/// All the events that drive a trellis application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A keystroke, routed to the focused component.
    Key(key::Key),
    /// A mouse action, routed by hit-testing. When delivered to a component
    /// the location is local to that component.
    Mouse(mouse::MouseEvent),
    /// Pasted text, routed like a key.
    Paste(String),
    /// The terminal changed size.
    Resize(Expanse),
    /// The terminal window gained (`true`) or lost (`false`) focus. Routed
    /// like a key.
    TerminalFocus(bool),
    /// Sent to a component when it receives the focus cursor.
    FocusGained,
    /// Sent to a component when it loses the focus cursor.
    FocusLost,
}

impl Event {
    /// The mouse location, if this is a mouse event.
    pub fn location(&self) -> Option<Point> {
        match self {
            Self::Mouse(m) => Some(m.location),
            _ => None,
        }
    }

    /// A copy of the event with its mouse location replaced. Non-mouse events
    /// are returned unchanged.
    pub(crate) fn with_location(&self, location: Point) -> Self {
        match self {
            Self::Mouse(m) => Self::Mouse(mouse::MouseEvent { location, ..*m }),
            other => other.clone(),
        }
    }
}

impl From<key::Key> for Event {
    fn from(k: key::Key) -> Self {
        Self::Key(k)
    }
}

impl From<mouse::MouseEvent> for Event {
    fn from(m: mouse::MouseEvent) -> Self {
        Self::Mouse(m)
    }
}
