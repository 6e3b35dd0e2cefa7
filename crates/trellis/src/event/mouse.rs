use crate::{event::key, geom::Point};

/// Mouse button codes.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Button {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
    /// No button (for move/scroll).
    None,
}

/// Mouse action kinds.
#[derive(Debug, PartialOrd, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Action {
    /// Button press.
    Down,
    /// Button release.
    Up,
    /// Mouse drag with button held.
    Drag,
    /// Mouse moved without button.
    Moved,
    /// Scroll wheel down.
    ScrollDown,
    /// Scroll wheel up.
    ScrollUp,
    /// Horizontal scroll left.
    ScrollLeft,
    /// Horizontal scroll right.
    ScrollRight,
}

impl Action {
    /// Is this a button-driven action?
    pub fn is_button(&self) -> bool {
        matches!(self, Self::Down | Self::Up | Self::Drag)
    }
}

/// A mouse input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MouseEvent {
    /// Mouse action type.
    pub action: Action,
    /// Mouse button.
    pub button: Button,
    /// Keyboard modifiers.
    pub modifiers: key::Mods,
    /// Cursor location. Screen coordinates on arrival, local coordinates
    /// once delivered to a component.
    pub location: Point,
}

impl MouseEvent {
    /// A left-button press at a location, with no modifiers.
    pub fn click(location: impl Into<Point>) -> Self {
        Self {
            action: Action::Down,
            button: Button::Left,
            modifiers: key::Empty,
            location: location.into(),
        }
    }

    /// Is this a left-button press?
    pub fn is_left_down(&self) -> bool {
        self.action == Action::Down && self.button == Button::Left
    }
}

#[cfg(test)]
mod tests {
    use crate::{error::Result, event::mouse::*};

    #[test]
    fn click() -> Result<()> {
        let m = MouseEvent::click((3, 4));
        assert!(m.is_left_down());
        assert!(m.action.is_button());
        assert_eq!(m.location, Point::new(3, 4));
        let moved = MouseEvent {
            action: Action::Moved,
            button: Button::None,
            ..m
        };
        assert!(!moved.is_left_down());
        assert!(!moved.action.is_button());
        Ok(())
    }
}
