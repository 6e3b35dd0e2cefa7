//! Terminal backends.

/// Crossterm backend implementation.
pub mod crossterm;
use std::{fmt::Debug, process};

use crate::{cursor::Cursor, error::Result, geom::Point, style::Style};

/// The narrow write interface to the terminal. Only the frame differ's
/// [`emit`](crate::diff::emit) and the app's repaint cycle call these
/// methods.
pub trait RenderBackend {
    /// Move the output cursor to a screen position.
    fn move_cursor(&mut self, p: Point) -> Result<()>;
    /// Apply a style to the following glyph output.
    fn set_attributes(&mut self, style: &Style) -> Result<()>;
    /// Output glyphs at the cursor.
    fn write_glyphs(&mut self, txt: &str) -> Result<()>;
    /// Flush output to the terminal.
    fn flush(&mut self) -> Result<()>;
    /// Show the terminal cursor at a screen position with a shape.
    fn show_cursor(&mut self, c: &Cursor) -> Result<()>;
    /// Hide the terminal cursor.
    fn hide_cursor(&mut self) -> Result<()>;
    /// Reset the backend to a clean state.
    fn reset(&mut self) -> Result<()>;
}

/// A handle for controlling the terminal session: entering and leaving raw
/// mode and the alternate screen.
pub trait BackendControl: Debug {
    /// Start the backend, taking control of the terminal.
    fn start(&mut self) -> Result<()>;

    /// Stop the backend, releasing control of the terminal.
    fn stop(&mut self) -> Result<()>;

    /// Stop the backend and exit the process.
    fn exit(&mut self, code: i32) -> ! {
        let _ = self.stop().ok();
        process::exit(code)
    }
}

/// Guard that ensures backend start/stop are paired for a terminal session.
pub(crate) struct TerminalSession<'a> {
    /// Controller for the session.
    backend: &'a mut dyn BackendControl,
    /// Whether the session has an active backend start.
    active: bool,
}

impl<'a> TerminalSession<'a> {
    /// Start the backend and create a new session guard.
    pub(crate) fn new(backend: &'a mut dyn BackendControl) -> Result<Self> {
        backend.start()?;
        Ok(Self {
            backend,
            active: true,
        })
    }

    /// Stop the backend if the session is active.
    pub(crate) fn stop(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            self.backend.stop()?;
        }
        Ok(())
    }
}

impl Drop for TerminalSession<'_> {
    fn drop(&mut self) {
        if self.active {
            drop(self.backend.stop());
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Counting {
        starts: usize,
        stops: usize,
    }

    impl BackendControl for Counting {
        fn start(&mut self) -> Result<()> {
            self.starts += 1;
            Ok(())
        }

        fn stop(&mut self) -> Result<()> {
            self.stops += 1;
            Ok(())
        }
    }

    #[test]
    fn session_stops_once() -> Result<()> {
        let mut ctl = Counting::default();
        {
            let mut s = TerminalSession::new(&mut ctl)?;
            s.stop()?;
            s.stop()?;
        }
        assert_eq!((ctl.starts, ctl.stops), (1, 1));

        {
            let _s = TerminalSession::new(&mut ctl)?;
        }
        assert_eq!((ctl.starts, ctl.stops), (2, 2));
        Ok(())
    }
}
