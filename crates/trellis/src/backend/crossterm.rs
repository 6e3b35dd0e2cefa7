use std::{
    io::{self, Stderr, Write},
    panic,
    process::exit,
    sync::mpsc,
    thread,
};

use color_backtrace::{BacktracePrinter, default_output_stream};
use crossterm::{
    ExecutableCommand, QueueableCommand, cursor as ccursor, event as cevent, style, terminal,
};
use scopeguard::defer;
use serde::Deserialize;

use super::{BackendControl, RenderBackend, TerminalSession};
use crate::{
    core::{App, dump::dump_with_focus},
    cursor::{Cursor, CursorShape},
    error::{Error, Result},
    event::{Event, key, mouse},
    geom::{Expanse, Point},
    style::{Color, Style},
};

fn translate_color(c: Color) -> style::Color {
    match c {
        Color::Black => style::Color::Black,
        Color::DarkGrey => style::Color::DarkGrey,
        Color::Red => style::Color::Red,
        Color::DarkRed => style::Color::DarkRed,
        Color::Green => style::Color::Green,
        Color::DarkGreen => style::Color::DarkGreen,
        Color::Yellow => style::Color::Yellow,
        Color::DarkYellow => style::Color::DarkYellow,
        Color::Blue => style::Color::Blue,
        Color::DarkBlue => style::Color::DarkBlue,
        Color::Magenta => style::Color::Magenta,
        Color::DarkMagenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::Cyan,
        Color::DarkCyan => style::Color::DarkCyan,
        Color::White => style::Color::White,
        Color::Grey => style::Color::Grey,
        Color::Rgb { r, g, b } => style::Color::Rgb { r, g, b },
        Color::AnsiValue(a) => style::Color::AnsiValue(a),
    }
}

fn translate_cursor_style(c: &Cursor) -> ccursor::SetCursorStyle {
    match (c.shape, c.blink) {
        (CursorShape::Block, true) => ccursor::SetCursorStyle::BlinkingBlock,
        (CursorShape::Block, false) => ccursor::SetCursorStyle::SteadyBlock,
        (CursorShape::Line, true) => ccursor::SetCursorStyle::BlinkingBar,
        (CursorShape::Line, false) => ccursor::SetCursorStyle::SteadyBar,
        (CursorShape::Underscore, true) => ccursor::SetCursorStyle::BlinkingUnderScore,
        (CursorShape::Underscore, false) => ccursor::SetCursorStyle::SteadyUnderScore,
    }
}

/// Leave the alternate screen and raw mode, ignoring failures. Used on paths
/// where the terminal must be restored no matter what.
fn restore_terminal() {
    let mut stderr = io::stderr();
    drop(crossterm::execute!(
        stderr,
        terminal::LeaveAlternateScreen,
        cevent::DisableMouseCapture,
        cevent::DisableFocusChange,
        ccursor::Show
    ));
    drop(terminal::disable_raw_mode());
}

/// Controls raw mode, the alternate screen and mouse capture.
#[derive(Debug)]
pub struct CrosstermControl {
    /// Output stream.
    fp: Stderr,
}

impl CrosstermControl {
    /// Take over the terminal.
    fn enter(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.fp.execute(terminal::EnterAlternateScreen)?;
        self.fp.execute(cevent::EnableMouseCapture)?;
        self.fp.execute(cevent::EnableFocusChange)?;
        self.fp.execute(ccursor::Hide)?;
        Ok(())
    }

    /// Hand the terminal back.
    fn exit(&mut self) -> io::Result<()> {
        self.fp.execute(terminal::LeaveAlternateScreen)?;
        self.fp.execute(cevent::DisableMouseCapture)?;
        self.fp.execute(cevent::DisableFocusChange)?;
        self.fp.execute(ccursor::Show)?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl Default for CrosstermControl {
    fn default() -> Self {
        Self { fp: io::stderr() }
    }
}

impl BackendControl for CrosstermControl {
    fn start(&mut self) -> Result<()> {
        Ok(self.enter()?)
    }

    fn stop(&mut self) -> Result<()> {
        Ok(self.exit()?)
    }
}

/// Writes frame differences to the terminal through crossterm. Output is
/// queued and only sent on flush.
#[derive(Debug)]
pub struct CrosstermRender {
    /// Output stream.
    fp: Stderr,
}

impl Default for CrosstermRender {
    fn default() -> Self {
        Self { fp: io::stderr() }
    }
}

impl RenderBackend for CrosstermRender {
    fn move_cursor(&mut self, p: Point) -> Result<()> {
        let x = u16::try_from(p.x).map_err(|e| Error::Render(e.to_string()))?;
        let y = u16::try_from(p.y).map_err(|e| Error::Render(e.to_string()))?;
        self.fp.queue(ccursor::MoveTo(x, y))?;
        Ok(())
    }

    fn set_attributes(&mut self, s: &Style) -> Result<()> {
        // Order is important here - if we reset after setting foreground and
        // background colors they are lost.
        self.fp
            .queue(style::SetAttribute(style::Attribute::Reset))?;
        let attrs = [
            (s.attrs.bold, style::Attribute::Bold),
            (s.attrs.crossedout, style::Attribute::CrossedOut),
            (s.attrs.dim, style::Attribute::Dim),
            (s.attrs.italic, style::Attribute::Italic),
            (s.attrs.reverse, style::Attribute::Reverse),
            (s.attrs.underline, style::Attribute::Underlined),
        ];
        for (on, attr) in attrs {
            if on {
                self.fp.queue(style::SetAttribute(attr))?;
            }
        }
        self.fp
            .queue(style::SetForegroundColor(translate_color(s.fg)))?;
        self.fp
            .queue(style::SetBackgroundColor(translate_color(s.bg)))?;
        Ok(())
    }

    fn write_glyphs(&mut self, txt: &str) -> Result<()> {
        self.fp.queue(style::Print(txt))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.fp.flush()?;
        Ok(())
    }

    fn show_cursor(&mut self, c: &Cursor) -> Result<()> {
        self.move_cursor(c.location)?;
        self.fp.queue(translate_cursor_style(c))?;
        self.fp.queue(ccursor::Show)?;
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.fp.queue(ccursor::Hide)?;
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        self.fp
            .queue(style::SetAttribute(style::Attribute::Reset))?;
        self.fp.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }
}

fn translate_key_modifiers(mods: cevent::KeyModifiers) -> key::Mods {
    key::Mods {
        shift: mods.contains(cevent::KeyModifiers::SHIFT),
        ctrl: mods.contains(cevent::KeyModifiers::CONTROL),
        alt: mods.contains(cevent::KeyModifiers::ALT),
    }
}

fn translate_button(b: cevent::MouseButton) -> mouse::Button {
    match b {
        cevent::MouseButton::Left => mouse::Button::Left,
        cevent::MouseButton::Right => mouse::Button::Right,
        cevent::MouseButton::Middle => mouse::Button::Middle,
    }
}

fn translate_key_code(c: cevent::KeyCode) -> key::KeyCode {
    match c {
        cevent::KeyCode::Backspace => key::KeyCode::Backspace,
        cevent::KeyCode::Enter => key::KeyCode::Enter,
        cevent::KeyCode::Left => key::KeyCode::Left,
        cevent::KeyCode::Right => key::KeyCode::Right,
        cevent::KeyCode::Up => key::KeyCode::Up,
        cevent::KeyCode::Down => key::KeyCode::Down,
        cevent::KeyCode::Home => key::KeyCode::Home,
        cevent::KeyCode::End => key::KeyCode::End,
        cevent::KeyCode::PageUp => key::KeyCode::PageUp,
        cevent::KeyCode::PageDown => key::KeyCode::PageDown,
        cevent::KeyCode::Tab => key::KeyCode::Tab,
        cevent::KeyCode::BackTab => key::KeyCode::BackTab,
        cevent::KeyCode::Delete => key::KeyCode::Delete,
        cevent::KeyCode::Insert => key::KeyCode::Insert,
        cevent::KeyCode::Esc => key::KeyCode::Esc,
        cevent::KeyCode::F(x) => key::KeyCode::F(x),
        cevent::KeyCode::Char(c) => key::KeyCode::Char(c),
        _ => key::KeyCode::Null,
    }
}

/// Translate a crossterm event. Key releases are dropped.
fn translate_event(e: cevent::Event) -> Option<Event> {
    Some(match e {
        cevent::Event::Key(k) => {
            if k.kind == cevent::KeyEventKind::Release {
                return None;
            }
            Event::Key(key::Key {
                mods: translate_key_modifiers(k.modifiers),
                key: translate_key_code(k.code),
            })
        }
        cevent::Event::Mouse(m) => {
            let mut button = mouse::Button::None;
            let action = match m.kind {
                cevent::MouseEventKind::Down(b) => {
                    button = translate_button(b);
                    mouse::Action::Down
                }
                cevent::MouseEventKind::Up(b) => {
                    button = translate_button(b);
                    mouse::Action::Up
                }
                cevent::MouseEventKind::Drag(b) => {
                    button = translate_button(b);
                    mouse::Action::Drag
                }
                cevent::MouseEventKind::Moved => mouse::Action::Moved,
                cevent::MouseEventKind::ScrollDown => mouse::Action::ScrollDown,
                cevent::MouseEventKind::ScrollUp => mouse::Action::ScrollUp,
                cevent::MouseEventKind::ScrollLeft => mouse::Action::ScrollLeft,
                cevent::MouseEventKind::ScrollRight => mouse::Action::ScrollRight,
            };
            Event::Mouse(mouse::MouseEvent {
                button,
                action,
                location: Point::new(u32::from(m.column), u32::from(m.row)),
                modifiers: translate_key_modifiers(m.modifiers),
            })
        }
        cevent::Event::Resize(x, y) => Event::Resize(Expanse::new(u32::from(x), u32::from(y))),
        cevent::Event::FocusGained => Event::TerminalFocus(true),
        cevent::Event::FocusLost => Event::TerminalFocus(false),
        cevent::Event::Paste(s) => Event::Paste(s),
    })
}

/// Read terminal events on a background thread and forward them to the loop
/// thread.
fn event_emitter(evt_tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        loop {
            match cevent::read() {
                Ok(evt) => {
                    let Some(evt) = translate_event(evt) else {
                        continue;
                    };
                    if evt_tx.send(evt).is_err() {
                        // The loop has gone away.
                        return;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "terminal event read failed");
                    return;
                }
            }
        }
    });
}

/// What Ctrl+C does when the run loop sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CtrlCBehavior {
    /// Restore the terminal and exit with status 130.
    #[default]
    Exit,
    /// Like `Exit`, printing a dump of the component tree first.
    DumpAndExit,
    /// Route Ctrl+C to components like any other key.
    Deliver,
}

/// Run loop settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct RunloopOptions {
    /// Install a panic hook that restores the terminal and prints a colored
    /// backtrace.
    pub panic_hook: bool,
    /// Ctrl+C policy.
    pub ctrl_c: CtrlCBehavior,
}

impl Default for RunloopOptions {
    fn default() -> Self {
        Self {
            panic_hook: true,
            ctrl_c: CtrlCBehavior::Exit,
        }
    }
}

impl RunloopOptions {
    /// Parse options from a JSON document.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}

/// Restore the terminal and report a failed repaint along with a dump of the
/// tree.
fn report_render_error(app: &App, error: &Error) {
    restore_terminal();
    eprintln!("Render error: {error}");
    eprintln!("\nNode tree dump:");
    match dump_with_focus(&app.core, app.core.root_id(), app.core.focus_id()) {
        Ok(d) => eprintln!("{d}"),
        Err(e) => eprintln!("Failed to dump node tree: {e}"),
    }
}

/// Run an app on the terminal with default options until a component
/// requests exit. Returns the requested exit code.
pub fn runloop(app: &mut App) -> Result<i32> {
    runloop_with_options(app, RunloopOptions::default())
}

/// Run an app on the terminal until a component requests exit.
///
/// Input is read on a background thread and handed to this thread over a
/// channel. Every event waiting in the channel is routed before the next
/// repaint, so bursts of input cost a single cycle.
pub fn runloop_with_options(app: &mut App, options: RunloopOptions) -> Result<i32> {
    let mut ctrl = CrosstermControl::default();
    let mut session = TerminalSession::new(&mut ctrl)?;
    let mut be = CrosstermRender::default();

    if options.panic_hook {
        panic::set_hook(Box::new(|pi| {
            restore_terminal();
            BacktracePrinter::new().print_panic_info(pi, &mut default_output_stream());
        }));
    }
    defer! {
        if options.panic_hook {
            drop(panic::take_hook());
        }
    }

    let (tx, rx) = mpsc::channel();
    event_emitter(tx);

    let (w, h) = terminal::size()?;
    app.resize(Expanse::new(u32::from(w), u32::from(h)));
    if let Err(e) = app.redraw(&mut be) {
        report_render_error(app, &e);
        return Err(e);
    }

    loop {
        let mut pending = vec![rx.recv()?];
        pending.extend(rx.try_iter());
        for event in pending {
            if is_ctrl_c(&event) && options.ctrl_c != CtrlCBehavior::Deliver {
                session.stop()?;
                if options.ctrl_c == CtrlCBehavior::DumpAndExit {
                    eprintln!("\nCtrl+C pressed - Node tree dump:");
                    match dump_with_focus(&app.core, app.core.root_id(), app.core.focus_id()) {
                        Ok(d) => eprintln!("{d}"),
                        Err(e) => eprintln!("Failed to dump node tree: {e}"),
                    }
                }
                exit(130);
            }
            app.event(event)?;
            if let Some(code) = app.core.take_exit_request() {
                session.stop()?;
                return Ok(code);
            }
        }
        if let Err(e) = app.repaint(&mut be) {
            report_render_error(app, &e);
            return Err(e);
        }
    }
}

/// Is this a Ctrl+C keystroke?
fn is_ctrl_c(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key::Key {
            key: key::KeyCode::Char('c'),
            mods: key::Mods { ctrl: true, .. },
        })
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translate() {
        let k = cevent::KeyEvent::new(cevent::KeyCode::Char('x'), cevent::KeyModifiers::CONTROL);
        assert_eq!(
            translate_event(cevent::Event::Key(k)),
            Some(Event::Key(key::Ctrl + 'x'))
        );
        let mut release = cevent::KeyEvent::new(cevent::KeyCode::Enter, cevent::KeyModifiers::NONE);
        release.kind = cevent::KeyEventKind::Release;
        assert_eq!(translate_event(cevent::Event::Key(release)), None);
        assert_eq!(
            translate_event(cevent::Event::FocusLost),
            Some(Event::TerminalFocus(false))
        );
        assert_eq!(
            translate_event(cevent::Event::Resize(80, 24)),
            Some(Event::Resize(Expanse::new(80, 24)))
        );
        assert!(is_ctrl_c(&Event::Key(key::Ctrl + 'c')));
        assert!(!is_ctrl_c(&Event::Key('c'.into())));
    }

    #[test]
    fn options() -> Result<()> {
        let o = RunloopOptions::from_json(r#"{"ctrl_c": "deliver"}"#)?;
        assert_eq!(o.ctrl_c, CtrlCBehavior::Deliver);
        assert!(o.panic_hook);
        assert!(matches!(
            RunloopOptions::from_json(r#"{"ctrl_c": "ignore"}"#),
            Err(Error::Config(_))
        ));
        Ok(())
    }
}
