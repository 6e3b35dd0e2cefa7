//! A small form built from the built-in widgets, for exercising the toolkit
//! by hand.

use std::{fs::File, path::PathBuf, process, sync::Mutex};

use anyhow::Context as _;
use clap::Parser;
use trellis::{
    App, Component, Context, Core, EventOutcome, NodeId, Result,
    backend::crossterm::{CtrlCBehavior, RunloopOptions, runloop_with_options},
    core::dump,
    event::{Event, key::KeyCode},
    geom::Expanse,
    layout::{Compass, Heading, Hint, Linear, Policy},
    style::{Color, Style},
    widgets::{Button, Container, Edit, Framed, Label, ScrollView, TextAlign, TextOptions},
};
use tracing_subscriber::EnvFilter;

/// Trellis widget demo
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Write logs to this file. Filtered with RUST_LOG.
    #[clap(short, long)]
    log: Option<PathBuf>,

    /// Print the component tree as JSON for a screen size and exit.
    #[clap(long, value_name = "WxH")]
    json: Option<String>,

    /// Dump the component tree when Ctrl+C is pressed.
    #[clap(long)]
    dump_on_interrupt: bool,
}

/// The root of the demo. Esc quits.
struct Demo;

impl Component for Demo {
    fn on_event(&mut self, event: &Event, ctx: &mut dyn Context) -> Result<EventOutcome> {
        match event {
            Event::Key(k) if *k == KeyCode::Esc => {
                ctx.request_exit(0);
                Ok(EventOutcome::Handled)
            }
            _ => Ok(EventOutcome::Bubble),
        }
    }
}

const INTRO: &str = "Tab moves between fields. Type into the entries, press \
                     the button with Enter, space or the mouse. Esc quits.";

/// Assemble the demo tree, returning the core and the button.
fn build() -> Result<(Core, NodeId)> {
    let mut core = Core::new(Demo)?;
    let root = core.root_id();
    core.set_layout(root, Compass)?;

    let title = core.add_child(
        root,
        Label::new("trellis")
            .with_options(TextOptions {
                wrap: false,
                align: TextAlign::Center,
            })
            .with_style(Style::new(Color::Black, Color::Cyan)),
    )?;
    core.set_hint(title, Hint::Compass(Heading::North))?;

    let form = core.add(Container::new());
    core.set_layout(form, Linear::column(Policy::Clip))?;
    core.add_child(
        form,
        Label::new(INTRO).with_options(TextOptions {
            wrap: true,
            align: TextAlign::Left,
        }),
    )?;
    core.add_child(form, Label::new(""))?;
    core.add_child(form, Label::new("Name:"))?;
    core.add_child(form, Edit::new(""))?;
    core.add_child(form, Label::new("Email:"))?;
    core.add_child(form, Edit::new(""))?;
    let button = core.add_child(form, Button::new("Press me"))?;
    let scroll = ScrollView::new().build(&mut core, form)?;
    let framed = Framed::new().with_title("form").build(&mut core, scroll)?;
    core.attach(root, framed)?;
    Ok((core, button))
}

/// Parse a `WxH` size.
fn parse_size(s: &str) -> anyhow::Result<Expanse> {
    let (w, h) = s
        .split_once('x')
        .with_context(|| format!("size must look like 80x24, got {s:?}"))?;
    Ok(Expanse::new(w.parse()?, h.parse()?))
}

fn setup_logging(path: &PathBuf) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log {
        setup_logging(path)?;
    }

    let (core, button) = build()?;
    let mut app = App::new(core, Expanse::new(80, 24));

    if let Some(size) = &args.json {
        app.resize(parse_size(size)?);
        app.core.layout()?;
        let v = dump::to_json(&app.core, app.core.root_id())?;
        println!("{}", serde_json::to_string_pretty(&v)?);
        return Ok(());
    }

    app.core.focus_first()?;
    let options = RunloopOptions {
        ctrl_c: if args.dump_on_interrupt {
            CtrlCBehavior::DumpAndExit
        } else {
            CtrlCBehavior::Exit
        },
        ..RunloopOptions::default()
    };
    let code = runloop_with_options(&mut app, options)?;
    let presses = app.core.get::<Button>(button)?.presses();
    tracing::info!(presses, code, "exiting");
    println!("button pressed {presses} times");
    process::exit(code)
}

#[cfg(test)]
mod tests {
    use trellis::testing::Harness;

    use super::*;

    #[test]
    fn demo_renders_and_quits() -> Result<()> {
        let (core, button) = build()?;
        let mut h = Harness::with_size(core, Expanse::new(40, 16))?;
        assert!(h.tbuf().contains_text("trellis"));
        assert!(h.tbuf().contains_text("┌form"));

        h.key(KeyCode::Tab)?;
        h.type_text("ann")?;
        assert!(h.tbuf().contains_text("ann"));

        h.keys([KeyCode::Tab, KeyCode::Tab, KeyCode::Enter])?;
        assert_eq!(h.get::<Button>(button)?.presses(), 1);

        h.key(KeyCode::Esc)?;
        assert_eq!(h.core().take_exit_request(), Some(0));
        Ok(())
    }

    #[test]
    fn short_terminal_scrolls_to_focused_entry() -> Result<()> {
        let (core, _) = build()?;
        let mut h = Harness::with_size(core, Expanse::new(40, 8))?;
        assert!(!h.tbuf().contains_text("Email:"));

        h.keys([KeyCode::Tab, KeyCode::Tab])?;
        h.type_text("bo")?;
        assert!(h.tbuf().contains_text("bo"));
        Ok(())
    }

    #[test]
    fn sizes() {
        assert!(parse_size("80x24").is_ok_and(|e| e == Expanse::new(80, 24)));
        assert!(parse_size("80").is_err());
    }
}
