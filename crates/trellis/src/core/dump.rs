use std::io::Write;

use serde_json::{Value, json};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use super::{id::NodeId, world::Core};
use crate::{
    error::{Error, Result},
    geom::{Rect, RectI32},
};

/// Traverses a tree of nodes and returns a string showing the node names and
/// geometry for each node for visual display. This is a debug function.
pub fn dump(core: &Core, root: NodeId) -> Result<String> {
    dump_with_focus(core, root, None)
}

/// Like [`dump`], marking the focused node.
pub fn dump_with_focus(core: &Core, root: NodeId, focus: Option<NodeId>) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, core, root, 0, focus)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Helper to write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

fn fmt_rect(r: Rect) -> String {
    format!("x: {}, y: {}, w: {}, h: {}", r.tl.x, r.tl.y, r.w, r.h)
}

fn fmt_signed(r: RectI32) -> String {
    format!("x: {}, y: {}, w: {}, h: {}", r.tl.x, r.tl.y, r.w, r.h)
}

/// Walk a node subtree and emit formatted debug output.
fn dump_node(
    buffer: &mut Buffer,
    core: &Core,
    node_id: NodeId,
    level: usize,
    focus: Option<NodeId>,
) -> Result<()> {
    let node = core
        .nodes
        .get(node_id)
        .ok_or(Error::NodeNotFound(node_id))?;
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.name)?;
    buffer.reset()?;
    write!(buffer, " {node_id:?}")?;
    if focus == Some(node_id) {
        write!(buffer, " ")?;
        buffer.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        write!(buffer, "FOCUSED")?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    write_field(buffer, &indent, "rect:", &fmt_rect(node.rect))?;
    write_field(buffer, &indent, "screen:", &fmt_signed(node.screen))?;
    if !node.scroll.is_zero() {
        let s = node.scroll;
        write_field(buffer, &indent, "scroll:", &format!("x: {}, y: {}", s.x, s.y))?;
    }
    if let Some(layout) = &node.layout {
        write_field(buffer, &indent, "layout:", &layout.to_json().to_string())?;
    }

    for child in &node.children {
        dump_node(buffer, core, *child, level + 1, focus)?;
    }
    Ok(())
}

/// A JSON snapshot of a subtree: each node's name, geometry, component state
/// and layout, with children nested in order.
pub fn to_json(core: &Core, root: NodeId) -> Result<Value> {
    let node = core.nodes.get(root).ok_or(Error::NodeNotFound(root))?;
    let children = node
        .children
        .iter()
        .map(|c| to_json(core, *c))
        .collect::<Result<Vec<_>>>()?;
    let r = node.rect;
    Ok(json!({
        "name": node.name.as_str(),
        "rect": [r.tl.x, r.tl.y, r.w, r.h],
        "focused": core.focus == Some(root),
        "component": node.component.as_ref().map_or(Value::Null, |c| c.to_json()),
        "layout": node.layout.as_ref().map_or(Value::Null, |l| l.to_json()),
        "children": children,
    }))
}
