//! Tab traversal and focus bookkeeping across a small form.

#[cfg(test)]
mod tests {
    use trellis::{
        Core, NodeId, Result,
        event::key::{self, KeyCode},
        geom::Expanse,
        layout::{Linear, Policy},
        testing::Harness,
        widgets::{Button, Container, Edit, Label},
    };

    /// A label, two entries and a button stacked in a column.
    fn form() -> Result<(Harness, Vec<NodeId>)> {
        let mut core = Core::new(Container::new())?;
        let root = core.root_id();
        core.set_layout(root, Linear::column(Policy::Clip))?;
        core.add_child(root, Label::new("Name:"))?;
        let first = core.add_child(root, Edit::new(""))?;
        let second = core.add_child(root, Edit::new(""))?;
        let ok = core.add_child(root, Button::new("ok"))?;
        let h = Harness::with_size(core, Expanse::new(20, 6))?;
        Ok((h, vec![first, second, ok]))
    }

    #[test]
    fn tab_walks_focusable_nodes_in_order() -> Result<()> {
        let (mut h, ids) = form()?;
        assert_eq!(h.core().focus_id(), None);

        h.key(KeyCode::Tab)?;
        assert_eq!(h.core().focus_id(), Some(ids[0]));
        h.type_text("ab")?;
        h.key(KeyCode::Tab)?;
        h.type_text("c")?;
        h.key(KeyCode::Tab)?;
        assert_eq!(h.core().focus_id(), Some(ids[2]));
        h.key(KeyCode::Enter)?;

        // Wraps at the end, and back again.
        h.key(KeyCode::Tab)?;
        assert_eq!(h.core().focus_id(), Some(ids[0]));
        h.key(KeyCode::BackTab)?;
        assert_eq!(h.core().focus_id(), Some(ids[2]));
        h.key(key::Shift + KeyCode::Tab)?;
        assert_eq!(h.core().focus_id(), Some(ids[1]));

        assert_eq!(h.get::<Edit>(ids[0])?.value(), "ab");
        assert_eq!(h.get::<Edit>(ids[1])?.value(), "c");
        assert_eq!(h.get::<Button>(ids[2])?.presses(), 1);
        Ok(())
    }

    #[test]
    fn detaching_focused_node_empties_cursor() -> Result<()> {
        let (mut h, ids) = form()?;
        h.core().set_focus(ids[1])?;
        h.core().detach(ids[1])?;
        assert_eq!(h.core().focus_id(), None);
        h.render()?;

        h.key(KeyCode::Tab)?;
        assert_eq!(h.core().focus_id(), Some(ids[0]));
        Ok(())
    }

    #[test]
    fn click_focuses_entry() -> Result<()> {
        let (mut h, ids) = form()?;
        // Rows: label 0, entries 1 and 2, button 3.
        h.click(0, 2)?;
        assert_eq!(h.core().focus_id(), Some(ids[1]));
        h.type_text("xy")?;
        assert!(h.tbuf().contains_text("xy"));
        Ok(())
    }
}
