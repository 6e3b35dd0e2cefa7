//! What reaches the terminal across repaint cycles.

#[cfg(test)]
mod tests {
    use trellis::{
        Core, Result, buf,
        geom::Expanse,
        layout::{Linear, Policy},
        testing::Harness,
        widgets::{Container, FilledBox, Label},
    };

    #[test]
    fn resize_rewrites_only_revealed_rows() -> Result<()> {
        let mut h = Harness::for_component(FilledBox::new('.'), Expanse::new(80, 24))?;
        assert_eq!(h.backend.rows_written(), (0..24).collect::<Vec<u32>>());
        h.backend.clear();

        h.resize(80, 30)?;
        assert_eq!(h.backend.rows_written(), (24..30).collect::<Vec<u32>>());
        Ok(())
    }

    #[test]
    fn unchanged_tree_writes_nothing() -> Result<()> {
        let mut h = Harness::for_component(FilledBox::new('.'), Expanse::new(10, 4))?;
        h.backend.clear();
        assert!(!h.render()?);
        assert!(h.backend.is_empty());
        Ok(())
    }

    #[test]
    fn text_change_touches_one_row() -> Result<()> {
        let mut core = Core::new(Container::new())?;
        let root = core.root_id();
        core.set_layout(root, Linear::column(Policy::Clip))?;
        core.add_child(root, Label::new("header"))?;
        let status = core.add_child(root, Label::new("idle"))?;
        core.add_child(root, Label::new("footer"))?;
        let mut h = Harness::with_size(core, Expanse::new(10, 3))?;
        h.tbuf().assert_matches(buf!("header" "idle" "footer"));
        h.backend.clear();

        h.update::<Label, _>(status, |l, ctx| l.set_text(ctx, "busy"))?;
        assert_eq!(h.backend.rows_written(), vec![1]);
        assert!(h.backend.contains_text("busy"));
        h.tbuf().assert_matches(buf!("header" "busy" "footer"));
        Ok(())
    }

    #[test]
    fn shrinking_sibling_clears_old_area() -> Result<()> {
        let mut core = Core::new(Container::new())?;
        let root = core.root_id();
        core.set_layout(root, Linear::row(Policy::Clip))?;
        let a = core.add_child(root, FilledBox::new('a').with_size((4, 1)))?;
        core.add_child(root, FilledBox::new('b').with_size((2, 1)))?;
        let mut h = Harness::with_size(core, Expanse::new(8, 1))?;
        h.tbuf().assert_matches(buf!("aaaabbXX"));

        h.core().detach(a)?;
        h.render()?;
        h.tbuf().assert_matches(buf!("bbXXXXXX"));
        Ok(())
    }
}
