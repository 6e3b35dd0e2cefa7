use serde_json::{Value, json};

use super::{Align, Hint, Layout, align_span};
use crate::geom::{Expanse, Rect};

/// Each child placed independently within the full container, sized to its
/// preference and positioned by its [`Hint::Align`]. Children without an
/// alignment hint are centred on both axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aligned;

fn alignment(hints: &[Hint], i: usize) -> (Align, Align) {
    match hints.get(i) {
        Some(Hint::Align(h, v)) => (*h, *v),
        _ => (Align::Center, Align::Center),
    }
}

impl Layout for Aligned {
    fn preferred_size(&self, prefs: &[Expanse], _hints: &[Hint]) -> Expanse {
        prefs.iter().fold(Expanse::zero(), |a, p| a.max(*p))
    }

    fn arrange(&self, prefs: &[Expanse], hints: &[Hint], available: Expanse) -> Vec<Rect> {
        prefs
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let (ha, va) = alignment(hints, i);
                let (x, w) = align_span(p.w, available.w, ha);
                let (y, h) = align_span(p.h, available.h, va);
                if w == 0 || h == 0 {
                    Rect::zero()
                } else {
                    Rect::new(x, y, w, h)
                }
            })
            .collect()
    }

    fn to_json(&self) -> Value {
        json!({ "type": "aligned" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_by_hint() {
        let prefs = [Expanse::new(4, 2), Expanse::new(4, 2), Expanse::new(4, 2)];
        let hints = [
            Hint::None,
            Hint::Align(Align::End, Align::Start),
            Hint::Align(Align::Fill, Align::End),
        ];
        let r = Aligned.arrange(&prefs, &hints, Expanse::new(10, 6));
        assert_eq!(r[0], Rect::new(3, 2, 4, 2));
        assert_eq!(r[1], Rect::new(6, 0, 4, 2));
        assert_eq!(r[2], Rect::new(0, 4, 10, 2));
    }

    #[test]
    fn oversized_children_clip() {
        let r = Aligned.arrange(&[Expanse::new(40, 40)], &[], Expanse::new(10, 6));
        assert_eq!(r, vec![Rect::new(0, 0, 10, 6)]);
        assert_eq!(
            Aligned.preferred_size(&[Expanse::new(3, 9), Expanse::new(7, 1)], &[]),
            Expanse::new(7, 9)
        );
    }
}
