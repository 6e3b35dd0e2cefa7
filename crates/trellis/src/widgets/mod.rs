//! A small set of built-in components.

mod button;
mod container;
mod edit;
mod filled_box;
mod framed;
mod label;
mod scroll;

pub use button::Button;
pub use container::Container;
pub use edit::Edit;
pub use filled_box::FilledBox;
pub use framed::{DOUBLE, Framed, FrameGlyphs, SINGLE};
pub use label::{Label, TextAlign, TextOptions};
pub use scroll::ScrollView;
