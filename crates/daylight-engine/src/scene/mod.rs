//! Scene (draw stream) types.
//!
//! The app records a `DrawList` each frame; renderers walk it in paint order
//! (z-index, then insertion order).

mod cmd;
mod key;
mod list;
mod quad;
mod text;

pub use cmd::DrawCmd;
pub use key::{SortKey, ZIndex};
pub use list::{DrawItem, DrawList};
pub use quad::QuadCmd;
pub use text::TextCmd;
