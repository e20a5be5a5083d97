//! GPU rendering.
//!
//! Renderers own their wgpu resources (pipelines, buffers) and consume a
//! `scene::DrawList`.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down)
//! - the vertex shader converts to NDC from a viewport uniform
//! - quads are drawn in one pass and text in a later one, so text always
//!   lands on top of quads

mod common;
mod ctx;
pub mod quad;
pub mod text;

pub use ctx::{RenderCtx, RenderTarget};
pub use quad::QuadRenderer;
pub use text::TextRenderer;
