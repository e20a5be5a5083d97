use super::{QuadCmd, TextCmd};

/// Renderer-agnostic draw command.
///
/// Adding a shape: new variant here, push helpers next to its payload type,
/// and a matching renderer under `render`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Quad(QuadCmd),
    Text(TextCmd),
}
