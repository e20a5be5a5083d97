use crate::coords::Vec2;
use crate::paint::Color;
use crate::text::FontId;

use super::{DrawCmd, DrawList, ZIndex};

/// A single line of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the line in logical pixels.
    pub origin: Vec2,
}

impl TextCmd {
    #[inline]
    pub fn is_visible(&self) -> bool {
        !self.text.is_empty()
            && self.size > 0.0
            && self.size.is_finite()
            && self.origin.is_finite()
            && self.color.a > 0.0
    }
}

impl DrawList {
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
    ) {
        self.push(
            z,
            DrawCmd::Text(TextCmd { text: text.into(), font, size, color, origin }),
        );
    }
}
