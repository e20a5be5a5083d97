use crate::coords::Vec2;
use crate::paint::Color;

use super::{DrawCmd, DrawList, ZIndex};

/// Solid quad rotated about its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadCmd {
    pub center: Vec2,
    /// Half width / half height in logical pixels.
    pub half_extents: Vec2,
    /// Clockwise on screen, in radians.
    pub rotation: f32,
    pub color: Color,
}

impl QuadCmd {
    /// Axis-aligned quad from a top-left corner and size.
    #[inline]
    pub fn from_rect(origin: Vec2, size: Vec2, color: Color) -> Self {
        let half = size * 0.5;
        Self { center: origin + half, half_extents: half, rotation: 0.0, color }
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.half_extents.x > 0.0
            && self.half_extents.y > 0.0
            && self.center.is_finite()
            && self.rotation.is_finite()
            && self.color.is_finite()
            && self.color.a > 0.0
    }
}

impl DrawList {
    #[inline]
    pub fn push_quad(&mut self, z: ZIndex, quad: QuadCmd) {
        self.push(z, DrawCmd::Quad(quad));
    }

    /// Axis-aligned solid rectangle.
    #[inline]
    pub fn push_rect(&mut self, z: ZIndex, origin: Vec2, size: Vec2, color: Color) {
        self.push_quad(z, QuadCmd::from_rect(origin, size, color));
    }

    /// Rectangle outline drawn as four edge quads inside `origin..origin+size`.
    pub fn push_frame(&mut self, z: ZIndex, origin: Vec2, size: Vec2, width: f32, color: Color) {
        let w = width.min(size.x * 0.5).min(size.y * 0.5);
        if w <= 0.0 {
            return;
        }
        let inner_h = size.y - 2.0 * w;
        self.push_rect(z, origin, Vec2::new(size.x, w), color);
        self.push_rect(z, Vec2::new(origin.x, origin.y + size.y - w), Vec2::new(size.x, w), color);
        self.push_rect(z, Vec2::new(origin.x, origin.y + w), Vec2::new(w, inner_h), color);
        self.push_rect(
            z,
            Vec2::new(origin.x + size.x - w, origin.y + w),
            Vec2::new(w, inner_h),
            color,
        );
    }
}
