//! GPU layouts shared by the instanced renderers.

use bytemuck::{Pod, Zeroable};

use crate::coords::Viewport;

pub(crate) const MIN_INSTANCE_CAPACITY: usize = 64;

/// Instance buffer size for at least `required` instances.
pub(crate) fn grown_capacity(required: usize) -> usize {
    required.next_power_of_two().max(MIN_INSTANCE_CAPACITY)
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct ViewportUniform {
    size: [f32; 2],
    _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(crate) fn new(viewport: Viewport) -> Self {
        Self {
            size: [viewport.width.max(1.0), viewport.height.max(1.0)],
            _pad: [0.0; 2],
        }
    }
}

pub(crate) const VIEWPORT_UNIFORM_SIZE: u64 = std::mem::size_of::<ViewportUniform>() as u64;

/// Unit quad corner in `[-1, 1]`, vertex location 0.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct Corner {
    pos: [f32; 2],
}

impl Corner {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Corner>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(crate) const CORNERS: [Corner; 4] = [
    Corner { pos: [-1.0, -1.0] },
    Corner { pos: [1.0, -1.0] },
    Corner { pos: [1.0, 1.0] },
    Corner { pos: [-1.0, 1.0] },
];

pub(crate) const CORNER_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];
