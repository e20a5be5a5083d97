use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};

use super::common::{
    CORNER_INDICES, CORNERS, Corner, MIN_INSTANCE_CAPACITY, VIEWPORT_UNIFORM_SIZE, ViewportUniform,
    grown_capacity,
};

/// Instanced renderer for `DrawCmd::Quad`.
///
/// One draw call per frame: every visible quad becomes an instance, in paint
/// order. GPU resources are created lazily and rebuilt if the surface format
/// changes.
#[derive(Default)]
pub struct QuadRenderer {
    resources: Option<Resources>,
    instances: Vec<QuadInstance>,
}

struct Resources {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    corner_vbo: wgpu::Buffer,
    corner_ibo: wgpu::Buffer,
    instance_vbo: wgpu::Buffer,
    instance_capacity: usize,
}

impl QuadRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws every visible quad in `draw_list` on top of `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
    ) {
        self.instances.clear();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Quad(q) = &item.cmd else { continue };
            if !q.is_visible() {
                continue;
            }
            self.instances.push(QuadInstance {
                center: [q.center.x, q.center.y],
                half_extents: [q.half_extents.x, q.half_extents.y],
                color: q.color.to_array(),
                rotation: q.rotation,
                _pad: 0.0,
            });
        }

        if self.instances.is_empty() || !ctx.viewport.is_valid() {
            return;
        }

        if self.resources.as_ref().is_none_or(|r| r.format != ctx.surface_format) {
            log::debug!("building quad pipeline for {:?}", ctx.surface_format);
            self.resources = Some(Resources::new(ctx));
        }
        let Some(res) = self.resources.as_mut() else { return };

        res.ensure_instance_capacity(ctx.device, self.instances.len());

        let uniform = ViewportUniform::new(ctx.viewport);
        ctx.queue.write_buffer(&res.viewport_ubo, 0, bytemuck::bytes_of(&uniform));
        ctx.queue
            .write_buffer(&res.instance_vbo, 0, bytemuck::cast_slice(&self.instances));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("daylight quad pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_pipeline(&res.pipeline);
        rpass.set_bind_group(0, &res.bind_group, &[]);
        rpass.set_vertex_buffer(0, res.corner_vbo.slice(..));
        rpass.set_vertex_buffer(1, res.instance_vbo.slice(..));
        rpass.set_index_buffer(res.corner_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..CORNER_INDICES.len() as u32, 0, 0..self.instances.len() as u32);
    }
}

impl Resources {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let device = ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("daylight quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/quad.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("daylight quad bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(VIEWPORT_UNIFORM_SIZE),
                },
                count: None,
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("daylight quad pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("daylight quad pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Corner::layout(), QuadInstance::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("daylight quad viewport ubo"),
            size: VIEWPORT_UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("daylight quad bind group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        let corner_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("daylight quad corners"),
            contents: bytemuck::cast_slice(&CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let corner_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("daylight quad indices"),
            contents: bytemuck::cast_slice(&CORNER_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let instance_capacity = MIN_INSTANCE_CAPACITY;
        let instance_vbo = create_instance_buffer(device, instance_capacity);

        Self {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            viewport_ubo,
            corner_vbo,
            corner_ibo,
            instance_vbo,
            instance_capacity,
        }
    }

    fn ensure_instance_capacity(&mut self, device: &wgpu::Device, required: usize) {
        if required <= self.instance_capacity {
            return;
        }
        self.instance_capacity = grown_capacity(required);
        self.instance_vbo = create_instance_buffer(device, self.instance_capacity);
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("daylight quad instances"),
        size: (capacity * std::mem::size_of::<QuadInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

// ── GPU layouts ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct QuadInstance {
    center: [f32; 2],
    half_extents: [f32; 2],
    color: [f32; 4],
    rotation: f32,
    _pad: f32,
}

impl QuadInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // half_extents
        3 => Float32x4, // color
        4 => Float32    // rotation
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_attributes_match_struct_layout() {
        // vertex_attr_array! packs attributes tightly, so the trailing
        // padding is the only gap the struct may have.
        let attrs = QuadInstance::ATTRS;
        assert_eq!(attrs[2].offset, std::mem::offset_of!(QuadInstance, color) as u64);
        assert_eq!(attrs[3].offset, std::mem::offset_of!(QuadInstance, rotation) as u64);
        assert_eq!(std::mem::size_of::<QuadInstance>(), 40);
    }
}
