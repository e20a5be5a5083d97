use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};
use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

use super::common::{
    CORNER_INDICES, CORNERS, Corner, MIN_INSTANCE_CAPACITY, VIEWPORT_UNIFORM_SIZE, ViewportUniform,
    grown_capacity,
};

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized with fontdue on first use and cached in an R8
/// coverage atlas for the renderer's lifetime. The cache key encodes font,
/// glyph, and pixel size, so a glyph is rasterized once per size.
pub struct TextRenderer {
    resources: Option<Resources>,
    packer: ShelfPacker,
    glyph_cache: HashMap<GlyphRasterConfig, AtlasRegion>,
    layout: Layout<()>,
    glyphs: Vec<(GlyphRasterConfig, [f32; 2], [f32; 2])>,
    instances: Vec<GlyphInstance>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            resources: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            glyph_cache: HashMap::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
            glyphs: Vec::new(),
            instances: Vec::new(),
        }
    }
}

struct Resources {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    atlas: wgpu::Texture,
    corner_vbo: wgpu::Buffer,
    corner_ibo: wgpu::Buffer,
    instance_vbo: wgpu::Buffer,
    instance_capacity: usize,
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct AtlasRegion {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws every visible text command in `draw_list` on top of `target`.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        let has_text = draw_list
            .items()
            .iter()
            .any(|item| matches!(&item.cmd, DrawCmd::Text(t) if t.is_visible()));
        if !has_text || !ctx.viewport.is_valid() {
            return;
        }

        if self.resources.as_ref().is_none_or(|r| r.format != ctx.surface_format) {
            log::debug!("building text pipeline for {:?}", ctx.surface_format);
            self.resources = Some(Resources::new(ctx));
            // New atlas texture: everything cached so far is gone.
            self.glyph_cache.clear();
            self.packer = ShelfPacker::new(ATLAS_SIZE);
        }

        let Self { resources, packer, glyph_cache, layout, glyphs, instances } = self;
        let Some(res) = resources.as_mut() else { return };

        instances.clear();
        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(cmd) = &item.cmd else { continue };
            if !cmd.is_visible() {
                continue;
            }
            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("unknown font {:?}; skipping text", cmd.font);
                continue;
            };

            layout.reset(&LayoutSettings {
                x: cmd.origin.x,
                y: cmd.origin.y,
                ..LayoutSettings::default()
            });
            layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size, 0));

            // Copied out so the layout borrow ends before the atlas is touched.
            glyphs.clear();
            glyphs.extend(
                layout
                    .glyphs()
                    .iter()
                    .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
                    .map(|g| {
                        let min = [g.x, g.y];
                        (g.key, min, [g.x + g.width as f32, g.y + g.height as f32])
                    }),
            );

            for &(key, dst_min, dst_max) in glyphs.iter() {
                let cached = glyph_cache.get(&key).copied();
                let region = match cached {
                    Some(region) => region,
                    None => {
                        let (metrics, bitmap) = font.rasterize_config(key);
                        let Some(region) =
                            res.upload_glyph(ctx, packer, &bitmap, metrics.width, metrics.height)
                        else {
                            continue;
                        };
                        glyph_cache.insert(key, region);
                        region
                    }
                };

                instances.push(GlyphInstance {
                    dst_min,
                    dst_max,
                    uv_min: region.uv_min,
                    uv_max: region.uv_max,
                    color: cmd.color.to_array(),
                });
            }
        }

        if instances.is_empty() {
            return;
        }

        res.ensure_instance_capacity(ctx.device, instances.len());

        let uniform = ViewportUniform::new(ctx.viewport);
        ctx.queue.write_buffer(&res.viewport_ubo, 0, bytemuck::bytes_of(&uniform));
        ctx.queue
            .write_buffer(&res.instance_vbo, 0, bytemuck::cast_slice(instances.as_slice()));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("daylight text pass"),
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
        rpass.draw_indexed(0..CORNER_INDICES.len() as u32, 0, 0..instances.len() as u32);
    }
}

impl Resources {
    fn new(ctx: &RenderCtx<'_>) -> Self {
        let device = ctx.device;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("daylight text shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/text.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("daylight text bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(VIEWPORT_UNIFORM_SIZE),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("daylight text pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("daylight text pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[Corner::layout(), GlyphInstance::layout()],
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

        let atlas = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("daylight glyph atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let atlas_view = atlas.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("daylight glyph sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        let viewport_ubo = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("daylight text viewport ubo"),
            size: VIEWPORT_UNIFORM_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("daylight text bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: viewport_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let corner_vbo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("daylight text corners"),
            contents: bytemuck::cast_slice(&CORNERS),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let corner_ibo = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("daylight text indices"),
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
            atlas,
            corner_vbo,
            corner_ibo,
            instance_vbo,
            instance_capacity,
        }
    }

    /// Copies one coverage bitmap into the atlas. `None` once the atlas is full.
    fn upload_glyph(
        &self,
        ctx: &RenderCtx<'_>,
        packer: &mut ShelfPacker,
        bitmap: &[u8],
        width: usize,
        height: usize,
    ) -> Option<AtlasRegion> {
        let (w, h) = (u32::try_from(width).ok()?, u32::try_from(height).ok()?);
        if w == 0 || h == 0 {
            return None;
        }

        let was_full = packer.is_full();
        let Some([x, y]) = packer.place(w, h) else {
            if !was_full {
                log::warn!("glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); dropping glyphs");
            }
            return None;
        };

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x, y, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        Some(packer.region(x, y, w, h))
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
        label: Some("daylight text instances"),
        size: (capacity * std::mem::size_of::<GlyphInstance>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

// ── atlas packing ─────────────────────────────────────────────────────────

/// Shelf packer: glyphs fill a row left to right; a glyph that does not fit
/// starts a new row below the tallest glyph of the current one.
#[derive(Debug, Clone)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    fn is_full(&self) -> bool {
        self.full
    }

    /// Top-left texel for a `w`×`h` bitmap.
    fn place(&mut self, w: u32, h: u32) -> Option<[u32; 2]> {
        if self.full {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size
            || self.cursor_y + h + GLYPH_PADDING > self.size
        {
            self.full = true;
            return None;
        }

        let at = [self.cursor_x, self.cursor_y];
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }

    fn region(&self, x: u32, y: u32, w: u32, h: u32) -> AtlasRegion {
        let s = self.size as f32;
        AtlasRegion {
            uv_min: [x as f32 / s, y as f32 / s],
            uv_max: [(x + w) as f32 / s, (y + h) as f32 / s],
        }
    }
}

// ── GPU layouts ───────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── packing ───────────────────────────────────────────────────────────

    #[test]
    fn packs_left_to_right_then_wraps() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.place(10, 8), Some([1, 1]));
        assert_eq!(p.place(10, 5), Some([12, 1]));
        // 23 + 10 + 1 > 32: next row starts under the tallest glyph
        assert_eq!(p.place(10, 4), Some([1, 10]));
    }

    #[test]
    fn full_atlas_stays_full() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.place(14, 14), Some([1, 1]));
        assert_eq!(p.place(4, 4), None);
        assert!(p.is_full());
        assert_eq!(p.place(1, 1), None);
    }

    #[test]
    fn oversized_glyph_is_rejected() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.place(20, 2), None);
    }

    #[test]
    fn region_maps_texels_to_uv() {
        let p = ShelfPacker::new(100);
        let r = p.region(10, 20, 30, 40);
        assert_eq!(r.uv_min, [0.1, 0.2]);
        assert_eq!(r.uv_max, [0.4, 0.6]);
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn glyph_instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 48);
        assert_eq!(GlyphInstance::ATTRS[4].offset, 32);
    }
}
