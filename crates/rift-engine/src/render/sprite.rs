use wgpu::util::DeviceExt;

use crate::render::{RenderCtx, RenderTarget};

use super::batch::{DrawBatch, SpriteVertex, TextureId, MAX_BATCH_QUADS};
use super::common::{quad_indices, straight_alpha_blend, viewport_ubo_min_binding_size, ViewportUniform};

// ── textures ──────────────────────────────────────────────────────────────

struct SpriteTexture {
    // Kept alive for the bind group's view.
    _texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
}

// ── renderer ──────────────────────────────────────────────────────────────

/// Replays a frame's [`DrawBatch`] onto the surface.
///
/// One pipeline, one nearest-filtered sampler, one bind group per uploaded
/// texture. Each closed batch becomes one indexed draw over a static index
/// buffer sized for [`MAX_BATCH_QUADS`]. The logical screen is placed with the
/// context's letterbox via the pass viewport; the uniform stays in logical
/// pixels.
#[derive(Default)]
pub struct SpriteRenderer {
    // pipeline
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,

    // shared bindings
    viewport_ubo: Option<wgpu::Buffer>,
    sampler: Option<wgpu::Sampler>,

    textures: Vec<SpriteTexture>,

    // geometry
    index_buffer: Option<wgpu::Buffer>,
    vertex_buffer: Option<wgpu::Buffer>,
    vertex_capacity: usize,
}

impl SpriteRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads an RGBA8 image and returns its handle.
    ///
    /// Handles are dense and assigned in upload order, starting at 0.
    pub fn upload_texture(
        &mut self,
        ctx: &RenderCtx<'_>,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> TextureId {
        self.ensure_pipeline(ctx);
        self.ensure_shared_bindings(ctx);

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("rift sprite texture"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let id = TextureId(self.textures.len() as u32);

        let (Some(bgl), Some(ubo), Some(sampler)) = (
            self.bind_group_layout.as_ref(),
            self.viewport_ubo.as_ref(),
            self.sampler.as_ref(),
        ) else {
            log::error!("SpriteRenderer: pipeline unavailable, texture {id:?} will not draw");
            return id;
        };

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("rift sprite bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });

        self.textures.push(SpriteTexture { _texture: texture, bind_group });
        log::debug!("SpriteRenderer: uploaded {width}x{height} texture as {id:?}");
        id
    }

    /// Draws every closed batch of `batch` in order.
    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, batch: &DrawBatch) {
        let batches = batch.batches();
        if batches.is_empty() {
            return;
        }

        self.ensure_pipeline(ctx);
        self.ensure_shared_bindings(ctx);
        self.ensure_index_buffer(ctx);
        self.write_viewport_uniform(ctx);

        let total: usize = batches.iter().map(|b| b.vertices.len()).sum();
        self.ensure_vertex_capacity(ctx, total);

        let Some(vertex_buffer) = self.vertex_buffer.as_ref() else { return; };

        // Upload every batch back to back; each draw addresses its own slice.
        let stride = std::mem::size_of::<SpriteVertex>() as u64;
        let mut ranges = Vec::with_capacity(batches.len());
        let mut offset = 0u64;
        for b in batches {
            let bytes = b.vertices.len() as u64 * stride;
            ctx.queue.write_buffer(vertex_buffer, offset, bytemuck::cast_slice(&b.vertices));
            ranges.push((b.texture, offset..offset + bytes, b.quad_count() as u32));
            offset += bytes;
        }

        let Some(pipeline) = self.pipeline.as_ref() else { return; };
        let Some(index_buffer) = self.index_buffer.as_ref() else { return; };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("rift sprite pass"),
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

        let (x, y, w, h) = ctx.letterbox.clipped_rect();
        rpass.set_viewport(x, y, w, h, 0.0, 1.0);
        rpass.set_scissor_rect(x as u32, y as u32, w as u32, h as u32);

        rpass.set_pipeline(pipeline);
        rpass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint16);

        for (texture, range, quads) in ranges {
            let Some(tex) = self.textures.get(texture.0 as usize) else {
                log::warn!("SpriteRenderer: unknown {texture:?}, skipping batch");
                continue;
            };
            rpass.set_bind_group(0, &tex.bind_group, &[]);
            rpass.set_vertex_buffer(0, vertex_buffer.slice(range));
            rpass.draw_indexed(0..quads * 6, 0, 0..1);
        }
    }

    // ── lazy-init helpers ──────────────────────────────────────────────────

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("rift sprite shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sprite.wgsl").into()),
        });

        // Reuse the layout across surface-format changes so existing texture
        // bind groups stay valid.
        if self.bind_group_layout.is_none() {
            self.bind_group_layout = Some(ctx.device.create_bind_group_layout(
                &wgpu::BindGroupLayoutDescriptor {
                    label: Some("rift sprite bgl"),
                    entries: &[
                        wgpu::BindGroupLayoutEntry {
                            binding: 0,
                            visibility: wgpu::ShaderStages::VERTEX,
                            ty: wgpu::BindingType::Buffer {
                                ty: wgpu::BufferBindingType::Uniform,
                                has_dynamic_offset: false,
                                min_binding_size: Some(viewport_ubo_min_binding_size()),
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
                },
            ));
        }
        let Some(bgl) = self.bind_group_layout.as_ref() else { return; };

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("rift sprite pipeline layout"),
            bind_group_layouts: &[bgl],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("rift sprite pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[SpriteVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(straight_alpha_blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
    }

    fn ensure_shared_bindings(&mut self, ctx: &RenderCtx<'_>) {
        if self.viewport_ubo.is_none() {
            self.viewport_ubo = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("rift sprite viewport ubo"),
                size: std::mem::size_of::<ViewportUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
        }
        if self.sampler.is_none() {
            self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
                label: Some("rift sprite sampler"),
                address_mode_u: wgpu::AddressMode::ClampToEdge,
                address_mode_v: wgpu::AddressMode::ClampToEdge,
                address_mode_w: wgpu::AddressMode::ClampToEdge,
                mag_filter: wgpu::FilterMode::Nearest,
                min_filter: wgpu::FilterMode::Nearest,
                mipmap_filter: wgpu::MipmapFilterMode::Nearest,
                ..Default::default()
            }));
        }
    }

    fn ensure_index_buffer(&mut self, ctx: &RenderCtx<'_>) {
        if self.index_buffer.is_some() {
            return;
        }
        self.index_buffer = Some(ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("rift sprite ibo"),
            contents: bytemuck::cast_slice(&quad_indices(MAX_BATCH_QUADS)),
            usage: wgpu::BufferUsages::INDEX,
        }));
    }

    fn write_viewport_uniform(&mut self, ctx: &RenderCtx<'_>) {
        let Some(ubo) = self.viewport_ubo.as_ref() else { return; };
        let w = ctx.viewport.width.max(1.0);
        let h = ctx.viewport.height.max(1.0);
        ctx.queue.write_buffer(
            ubo,
            0,
            bytemuck::bytes_of(&ViewportUniform { viewport: [w, h], _pad: [0.0; 2] }),
        );
    }

    fn ensure_vertex_capacity(&mut self, ctx: &RenderCtx<'_>, required: usize) {
        if required <= self.vertex_capacity && self.vertex_buffer.is_some() {
            return;
        }
        let new_cap = required.next_power_of_two().max(256);
        let new_size = (new_cap * std::mem::size_of::<SpriteVertex>()) as u64;
        self.vertex_buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("rift sprite vbo"),
            size: new_size,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        }));
        self.vertex_capacity = new_cap;
    }
}
