//! wgpu implementation of [`RenderBackend`].
//!
//! One render pass per frame: opaque geometry, then textured billboard
//! screens, then blended window panes with depth writes off. All three
//! share the `city.wgsl` shader and bind group 0 (camera, environment,
//! lights); group 1 selects the texture (a white texel for untextured
//! batches).

use wgpu::util::DeviceExt;

use super::lights::{pack_scene, PackedLighting};
use super::mesh::{bake_scene, MeshBuffer, SceneVertex};
use super::RenderBackend;
use crate::camera::{Camera, CameraUniform};
use crate::gpu::pipeline_helpers;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::{DepthTarget, SampledTexture};
use crate::scene::Scene;
use crate::util::color::linear_rgb;

/// Uploaded vertex and index buffers for one batch.
struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    /// Upload a batch; `None` when it is empty.
    fn upload(device: &wgpu::Device, label: &str, mesh: &MeshBuffer) -> Option<Self> {
        if mesh.is_empty() {
            return None;
        }
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Vertices")),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} Indices")),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Some(Self {
            vertices,
            indices,
            index_count: mesh.indices.len() as u32,
        })
    }

    fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.set_index_buffer(self.indices.slice(..), wgpu::IndexFormat::Uint32);
        pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Baked scene resident on the GPU.
#[derive(Default)]
struct LoadedScene {
    opaque: Option<GpuMesh>,
    transparent: Option<GpuMesh>,
    textured: Vec<(wgpu::BindGroup, GpuMesh)>,
}

/// Draws a [`Scene`] into a window surface.
pub struct SceneRenderer {
    context: RenderContext,
    depth: DepthTarget,
    opaque_pipeline: wgpu::RenderPipeline,
    transparent_pipeline: wgpu::RenderPipeline,
    texture_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white_bind_group: wgpu::BindGroup,
    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    environment_buffer: wgpu::Buffer,
    lights_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    clear_color: wgpu::Color,
    loaded: LoadedScene,
}

impl SceneRenderer {
    /// Build pipelines and uniform buffers on an initialized context.
    #[must_use]
    pub fn new(context: RenderContext) -> Self {
        let device = &context.device;
        let (width, height) = context.size();
        let depth = DepthTarget::new(device, width, height);

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Layout"),
            entries: &[
                pipeline_helpers::uniform_buffer(0),
                pipeline_helpers::uniform_buffer(1),
                pipeline_helpers::uniform_buffer(2),
            ],
        });
        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Texture Layout"),
            entries: &[
                pipeline_helpers::texture_2d(0),
                pipeline_helpers::filtering_sampler(1),
            ],
        });

        let camera_uniform = CameraUniform::new();
        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Uniform"),
            contents: bytemuck::bytes_of(&camera_uniform),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lighting = pack_scene(&Scene::default());
        let environment_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Environment Uniform"),
            contents: bytemuck::bytes_of(&lighting.environment),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let lights_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Lights Uniform"),
            contents: bytemuck::bytes_of(&lighting.lights),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: environment_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: lights_buffer.as_entire_binding(),
                },
            ],
        });

        let sampler = pipeline_helpers::linear_sampler(device, "Billboard Sampler");
        let white = SampledTexture::white(device, &context.queue);
        let white_bind_group = texture_bind_group(device, &texture_layout, &sampler, &white);

        let layouts = [&frame_layout, &texture_layout];
        let opaque_pipeline = create_scene_pipeline(&context, "Opaque Pipeline", &layouts, false);
        let transparent_pipeline =
            create_scene_pipeline(&context, "Transparent Pipeline", &layouts, true);

        Self {
            context,
            depth,
            opaque_pipeline,
            transparent_pipeline,
            texture_layout,
            sampler,
            white_bind_group,
            camera_uniform,
            camera_buffer,
            environment_buffer,
            lights_buffer,
            frame_bind_group,
            clear_color: wgpu::Color::BLACK,
            loaded: LoadedScene::default(),
        }
    }

    fn write_lighting(&self, lighting: &PackedLighting) {
        let queue = &self.context.queue;
        queue.write_buffer(
            &self.environment_buffer,
            0,
            bytemuck::bytes_of(&lighting.environment),
        );
        queue.write_buffer(&self.lights_buffer, 0, bytemuck::bytes_of(&lighting.lights));
    }
}

impl RenderBackend for SceneRenderer {
    type Error = wgpu::SurfaceError;

    fn load_scene(&mut self, scene: &Scene) {
        let device = &self.context.device;
        let batches = bake_scene(scene);

        let mut textured = Vec::with_capacity(batches.textured.len());
        for (id, mesh) in &batches.textured {
            let Some(mesh) = GpuMesh::upload(device, "Screen", mesh) else {
                continue;
            };
            let bind_group = if let Some(image) = scene.textures.get(id.0) {
                let texture = SampledTexture::from_image(
                    device,
                    &self.context.queue,
                    &format!("Billboard Texture {}", id.0),
                    image,
                );
                texture_bind_group(device, &self.texture_layout, &self.sampler, &texture)
            } else {
                log::warn!("texture {} missing from scene, drawing untextured", id.0);
                texture_bind_group(
                    device,
                    &self.texture_layout,
                    &self.sampler,
                    &SampledTexture::white(device, &self.context.queue),
                )
            };
            textured.push((bind_group, mesh));
        }

        self.loaded = LoadedScene {
            opaque: GpuMesh::upload(device, "Opaque", &batches.opaque),
            transparent: GpuMesh::upload(device, "Transparent", &batches.transparent),
            textured,
        };
        self.write_lighting(&pack_scene(scene));

        let [r, g, b] = linear_rgb(scene.background);
        self.clear_color = wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        };
        log::info!(
            "scene uploaded: {} nodes, {} lights, {} textures",
            scene.nodes.len(),
            scene.lights.len(),
            scene.textures.len()
        );
    }

    fn set_camera(&mut self, camera: &Camera) {
        self.camera_uniform.update_view_proj(camera);
        self.context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::bytes_of(&self.camera_uniform),
        );
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTarget::new(&self.context.device, width, height);
    }

    fn render(&mut self) -> Result<(), Self::Error> {
        let mut frame = self.context.begin_frame()?;
        {
            let mut pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("City Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                ..Default::default()
            });
            pass.set_bind_group(0, &self.frame_bind_group, &[]);

            pass.set_pipeline(&self.opaque_pipeline);
            if let Some(mesh) = &self.loaded.opaque {
                pass.set_bind_group(1, &self.white_bind_group, &[]);
                mesh.draw(&mut pass);
            }
            for (bind_group, mesh) in &self.loaded.textured {
                pass.set_bind_group(1, bind_group, &[]);
                mesh.draw(&mut pass);
            }
            if let Some(mesh) = &self.loaded.transparent {
                pass.set_pipeline(&self.transparent_pipeline);
                pass.set_bind_group(1, &self.white_bind_group, &[]);
                mesh.draw(&mut pass);
            }
        }
        self.context.present(frame);
        Ok(())
    }
}

fn texture_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    texture: &SampledTexture,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Texture Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&texture.view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}

fn create_scene_pipeline(
    context: &RenderContext,
    label: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    blended: bool,
) -> wgpu::RenderPipeline {
    let shader = context
        .device
        .create_shader_module(wgpu::include_wgsl!("../../assets/shaders/city.wgsl"));

    let pipeline_layout = context
        .device
        .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            bind_group_layouts,
            push_constant_ranges: &[],
        });

    let blend = if blended {
        wgpu::BlendState::ALPHA_BLENDING
    } else {
        wgpu::BlendState::REPLACE
    };

    context
        .device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(label),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[SceneVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: context.format(),
                    blend: Some(blend),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(pipeline_helpers::depth_stencil_state(!blended)),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
}
