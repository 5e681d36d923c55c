//! GPU side of the viewer: the model mesh, annotation markers, the
//! measurement line and label badges, all drawn in one pass.

pub mod instances;
pub mod pipelines;
pub mod screenshot;

use std::path::{Path, PathBuf};

use wgpu::util::DeviceExt;

use self::instances::{
    BadgeInstance, FrameInstances, LineVertex, MarkerInstance, MeshVertex,
};
use self::pipelines::ExhibitPipelines;
use crate::camera::CameraUniform;
use crate::engine::ExhibitEngine;
use crate::error::VitrineError;
use crate::gpu::dynamic_buffer::TypedBuffer;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::RenderTarget;
use crate::model::Model;
use crate::options::DisplayOptions;
use crate::overlay::LabelPlacement;

const SPHERE_SEGMENTS: u32 = 24;
const SPHERE_RINGS: u32 = 16;

/// Scene-wide uniform, mirrors `Scene` in `exhibit.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct SceneUniform {
    model_color: [f32; 4],
    viewport: [f32; 4],
}

/// Indexed triangle mesh resident on the GPU.
struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn new(
        device: &wgpu::Device,
        label: &str,
        vertices: &[MeshVertex],
        indices: &[u32],
    ) -> Self {
        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Vertices")),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} Indices")),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        Self {
            vertices: vertex_buffer,
            indices: index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

/// Draws an [`ExhibitEngine`] frame.
pub struct ExhibitRenderer {
    pipelines: ExhibitPipelines,
    camera_buffer: wgpu::Buffer,
    scene_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    camera_uniform: CameraUniform,
    scene_uniform: SceneUniform,
    model: Option<GpuMesh>,
    sphere: GpuMesh,
    markers: TypedBuffer<MarkerInstance>,
    lines: TypedBuffer<LineVertex>,
    badges: TypedBuffer<BadgeInstance>,
    depth: RenderTarget,
    clear_color: wgpu::Color,
}

impl ExhibitRenderer {
    /// Create pipelines and static resources for `context`'s surface.
    #[must_use]
    pub fn new(context: &RenderContext, display: &DisplayOptions) -> Self {
        let device = &context.device;
        let camera_uniform = CameraUniform::new();
        let (width, height) = context.size();
        let [r, g, b] = display.model_color;
        let scene_uniform = SceneUniform {
            model_color: [r, g, b, 1.0],
            viewport: [width as f32, height as f32, 0.0, 0.0],
        };

        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let scene_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Scene Buffer"),
                contents: bytemuck::cast_slice(&[scene_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };
        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Exhibit Bind Group Layout"),
                entries: &[uniform_entry(0), uniform_entry(1)],
            });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Exhibit Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: scene_buffer.as_entire_binding(),
                },
            ],
        });

        let (sphere_vertices, sphere_indices) =
            instances::unit_sphere(SPHERE_SEGMENTS, SPHERE_RINGS);
        let vertex_usage = wgpu::BufferUsages::VERTEX;
        let [r, g, b] = display.background_color;

        Self {
            pipelines: ExhibitPipelines::new(device, context.format(), &layout),
            camera_buffer,
            scene_buffer,
            bind_group,
            camera_uniform,
            scene_uniform,
            model: None,
            sphere: GpuMesh::new(
                device,
                "Marker Sphere",
                &sphere_vertices,
                &sphere_indices,
            ),
            markers: TypedBuffer::with_capacity(
                device,
                "Markers",
                16,
                vertex_usage,
            ),
            lines: TypedBuffer::with_capacity(
                device,
                "Measurement Line",
                2,
                vertex_usage,
            ),
            badges: TypedBuffer::with_capacity(
                device,
                "Label Badges",
                16,
                vertex_usage,
            ),
            depth: RenderTarget::depth(device, context.size()),
            clear_color: wgpu::Color {
                r: f64::from(r),
                g: f64::from(g),
                b: f64::from(b),
                a: 1.0,
            },
        }
    }

    /// Upload a freshly loaded model, replacing any previous one.
    pub fn upload_model(&mut self, context: &RenderContext, model: &Model) {
        let (vertices, indices) = instances::model_geometry(model);
        log::debug!(
            "uploading model '{}': {} vertices, {} triangles",
            model.name(),
            vertices.len(),
            indices.len() / 3
        );
        self.model =
            Some(GpuMesh::new(&context.device, "Model", &vertices, &indices));
    }

    /// Recreate size-dependent resources after the surface was resized.
    pub fn resize(&mut self, context: &RenderContext) {
        let (width, height) = context.size();
        self.depth = RenderTarget::depth(&context.device, (width, height));
        self.scene_uniform.viewport = [width as f32, height as f32, 0.0, 0.0];
    }

    /// Upload this frame's camera and dynamic instance data.
    pub fn prepare(
        &mut self,
        context: &RenderContext,
        engine: &ExhibitEngine,
        labels: &[LabelPlacement],
    ) {
        self.camera_uniform.update_view_proj(engine.camera());
        context.queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
        context.queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::cast_slice(&[self.scene_uniform]),
        );

        let FrameInstances {
            markers,
            lines,
            badges,
        } = instances::collect(engine, labels);
        let _ = self.markers.write(&context.device, &context.queue, &markers);
        let _ = self.lines.write(&context.device, &context.queue, &lines);
        let _ = self.badges.write(&context.device, &context.queue, &badges);
    }

    /// Draw the prepared frame to the window surface.
    ///
    /// # Errors
    ///
    /// Returns the surface error if no frame could be acquired.
    pub fn render(
        &self,
        context: &RenderContext,
    ) -> Result<(), wgpu::SurfaceError> {
        let frame = context.next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = context.create_encoder("Exhibit Frame");
        self.draw(&mut encoder, &view);
        context.submit(encoder);
        frame.present();
        Ok(())
    }

    /// Render the prepared frame off-screen and save it as a PNG in `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError`] if readback or encoding fails.
    pub fn capture(
        &self,
        context: &RenderContext,
        dir: &Path,
    ) -> Result<PathBuf, VitrineError> {
        let size = context.size();
        let target = RenderTarget::color(
            &context.device,
            "Screenshot Target",
            size,
            context.format(),
        );
        let mut encoder = context.create_encoder("Screenshot Frame");
        self.draw(&mut encoder, &target.view);
        context.submit(encoder);

        let pixels = screenshot::read_target(context, &target)?;
        screenshot::save_png(dir, pixels, target.size)
    }

    fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Exhibit Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                depth_slice: None,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: Some(
                wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                },
            ),
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        pass.set_bind_group(0, &self.bind_group, &[]);

        if let Some(model) = &self.model {
            pass.set_pipeline(&self.pipelines.mesh);
            pass.set_vertex_buffer(0, model.vertices.slice(..));
            pass.set_index_buffer(
                model.indices.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(0..model.index_count, 0, 0..1);
        }

        if !self.markers.is_empty() {
            pass.set_pipeline(&self.pipelines.marker);
            pass.set_vertex_buffer(0, self.sphere.vertices.slice(..));
            pass.set_vertex_buffer(1, self.markers.buffer().slice(..));
            pass.set_index_buffer(
                self.sphere.indices.slice(..),
                wgpu::IndexFormat::Uint32,
            );
            pass.draw_indexed(
                0..self.sphere.index_count,
                0,
                0..self.markers.count(),
            );
        }

        if !self.lines.is_empty() {
            pass.set_pipeline(&self.pipelines.line);
            pass.set_vertex_buffer(0, self.lines.buffer().slice(..));
            pass.draw(0..self.lines.count(), 0..1);
        }

        if !self.badges.is_empty() {
            pass.set_pipeline(&self.pipelines.badge);
            pass.set_vertex_buffer(0, self.badges.buffer().slice(..));
            pass.draw(0..6, 0..self.badges.count());
        }
    }
}
