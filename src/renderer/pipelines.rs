//! Render pipelines for the exhibit pass. All four share one WGSL module
//! and one bind group (camera + scene uniforms).

use super::instances::{BadgeInstance, LineVertex, MarkerInstance, MeshVertex};
use crate::gpu::texture::DEPTH_FORMAT;

/// Shared depth/blend configuration for one pipeline.
struct PipelineDesc<'a> {
    label: &'a str,
    vs: &'a str,
    fs: &'a str,
    buffers: &'a [wgpu::VertexBufferLayout<'a>],
    topology: wgpu::PrimitiveTopology,
    cull_mode: Option<wgpu::Face>,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
    blend: Option<wgpu::BlendState>,
}

/// The exhibit pass pipelines.
pub struct ExhibitPipelines {
    /// Lit model triangles.
    pub mesh: wgpu::RenderPipeline,
    /// Instanced marker spheres.
    pub marker: wgpu::RenderPipeline,
    /// Measurement line, drawn over the model.
    pub line: wgpu::RenderPipeline,
    /// Screen-space label badges.
    pub badge: wgpu::RenderPipeline,
}

impl ExhibitPipelines {
    /// Build every pipeline against `format` and the shared bind group
    /// layout.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Exhibit Shader"),
            source: wgpu::ShaderSource::Wgsl(
                include_str!("../../assets/shaders/exhibit.wgsl").into(),
            ),
        });
        let layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Exhibit Pipeline Layout"),
                bind_group_layouts: &[bind_group_layout],
                push_constant_ranges: &[],
            });
        let build = |desc: &PipelineDesc<'_>| {
            create_pipeline(device, &layout, &shader, format, desc)
        };

        let mesh = build(&PipelineDesc {
            label: "Model",
            vs: "vs_mesh",
            fs: "fs_lit",
            buffers: &[MeshVertex::layout()],
            topology: wgpu::PrimitiveTopology::TriangleList,
            // imported assets are not reliably wound
            cull_mode: None,
            depth_write: true,
            depth_compare: wgpu::CompareFunction::Less,
            blend: None,
        });
        let marker = build(&PipelineDesc {
            label: "Markers",
            vs: "vs_marker",
            fs: "fs_lit",
            buffers: &[MeshVertex::layout(), MarkerInstance::layout()],
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: Some(wgpu::Face::Back),
            depth_write: true,
            depth_compare: wgpu::CompareFunction::LessEqual,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        });
        let line = build(&PipelineDesc {
            label: "Measurement Line",
            vs: "vs_line",
            fs: "fs_flat",
            buffers: &[LineVertex::layout()],
            topology: wgpu::PrimitiveTopology::LineList,
            cull_mode: None,
            depth_write: false,
            depth_compare: wgpu::CompareFunction::Always,
            blend: None,
        });
        let badge = build(&PipelineDesc {
            label: "Label Badges",
            vs: "vs_badge",
            fs: "fs_badge",
            buffers: &[BadgeInstance::layout()],
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            depth_write: false,
            depth_compare: wgpu::CompareFunction::Always,
            blend: Some(wgpu::BlendState::ALPHA_BLENDING),
        });

        Self {
            mesh,
            marker,
            line,
            badge,
        }
    }
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    desc: &PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some(desc.vs),
            buffers: desc.buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some(desc.fs),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: desc.blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: desc.topology,
            cull_mode: desc.cull_mode,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: desc.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}
