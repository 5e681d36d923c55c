//! CPU-side vertex and instance data for the exhibit pass.
//!
//! Everything here is plain data derived from the engine each frame; the
//! GPU side only uploads it.

use glam::Vec3;

use crate::engine::ExhibitEngine;
use crate::model::Model;
use crate::overlay::LabelPlacement;

/// Measurement points are drawn at this fraction of the marker size.
const MEASURE_POINT_SCALE: f32 = 0.6;
/// The focused annotation's marker is drawn this much larger.
const FOCUS_SCALE: f32 = 1.35;
/// Placement preview opacity.
const PREVIEW_ALPHA: f32 = 0.55;
/// Label badge radius in pixels.
const BADGE_RADIUS_PX: f32 = 11.0;

/// Model and marker-sphere vertex.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
}

impl MeshVertex {
    /// Vertex buffer layout (locations 0-1).
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0, // position
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1, // normal
                },
            ],
        }
    }
}

/// One marker sphere: center, radius and color.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MarkerInstance {
    /// xyz = center, w = radius.
    pub center_radius: [f32; 4],
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl MarkerInstance {
    /// Instance buffer layout (locations 2-3).
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 2,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 3,
                },
            ],
        }
    }
}

/// Measurement line endpoint.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// Position.
    pub position: [f32; 3],
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl LineVertex {
    /// Vertex buffer layout (locations 0-1).
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 12,
                    shader_location: 1,
                },
            ],
        }
    }
}

/// Screen-space label badge.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BadgeInstance {
    /// xy = pixel center (origin top-left), z = radius in pixels.
    pub center_radius: [f32; 4],
    /// Linear RGBA.
    pub color: [f32; 4],
}

impl BadgeInstance {
    /// Instance buffer layout (locations 0-1).
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 0,
                    shader_location: 0,
                },
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 16,
                    shader_location: 1,
                },
            ],
        }
    }
}

/// Per-frame dynamic geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInstances {
    /// Annotation markers, the placement preview and measurement points.
    pub markers: Vec<MarkerInstance>,
    /// Measurement line (empty or one segment).
    pub lines: Vec<LineVertex>,
    /// Visible label badges.
    pub badges: Vec<BadgeInstance>,
}

fn rgba(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha]
}

fn brighten(rgb: [f32; 3]) -> [f32; 3] {
    rgb.map(|c| (c * 1.3).min(1.0))
}

fn marker(center: Vec3, radius: f32, color: [f32; 4]) -> MarkerInstance {
    MarkerInstance {
        center_radius: center.extend(radius).to_array(),
        color,
    }
}

/// Collect this frame's markers, measurement line and label badges.
#[must_use]
pub fn collect(
    engine: &ExhibitEngine,
    labels: &[LabelPlacement],
) -> FrameInstances {
    let display = &engine.options().display;
    let radius = display.marker_radius;
    let focused = engine.detail_panel().map(|(index, _)| index);
    let mut out = FrameInstances::default();

    for (index, annotation) in engine.annotations().iter().enumerate() {
        let (scale, rgb) = if focused == Some(index) {
            (FOCUS_SCALE, brighten(display.marker_color))
        } else {
            (1.0, display.marker_color)
        };
        out.markers.push(marker(
            annotation.position(),
            radius * scale,
            rgba(rgb, 1.0),
        ));
    }

    if let Some(preview) = engine.preview().filter(|p| p.visible) {
        out.markers.push(marker(
            preview.position,
            radius,
            rgba(display.marker_color, PREVIEW_ALPHA),
        ));
    }

    let measure = rgba(display.measure_color, 1.0);
    let points = engine.measurement().points();
    for &point in points {
        out.markers
            .push(marker(point, radius * MEASURE_POINT_SCALE, measure));
    }
    if let [a, b] = points {
        out.lines = vec![
            LineVertex {
                position: a.to_array(),
                color: measure,
            },
            LineVertex {
                position: b.to_array(),
                color: measure,
            },
        ];
    }

    out.badges = labels
        .iter()
        .filter(|label| label.visible)
        .map(|label| {
            let rgb = if focused == Some(label.index) {
                brighten(display.marker_color)
            } else {
                display.marker_color
            };
            BadgeInstance {
                center_radius: [
                    label.screen.x,
                    label.screen.y,
                    BADGE_RADIUS_PX,
                    0.0,
                ],
                color: rgba(rgb, 0.9),
            }
        })
        .collect();

    out
}

/// Flatten a model into one vertex and index list.
#[must_use]
pub fn model_geometry(model: &Model) -> (Vec<MeshVertex>, Vec<u32>) {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    for mesh in model.meshes() {
        let base = vertices.len() as u32;
        vertices.extend(mesh.positions.iter().zip(&mesh.normals).map(
            |(p, n)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
            },
        ));
        indices.extend(mesh.indices.iter().map(|i| base + i));
    }
    (vertices, indices)
}

/// Unit UV sphere used for every marker.
#[must_use]
pub fn unit_sphere(segments: u32, rings: u32) -> (Vec<MeshVertex>, Vec<u32>) {
    let segments = segments.max(3);
    let rings = rings.max(2);
    let mut vertices =
        Vec::with_capacity(((segments + 1) * (rings + 1)) as usize);
    for ring in 0..=rings {
        let phi = std::f32::consts::PI * ring as f32 / rings as f32;
        for seg in 0..=segments {
            let theta = std::f32::consts::TAU * seg as f32 / segments as f32;
            let n = Vec3::new(
                phi.sin() * theta.cos(),
                phi.cos(),
                phi.sin() * theta.sin(),
            );
            vertices.push(MeshVertex {
                position: n.to_array(),
                normal: n.to_array(),
            });
        }
    }

    let stride = segments + 1;
    let mut indices = Vec::with_capacity((segments * rings * 6) as usize);
    for ring in 0..rings {
        for seg in 0..segments {
            let a = ring * stride + seg;
            let b = a + stride;
            indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    (vertices, indices)
}
