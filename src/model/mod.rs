//! The exhibit model: flattened triangle geometry in model space.
//!
//! The asset's node hierarchy is baked during import (every node transform
//! is applied to its mesh vertices), so picking and rendering both work on
//! a flat list of [`ModelMesh`]es without walking parent chains.

pub mod loader;

use glam::Vec3;

pub use loader::{LoadEvent, ModelLoader};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// An inverted box that any point extends.
    pub const EMPTY: Self = Self {
        min: Vec3::splat(f32::INFINITY),
        max: Vec3::splat(f32::NEG_INFINITY),
    };

    /// Smallest box containing all `points`.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Self {
        points.iter().fold(Self::EMPTY, |mut b, &p| {
            b.extend(p);
            b
        })
    }

    /// Grow to contain `p`.
    pub fn extend(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Grow to contain `other`.
    pub fn union(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// True until at least one point was added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.cmpgt(self.max).any()
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Edge lengths.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// One triangle mesh of the exhibit, in model space.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMesh {
    /// Node or mesh name from the asset (may be empty).
    pub name: String,
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals, same length as `positions`.
    pub normals: Vec<Vec3>,
    /// Triangle list indices into `positions`.
    pub indices: Vec<u32>,
    /// Bounds of `positions`.
    pub bounds: Aabb,
}

impl ModelMesh {
    /// Build a mesh from positions and triangle indices. Normals are
    /// generated by area-weighted face accumulation. Indices that point
    /// outside `positions` drop their whole triangle.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        indices: Vec<u32>,
    ) -> Self {
        let count = positions.len();
        let indices: Vec<u32> = indices
            .chunks_exact(3)
            .filter(|tri| tri.iter().all(|&i| (i as usize) < count))
            .flatten()
            .copied()
            .collect();
        let normals = vertex_normals(&positions, &indices);
        let bounds = Aabb::from_points(&positions);
        Self {
            name: name.into(),
            positions,
            normals,
            indices,
            bounds,
        }
    }

    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Corner positions of triangle `tri`.
    #[must_use]
    pub fn triangle(&self, tri: usize) -> Option<[Vec3; 3]> {
        let idx = self.indices.get(tri * 3..tri * 3 + 3)?;
        Some([
            *self.positions.get(idx[0] as usize)?,
            *self.positions.get(idx[1] as usize)?,
            *self.positions.get(idx[2] as usize)?,
        ])
    }
}

fn vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        let face =
            (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }
    for n in &mut normals {
        *n = n.normalize_or(Vec3::Y);
    }
    normals
}

/// The loaded exhibit.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    name: String,
    meshes: Vec<ModelMesh>,
    bounds: Aabb,
}

impl Model {
    /// Assemble a model from already-transformed meshes. Meshes without
    /// triangles are dropped.
    #[must_use]
    pub fn new(name: impl Into<String>, meshes: Vec<ModelMesh>) -> Self {
        let meshes: Vec<ModelMesh> = meshes
            .into_iter()
            .filter(|m| m.triangle_count() > 0)
            .collect();
        let mut bounds = Aabb::EMPTY;
        for mesh in &meshes {
            bounds.union(&mesh.bounds);
        }
        Self {
            name: name.into(),
            meshes,
            bounds,
        }
    }

    /// Display name (usually the asset file stem).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All meshes of the flattened hierarchy.
    #[must_use]
    pub fn meshes(&self) -> &[ModelMesh] {
        &self.meshes
    }

    /// Bounds of the whole model.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Total triangle count.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.meshes.iter().map(ModelMesh::triangle_count).sum()
    }

    /// Re-center on the origin and scale uniformly so the largest bounding
    /// box dimension equals `target_size`. A non-positive size, or a
    /// degenerate model, leaves the geometry untouched.
    pub fn normalize(&mut self, target_size: f32) {
        let extent = self.bounds.size().max_element();
        if target_size <= 0.0 || self.bounds.is_empty() || extent <= 0.0 {
            return;
        }
        let center = self.bounds.center();
        let scale = target_size / extent;

        let mut bounds = Aabb::EMPTY;
        for mesh in &mut self.meshes {
            for p in &mut mesh.positions {
                *p = (*p - center) * scale;
            }
            mesh.bounds = Aabb::from_points(&mesh.positions);
            bounds.union(&mesh.bounds);
        }
        self.bounds = bounds;
        log::debug!(
            "normalized '{}' by {scale:.4} (extent {extent:.3} -> {target_size})",
            self.name
        );
    }

    /// Axis-aligned box `[min, max]` as a 12-triangle model. Used for
    /// placeholder geometry and tests.
    #[must_use]
    pub fn cuboid(name: impl Into<String>, min: Vec3, max: Vec3) -> Self {
        let positions = vec![
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ];
        #[rustfmt::skip]
        let indices = vec![
            4, 5, 6, 4, 6, 7, // +z
            1, 0, 3, 1, 3, 2, // -z
            5, 1, 2, 5, 2, 6, // +x
            0, 4, 7, 0, 7, 3, // -x
            7, 6, 2, 7, 2, 3, // +y
            0, 1, 5, 0, 5, 4, // -y
        ];
        let name = name.into();
        Self::new(name.clone(), vec![ModelMesh::new(name, positions, indices)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cuboid_has_twelve_triangles_and_bounds() {
        let model = Model::cuboid("box", Vec3::splat(-1.0), Vec3::ONE);
        assert_eq!(model.triangle_count(), 12);
        assert_eq!(model.bounds().min, Vec3::splat(-1.0));
        assert_eq!(model.bounds().max, Vec3::ONE);
    }

    #[test]
    fn normals_point_outward_on_cuboid() {
        let model = Model::cuboid("box", Vec3::splat(-1.0), Vec3::ONE);
        let mesh = &model.meshes()[0];
        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            assert!(p.dot(*n) > 0.0);
        }
    }

    #[test]
    fn normalize_centers_and_scales() {
        let mut model = Model::cuboid(
            "box",
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(20.0, 5.0, 2.0),
        );
        model.normalize(5.0);
        let b = model.bounds();
        assert!((b.size().max_element() - 5.0).abs() < 1e-5);
        assert!(b.center().length() < 1e-5);
    }

    #[test]
    fn normalize_zero_is_noop() {
        let mut model = Model::cuboid("box", Vec3::ZERO, Vec3::splat(3.0));
        let before = model.clone();
        model.normalize(0.0);
        assert_eq!(model, before);
    }

    #[test]
    fn out_of_range_indices_are_dropped() {
        let mesh = ModelMesh::new(
            "tri",
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![0, 1, 2, 0, 1, 9],
        );
        assert_eq!(mesh.triangle_count(), 1);
    }

    #[test]
    fn empty_aabb() {
        assert!(Aabb::EMPTY.is_empty());
        assert!(!Aabb::from_points(&[Vec3::ZERO]).is_empty());
    }
}
