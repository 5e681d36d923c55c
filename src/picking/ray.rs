//! Rays and the intersection primitives used by picking.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::model::Aabb;

/// Determinant threshold below which a ray is treated as parallel to a
/// triangle.
const TRIANGLE_EPSILON: f32 = 1e-7;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point (on the near plane for screen rays).
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Convert a screen position to a world-space ray.
    ///
    /// `screen` is in pixels with the origin at the top-left corner;
    /// `viewport` is the viewport size in pixels. The near (z=0) and far
    /// (z=1) NDC points are unprojected through the inverse view-projection.
    #[must_use]
    pub fn from_screen(screen: Vec2, viewport: Vec2, view_proj: Mat4) -> Self {
        // Convert to NDC (-1 to 1), y flipped for screen coordinates
        let ndc_x = (screen.x / viewport.x) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen.y / viewport.y) * 2.0;

        let inv_view_proj = view_proj.inverse();

        let world_near = inv_view_proj * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let world_far = inv_view_proj * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);

        // Perspective divide
        let origin = world_near.truncate() / world_near.w;
        let far = world_far.truncate() / world_far.w;

        Self {
            origin,
            direction: (far - origin).normalize_or(Vec3::NEG_Z),
        }
    }

    /// Slab test. Returns true when the ray passes through `bounds` at some
    /// `t >= 0`.
    #[must_use]
    pub fn hits_aabb(&self, bounds: &Aabb) -> bool {
        if bounds.is_empty() {
            return false;
        }
        let inv = self.direction.recip();
        let t0 = (bounds.min - self.origin) * inv;
        let t1 = (bounds.max - self.origin) * inv;
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();
        // NaN from 0 * inf (origin on a slab plane) falls through as a hit.
        !(t_far < t_near.max(0.0))
    }

    /// Möller–Trumbore ray/triangle test, double-sided. Returns the hit
    /// distance `t > 0`.
    #[must_use]
    pub fn intersect_triangle(&self, [a, b, c]: [Vec3; 3]) -> Option<f32> {
        let edge1 = b - a;
        let edge2 = c - a;
        let p = self.direction.cross(edge2);
        let det = edge1.dot(p);
        if det.abs() < TRIANGLE_EPSILON {
            return None;
        }
        let inv_det = 1.0 / det;

        let s = self.origin - a;
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(edge1);
        let v = self.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge2.dot(q) * inv_det;
        (t > TRIANGLE_EPSILON).then_some(t)
    }

    /// Ray/sphere test. Returns the nearest non-negative hit distance.
    #[must_use]
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }
        let sqrt_d = discriminant.sqrt();
        let t_near = -b - sqrt_d;
        let t_far = -b + sqrt_d;
        if t_near >= 0.0 {
            Some(t_near)
        } else if t_far >= 0.0 {
            // Origin inside the sphere.
            Some(0.0)
        } else {
            None
        }
    }
}
