//! Screen-to-surface picking.
//!
//! Two hit-tests share the same screen ray: [`pick_surface`] casts against
//! the model's triangles, [`pick_marker`] against committed annotation
//! markers. Neither sees the other's objects: markers, measurement
//! decorations and the placement preview are not part of the
//! [`Model`], and the preview marker is never in the marker map. A miss is
//! an ordinary `None`.

mod ray;

use glam::{Vec2, Vec3};
pub use ray::Ray;

use crate::annotation::AnnotationStore;
use crate::camera::Camera;
use crate::model::Model;

/// Nearest intersection of a ray with the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHit {
    /// Intersection point in model space.
    pub point: Vec3,
    /// Distance along the ray.
    pub distance: f32,
    /// Index into [`Model::meshes`].
    pub mesh_index: usize,
    /// Triangle index within that mesh.
    pub triangle_index: usize,
}

/// Build the world-space ray under a screen position. `None` for a
/// zero-sized viewport.
#[must_use]
pub fn screen_ray(
    screen: Vec2,
    viewport: Vec2,
    camera: &Camera,
) -> Option<Ray> {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return None;
    }
    Some(Ray::from_screen(screen, viewport, camera.build_matrix()))
}

/// Resolve the model surface point under `screen`.
#[must_use]
pub fn pick_surface(
    screen: Vec2,
    viewport: Vec2,
    camera: &Camera,
    model: &Model,
) -> Option<SurfaceHit> {
    let ray = screen_ray(screen, viewport, camera)?;
    cast_model(&ray, model)
}

/// Nearest triangle hit across every mesh of the model.
#[must_use]
pub fn cast_model(ray: &Ray, model: &Model) -> Option<SurfaceHit> {
    let mut best: Option<SurfaceHit> = None;

    for (mesh_index, mesh) in model.meshes().iter().enumerate() {
        if !ray.hits_aabb(&mesh.bounds) {
            continue;
        }
        for triangle_index in 0..mesh.triangle_count() {
            let Some(tri) = mesh.triangle(triangle_index) else {
                continue;
            };
            let Some(t) = ray.intersect_triangle(tri) else {
                continue;
            };
            if best.is_none_or(|b| t < b.distance) {
                best = Some(SurfaceHit {
                    point: ray.at(t),
                    distance: t,
                    mesh_index,
                    triangle_index,
                });
            }
        }
    }

    best
}

/// Index of the nearest committed annotation whose marker sphere the ray
/// hits. Ties on distance resolve to the lower index so the result does
/// not depend on hash-map order.
#[must_use]
pub fn pick_marker(
    ray: &Ray,
    store: &AnnotationStore,
    marker_radius: f32,
) -> Option<usize> {
    let mut best: Option<(f32, usize)> = None;

    for (marker, index) in store.markers().iter() {
        if marker.is_preview() {
            continue;
        }
        let Some(annotation) = store.get(index) else {
            continue;
        };
        let Some(t) = ray.intersect_sphere(annotation.position(), marker_radius)
        else {
            continue;
        };
        let closer =
            best.is_none_or(|(bt, bi)| t < bt || (t == bt && index < bi));
        if closer {
            best = Some((t, index));
        }
    }

    best.map(|(_, index)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelMesh;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);
    const CENTER: Vec2 = Vec2::new(400.0, 300.0);

    fn camera_at(eye: Vec3) -> Camera {
        Camera {
            eye,
            target: Vec3::ZERO,
            aspect: VIEWPORT.x / VIEWPORT.y,
            ..Camera::default()
        }
    }

    fn unit_box() -> Model {
        Model::cuboid("box", Vec3::splat(-1.0), Vec3::ONE)
    }

    #[test]
    fn center_pick_hits_front_face() {
        let camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let hit =
            pick_surface(CENTER, VIEWPORT, &camera, &unit_box()).unwrap();
        assert!((hit.point - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-4);
        assert!((hit.distance - (4.0 - 0.1)).abs() < 1e-3);
    }

    #[test]
    fn miss_returns_none() {
        let camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let corner = Vec2::new(2.0, 2.0);
        assert_eq!(pick_surface(corner, VIEWPORT, &camera, &unit_box()), None);
        assert_eq!(
            pick_surface(
                CENTER,
                VIEWPORT,
                &camera,
                &Model::new("empty", vec![])
            ),
            None
        );
        assert_eq!(
            pick_surface(CENTER, Vec2::ZERO, &camera, &unit_box()),
            None
        );
    }

    #[test]
    fn nearest_mesh_wins_across_hierarchy() {
        let far = Model::cuboid(
            "far",
            Vec3::new(-1.0, -1.0, -4.0),
            Vec3::new(1.0, 1.0, -2.0),
        );
        let near = Model::cuboid("near", Vec3::splat(-0.5), Vec3::splat(0.5));
        let mut meshes: Vec<ModelMesh> = far.meshes().to_vec();
        meshes.extend(near.meshes().iter().cloned());
        let model = Model::new("pair", meshes);

        let camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let hit = pick_surface(CENTER, VIEWPORT, &camera, &model).unwrap();
        assert_eq!(hit.mesh_index, 1);
        assert!((hit.point.z - 0.5).abs() < 1e-4);
    }

    #[test]
    fn picking_is_deterministic() {
        let camera = camera_at(Vec3::new(3.0, 2.0, 4.0));
        let model = unit_box();
        let screen = Vec2::new(410.0, 290.0);
        let a = pick_surface(screen, VIEWPORT, &camera, &model);
        let b = pick_surface(screen, VIEWPORT, &camera, &model);
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn marker_pick_resolves_nearest_index() {
        let mut store = AnnotationStore::new("");
        let _ = store.add("back", "", Some(Vec3::new(0.0, 0.0, -1.0))).unwrap();
        let _ = store.add("front", "", Some(Vec3::new(0.0, 0.0, 1.0))).unwrap();
        let _ = store.add("aside", "", Some(Vec3::new(3.0, 0.0, 0.0))).unwrap();

        let camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let ray = screen_ray(CENTER, VIEWPORT, &camera).unwrap();
        assert_eq!(pick_marker(&ray, &store, 0.1), Some(1));

        let up = screen_ray(Vec2::new(400.0, 0.0), VIEWPORT, &camera).unwrap();
        assert_eq!(pick_marker(&up, &store, 0.1), None);
    }

    #[test]
    fn marker_pick_follows_renumbering() {
        let mut store = AnnotationStore::new("");
        let _ = store.add("a", "", Some(Vec3::new(5.0, 5.0, 5.0))).unwrap();
        let _ = store.add("b", "", Some(Vec3::ZERO)).unwrap();
        let _ = store.delete_at(0).unwrap();

        let camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        let ray = screen_ray(CENTER, VIEWPORT, &camera).unwrap();
        assert_eq!(pick_marker(&ray, &store, 0.1), Some(0));
    }
}
