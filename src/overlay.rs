//! Per-frame projection of annotation positions into viewport pixels.

use glam::{Mat4, Vec2, Vec3};

use crate::annotation::AnnotationStore;

/// Where to draw one annotation's 2D label this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    /// Annotation index.
    pub index: usize,
    /// Annotation ordinal (the number shown on the label).
    pub ordinal: usize,
    /// False when the point is behind the camera or past the far plane.
    pub visible: bool,
    /// Pixel position, origin top-left. Meaningless when not visible.
    pub screen: Vec2,
}

/// Project a world point to pixel coordinates. `None` when the point is
/// behind the camera or outside the depth range.
#[must_use]
pub fn project_to_screen(
    point: Vec3,
    view_proj: Mat4,
    viewport: Vec2,
) -> Option<Vec2> {
    let clip = view_proj * point.extend(1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    if !(0.0..=1.0).contains(&ndc.z) {
        return None;
    }
    Some(Vec2::new(
        (ndc.x + 1.0) * 0.5 * viewport.x,
        (1.0 - ndc.y) * 0.5 * viewport.y,
    ))
}

/// Label placements for every annotation, in list order.
#[must_use]
pub fn layout_labels(
    store: &AnnotationStore,
    view_proj: Mat4,
    viewport: Vec2,
) -> Vec<LabelPlacement> {
    store
        .iter()
        .enumerate()
        .map(|(index, annotation)| {
            let projected =
                project_to_screen(annotation.position(), view_proj, viewport);
            LabelPlacement {
                index,
                ordinal: annotation.ordinal(),
                visible: projected.is_some(),
                screen: projected.unwrap_or(Vec2::ZERO),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    fn view_proj() -> Mat4 {
        Camera {
            eye: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            aspect: VIEWPORT.x / VIEWPORT.y,
            ..Camera::default()
        }
        .build_matrix()
    }

    #[test]
    fn target_projects_to_viewport_center() {
        let p = project_to_screen(Vec3::ZERO, view_proj(), VIEWPORT).unwrap();
        assert!((p - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn up_is_toward_top_of_screen() {
        let p = project_to_screen(Vec3::Y, view_proj(), VIEWPORT).unwrap();
        assert!(p.y < 300.0);
        assert!((p.x - 400.0).abs() < 1e-3);
    }

    #[test]
    fn point_behind_camera_is_hidden() {
        assert_eq!(
            project_to_screen(Vec3::new(0.0, 0.0, 10.0), view_proj(), VIEWPORT),
            None
        );
    }

    #[test]
    fn layout_follows_store_order_and_visibility() {
        let mut store = AnnotationStore::new("");
        let _ = store.add("front", "", Some(Vec3::ZERO)).unwrap();
        let _ = store
            .add("behind", "", Some(Vec3::new(0.0, 0.0, 8.0)))
            .unwrap();
        let labels = layout_labels(&store, view_proj(), VIEWPORT);
        assert_eq!(labels.len(), 2);
        assert!(labels[0].visible);
        assert_eq!(labels[0].ordinal, 1);
        assert!(!labels[1].visible);
        assert_eq!(labels[1].index, 1);
    }

    #[test]
    fn resize_moves_labels() {
        let mut store = AnnotationStore::new("");
        let _ = store.add("a", "", Some(Vec3::ZERO)).unwrap();
        let small = layout_labels(&store, view_proj(), Vec2::new(400.0, 300.0));
        let large = layout_labels(&store, view_proj(), VIEWPORT);
        assert!((small[0].screen * 2.0 - large[0].screen).length() < 1e-3);
    }
}
