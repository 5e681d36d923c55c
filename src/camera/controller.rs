use glam::{Mat3, Quat, Vec2, Vec3};

use crate::camera::core::Camera;
use crate::options::CameraOptions;

/// Smallest orbit distance allowed by zoom.
const MIN_DISTANCE: f32 = 0.05;

/// Orbital camera controller: rotation, pan, zoom and turntable spin around
/// a focus point.
///
/// The controller keeps an orbit parameterization (orientation, distance,
/// focus point) and derives [`Camera::eye`]/[`Camera::target`] from it. Pose
/// updates coming from outside the orbit math (the camera animator) go
/// through [`set_pose`](Self::set_pose), which writes the eye and target
/// verbatim and re-derives the orbit parameters from them.
#[derive(Debug, Clone)]
pub struct OrbitController {
    orientation: Quat,
    distance: f32,
    focus_point: Vec3,
    camera: Camera,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    auto_rotate_speed: f32,
    fit_padding: f32,
}

impl OrbitController {
    /// Create a controller looking down -Z at the origin.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        let focus_point = Vec3::ZERO;
        let distance = 10.0;
        let camera = Camera {
            eye: focus_point + Vec3::new(0.0, 0.0, distance),
            target: focus_point,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        Self {
            orientation: Quat::IDENTITY,
            distance,
            focus_point,
            camera,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            auto_rotate_speed: options.auto_rotate_speed,
            fit_padding: options.fit_padding,
        }
    }

    /// The live camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current eye position.
    #[must_use]
    pub fn eye(&self) -> Vec3 {
        self.camera.eye
    }

    /// Current look-at target (the orbit focus).
    #[must_use]
    pub fn target(&self) -> Vec3 {
        self.camera.target
    }

    /// Current orbit distance.
    #[must_use]
    pub fn distance(&self) -> f32 {
        self.distance
    }

    fn update_camera_pos(&mut self) {
        let dir = self.orientation * Vec3::Z;

        self.camera.eye = self.focus_point + (dir * self.distance);
        self.camera.target = self.focus_point;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Update the aspect ratio for a new viewport size. Zero-sized
    /// dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
        }
    }

    /// Orbit by a pointer drag delta in pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        // Horizontal rotation around camera's up vector
        let up = self.orientation * Vec3::Y;
        let horizontal_rotation =
            Quat::from_axis_angle(up, -delta.x * self.rotate_speed);
        self.orientation = horizontal_rotation * self.orientation;

        // Vertical rotation around camera's right vector (after horizontal
        // rotation)
        let right = self.orientation * Vec3::X;
        let vertical_rotation =
            Quat::from_axis_angle(right, -delta.y * self.rotate_speed);
        self.orientation = (vertical_rotation * self.orientation).normalize();

        self.update_camera_pos();
    }

    /// Translate the focus point in the view plane. Scaled by distance so a
    /// drag feels the same at every zoom level.
    pub fn pan(&mut self, delta: Vec2) {
        let right = self.orientation * Vec3::X;
        let up = self.orientation * Vec3::Y;
        let scale = self.pan_speed * self.distance;

        let translation = right * (-delta.x * scale) + up * (delta.y * scale);

        self.focus_point += translation;
        self.update_camera_pos();
    }

    /// Dolly toward (positive delta) or away from the focus point.
    pub fn zoom(&mut self, delta: f32) {
        let max_distance = self.camera.zfar * 0.5;
        self.distance *= 1.0 - delta * self.zoom_speed;
        self.distance = self.distance.clamp(MIN_DISTANCE, max_distance);
        self.update_camera_pos();
    }

    /// Turntable spin around the world Y axis through the focus point.
    pub fn auto_rotate(&mut self, dt_secs: f32) {
        let spin = Quat::from_rotation_y(self.auto_rotate_speed * dt_secs);
        self.orientation = (spin * self.orientation).normalize();
        self.update_camera_pos();
    }

    /// Place the camera at `eye` looking at `target`.
    ///
    /// The eye and target are stored exactly as given; orbit parameters are
    /// re-derived so subsequent rotate/pan/zoom continue from this pose.
    pub fn set_pose(&mut self, eye: Vec3, target: Vec3) {
        let offset = eye - target;
        let distance = offset.length();
        if distance > f32::EPSILON {
            let up_hint = self.orientation * Vec3::Y;
            self.orientation = orientation_facing(offset / distance, up_hint);
            self.distance = distance;
        }
        self.focus_point = target;
        self.camera.eye = eye;
        self.camera.target = target;
        self.camera.up = self.orientation * Vec3::Y;
    }

    /// Center on an axis-aligned box and back off so its bounding sphere
    /// fits the vertical field of view (with padding). Keeps the current
    /// viewing direction.
    pub fn fit_to_bounds(&mut self, min: Vec3, max: Vec3) {
        let center = (min + max) * 0.5;
        let radius = ((max - min) * 0.5).length().max(MIN_DISTANCE);

        let fovy_rad = self.camera.fovy.to_radians();
        let fit_distance = radius / (fovy_rad / 2.0).tan();

        self.focus_point = center;
        self.distance = fit_distance * self.fit_padding;
        self.update_camera_pos();
    }

    /// Return to the default front view of the given bounds.
    pub fn reset_to_bounds(&mut self, min: Vec3, max: Vec3) {
        self.orientation = Quat::IDENTITY;
        self.fit_to_bounds(min, max);
    }
}

/// Orientation whose local +Z points along `dir`, keeping local +Y as close
/// to `up_hint` as possible.
fn orientation_facing(dir: Vec3, up_hint: Vec3) -> Quat {
    let z = dir;
    let mut x = up_hint.cross(z);
    if x.length_squared() < 1e-8 {
        x = z.any_orthonormal_vector();
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> OrbitController {
        OrbitController::new(&CameraOptions::default(), 1.5)
    }

    #[test]
    fn set_pose_keeps_exact_eye_and_target() {
        let mut c = controller();
        let eye = Vec3::new(3.3, -1.7, 2.9);
        let target = Vec3::new(0.1, 0.2, 0.3);
        c.set_pose(eye, target);
        assert_eq!(c.eye(), eye);
        assert_eq!(c.target(), target);
        assert!((c.distance() - (eye - target).length()).abs() < 1e-5);
    }

    #[test]
    fn rotate_after_set_pose_preserves_distance() {
        let mut c = controller();
        c.set_pose(Vec3::new(4.0, 0.0, 0.0), Vec3::ZERO);
        c.rotate(Vec2::new(25.0, -10.0));
        assert!((c.eye().length() - 4.0).abs() < 1e-4);
        assert_eq!(c.target(), Vec3::ZERO);
    }

    #[test]
    fn fit_to_bounds_centers_on_box() {
        let mut c = controller();
        c.fit_to_bounds(Vec3::splat(-1.0), Vec3::new(3.0, 1.0, 1.0));
        assert_eq!(c.target(), Vec3::new(1.0, 0.0, 0.0));
        assert!(c.distance() > 2.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut c = controller();
        for _ in 0..200 {
            c.zoom(5.0);
        }
        assert!(c.distance() >= MIN_DISTANCE);
    }

    #[test]
    fn auto_rotate_orbits_around_y() {
        let mut c = controller();
        let before = c.eye();
        c.auto_rotate(1.0);
        assert!((c.eye().y - before.y).abs() < 1e-5);
        assert!((c.eye().length() - before.length()).abs() < 1e-4);
        assert_ne!(c.eye(), before);
    }
}
