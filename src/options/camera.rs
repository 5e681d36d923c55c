use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and control parameters.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 90.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Orbit radians per dragged pixel.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.02), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Pan distance per dragged pixel, as a fraction of orbit distance.
    #[schemars(title = "Pan Speed", range(min = 0.0002, max = 0.005), extend("step" = 0.0001))]
    pub pan_speed: f32,
    /// Zoom factor per scroll unit.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// Turntable speed in radians per second.
    #[schemars(title = "Auto-Rotate Speed", range(min = 0.05, max = 3.0), extend("step" = 0.05))]
    pub auto_rotate_speed: f32,
    /// Distance multiplier applied when framing the model.
    #[schemars(skip)]
    pub fit_padding: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 1000.0,
            rotate_speed: 0.005,
            pan_speed: 0.001,
            zoom_speed: 0.1,
            auto_rotate_speed: 0.5,
            fit_padding: 1.5,
        }
    }
}
