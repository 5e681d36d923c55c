use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Marker, measurement and model presentation settings.
pub struct DisplayOptions {
    /// Annotation marker radius in model units (also the hit-test radius).
    #[schemars(title = "Marker Size", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub marker_radius: f32,
    /// Decimal places shown for measured distances.
    #[schemars(title = "Measurement Precision", range(min = 0, max = 6))]
    pub measurement_precision: usize,
    /// Description stored when the visitor leaves it empty.
    #[schemars(skip)]
    pub default_description: String,
    /// Largest model dimension after import (0 keeps native size).
    #[schemars(skip)]
    pub normalize_size: f32,
    /// Clear color (linear RGB).
    #[schemars(skip)]
    pub background_color: [f32; 3],
    /// Base color of the exhibit surface (linear RGB).
    #[schemars(skip)]
    pub model_color: [f32; 3],
    /// Annotation marker color.
    #[schemars(skip)]
    pub marker_color: [f32; 3],
    /// Measurement point and line color.
    #[schemars(skip)]
    pub measure_color: [f32; 3],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            marker_radius: 0.08,
            measurement_precision: 3,
            default_description: "No description provided.".into(),
            normalize_size: 5.0,
            background_color: [0.08, 0.08, 0.1],
            model_color: [0.78, 0.74, 0.68],
            marker_color: [0.95, 0.35, 0.2],
            measure_color: [0.2, 0.8, 0.95],
        }
    }
}

impl DisplayOptions {
    /// Format a distance with the configured precision.
    #[must_use]
    pub fn format_distance(&self, distance: f32) -> String {
        format!("{distance:.prec$}", prec = self.measurement_precision)
    }
}
