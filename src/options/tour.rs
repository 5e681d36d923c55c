use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Tour", inline)]
#[serde(default)]
/// Annotation focus and guided tour parameters.
pub struct TourOptions {
    /// Eye offset from an annotation when it is focused. Constant, not
    /// scaled with the model.
    #[schemars(skip)]
    pub focus_offset: [f32; 3],
    /// Camera flight duration in milliseconds.
    #[schemars(title = "Flight Duration (ms)", range(min = 0, max = 5000), extend("step" = 50))]
    pub flight_duration_ms: u64,
}

impl Default for TourOptions {
    fn default() -> Self {
        Self {
            focus_offset: [2.0, 2.0, 2.0],
            flight_duration_ms: 1000,
        }
    }
}
