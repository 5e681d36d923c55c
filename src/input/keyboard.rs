use serde::{Deserialize, Serialize};

use crate::engine::ExhibitCommand;

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// tour_next = "ArrowRight"
/// take_screenshot = "KeyP"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Start or stop the turntable spin.
    ToggleAutoRotate,
    /// Enter or leave fullscreen.
    ToggleFullscreen,
    /// Export the current view as an image.
    TakeScreenshot,
    /// Close whatever mode or panel is open.
    Cancel,
    /// Advance the tour.
    TourNext,
    /// Step the tour back.
    TourPrev,
    /// Enter or leave measuring mode.
    ToggleMeasuring,
    /// Enter annotation placement mode.
    BeginPlacement,
    /// Re-frame the whole model.
    ResetView,
}

impl KeyAction {
    /// Every action, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::ToggleAutoRotate,
        Self::ToggleFullscreen,
        Self::TakeScreenshot,
        Self::Cancel,
        Self::TourNext,
        Self::TourPrev,
        Self::ToggleMeasuring,
        Self::BeginPlacement,
        Self::ResetView,
    ];

    /// The parameterless command this action triggers.
    #[must_use]
    pub fn to_command(self) -> ExhibitCommand {
        match self {
            Self::ToggleAutoRotate => ExhibitCommand::ToggleAutoRotate,
            Self::ToggleFullscreen => ExhibitCommand::ToggleFullscreen,
            Self::TakeScreenshot => ExhibitCommand::TakeScreenshot,
            Self::Cancel => ExhibitCommand::Cancel,
            Self::TourNext => ExhibitCommand::NextStop,
            Self::TourPrev => ExhibitCommand::PrevStop,
            Self::ToggleMeasuring => ExhibitCommand::ToggleMeasuring,
            Self::BeginPlacement => ExhibitCommand::BeginPlacement,
            Self::ResetView => ExhibitCommand::ResetView,
        }
    }
}
