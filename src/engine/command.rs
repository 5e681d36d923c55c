//! The engine's complete interactive vocabulary.
//!
//! Every visitor-facing operation (key press, mouse gesture, sidebar
//! button or programmatic call) is an [`ExhibitCommand`]. Consumers build
//! commands and pass them to
//! [`ExhibitEngine::execute`](super::ExhibitEngine::execute). What the host
//! has to react to comes back as [`EngineEffect`]s in each
//! [`FrameOutput`].

use glam::Vec2;

use crate::interaction::CursorStyle;
use crate::model::Aabb;
use crate::overlay::LabelPlacement;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(ExhibitCommand::ToggleMeasuring)?;
/// engine.execute(ExhibitCommand::Zoom { delta: 1.0 })?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ExhibitCommand {
    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit by `delta` pixels of pointer drag.
    RotateCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },
    /// Pan by `delta` pixels of pointer drag.
    PanCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },
    /// Zoom (positive = in, negative = out).
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
    /// Start or stop the turntable spin.
    ToggleAutoRotate,
    /// Fly back to the default framing of the whole model.
    ResetView,

    // ── Pointer ─────────────────────────────────────────────────────
    /// Pointer moved over the viewport (no button gesture in progress).
    PointerMoved {
        /// Pixel position, origin top-left.
        position: Vec2,
    },
    /// Primary click (press and release without a drag).
    Click {
        /// Pixel position, origin top-left.
        position: Vec2,
    },

    // ── Modes ───────────────────────────────────────────────────────
    /// Enter or leave measuring mode.
    ToggleMeasuring,
    /// Enter annotation placement mode.
    BeginPlacement,
    /// Leave placement mode, discarding the staged position.
    CancelPlacement,
    /// Commit the staged position as a new annotation.
    SaveAnnotation {
        /// Title (must not be blank).
        title: String,
        /// Description (blank is replaced by the configured placeholder).
        description: String,
    },
    /// Escape: leave the active mode, or end the tour when idle.
    Cancel,

    // ── Annotations and tour ────────────────────────────────────────
    /// Remove the annotation at `index`.
    DeleteAnnotation {
        /// Annotation index.
        index: usize,
    },
    /// Fly to the annotation at `index` and show its details.
    FocusAnnotation {
        /// Annotation index.
        index: usize,
    },
    /// Focus the first annotation.
    StartTour,
    /// Advance one stop.
    NextStop,
    /// Step back one stop.
    PrevStop,
    /// Stop the tour and close the detail panel.
    EndTour,

    // ── Host ────────────────────────────────────────────────────────
    /// Ask the host to enter or leave fullscreen.
    ToggleFullscreen,
    /// Ask the host to export the current frame.
    TakeScreenshot,
    /// Viewport size changed.
    Resize {
        /// Width in physical pixels.
        width: u32,
        /// Height in physical pixels.
        height: u32,
    },
}

/// Something the host should react to, produced while executing commands
/// or ticking.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEffect {
    /// A short user-facing message (rejections, notices).
    Message(String),
    /// The second measurement point landed.
    MeasurementPublished {
        /// Euclidean distance in model units.
        distance: f32,
    },
    /// Show the detail panel for the annotation at `index`.
    ShowDetail {
        /// Annotation index.
        index: usize,
    },
    /// Close the detail panel.
    HideDetail,
    /// Open or close the annotation entry panel.
    PlacementPanel {
        /// Whether the panel is open.
        open: bool,
    },
    /// The pointer affordance changed.
    CursorChanged(CursorStyle),
    /// Export the current frame.
    ScreenshotRequested,
    /// Enter or leave fullscreen.
    FullscreenToggled,
    /// The model finished loading.
    ModelLoaded {
        /// Model bounds after normalization.
        bounds: Aabb,
    },
    /// The model failed to load. Terminal.
    ModelFailed(String),
    /// Import progress in [0, 1].
    LoadProgress(f32),
}

/// Everything one [`tick`](super::ExhibitEngine::tick) produces.
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// Screen placement of every annotation label, in list order.
    pub labels: Vec<LabelPlacement>,
    /// Effects accumulated since the previous tick, in order.
    pub effects: Vec<EngineEffect>,
    /// Whether the camera moved this frame (flight or spin).
    pub camera_moving: bool,
}

/// Model import state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadState {
    /// No model requested yet.
    #[default]
    Empty,
    /// Import running on the loader thread.
    Loading {
        /// Fraction complete in [0, 1].
        progress: f32,
    },
    /// Model available for rendering and picking.
    Loaded,
    /// Import failed. There is no retry.
    Failed(String),
}
