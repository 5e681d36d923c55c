use glam::{Vec2, Vec3};

use super::{ExhibitEngine, LoadState};
use crate::annotation::{Annotation, AnnotationStore};
use crate::camera::Camera;
use crate::interaction::{CursorStyle, HoverPreview, MeasurementSession, Mode};
use crate::model::Model;
use crate::options::Options;

impl ExhibitEngine {
    /// Runtime options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Annotations in list order (sidebar contents).
    #[must_use]
    pub fn annotations(&self) -> &AnnotationStore {
        &self.store
    }

    /// 1-based tour position and total, `None` when no tour is running.
    #[must_use]
    pub fn tour_progress(&self) -> Option<(usize, usize)> {
        self.tour.progress(self.store.len())
    }

    /// The annotation whose detail panel is open.
    #[must_use]
    pub fn detail_panel(&self) -> Option<(usize, &Annotation)> {
        let index = self.tour.cursor()?;
        self.store.get(index).map(|annotation| (index, annotation))
    }

    /// Current measurement points and distance.
    #[must_use]
    pub fn measurement(&self) -> &MeasurementSession {
        self.modes.measurement()
    }

    /// Measured distance formatted with the configured precision.
    #[must_use]
    pub fn measurement_text(&self) -> Option<String> {
        self.modes
            .measurement()
            .distance()
            .map(|d| self.options.display.format_distance(d))
    }

    /// Active interaction mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.modes.mode()
    }

    /// Staged annotation position while placing.
    #[must_use]
    pub fn pending_placement(&self) -> Option<Vec3> {
        self.modes.pending()
    }

    /// Whether the annotation entry panel's save action is enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.modes.can_save()
    }

    /// Placement hover indicator, while placing.
    #[must_use]
    pub fn preview(&self) -> Option<&HoverPreview> {
        self.modes.preview()
    }

    /// Pointer affordance for the current state.
    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        self.modes.cursor()
    }

    /// Model import state.
    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    /// The loaded model.
    #[must_use]
    pub fn model(&self) -> Option<&Model> {
        self.model.as_ref()
    }

    /// Live camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        self.controller.camera()
    }

    /// Whether a camera flight is in progress.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    /// Whether turntable spin is on.
    #[must_use]
    pub fn auto_rotate(&self) -> bool {
        self.auto_rotate
    }

    /// Viewport size in physical pixels.
    #[must_use]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Last pointer position reported to the engine.
    #[must_use]
    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }
}
