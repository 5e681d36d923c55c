//! Session state and the command/tick loop.

mod accessors;
pub mod command;
mod input;
mod tour_focus;

use std::path::PathBuf;

use glam::Vec2;
use web_time::Duration;

pub use self::command::{EngineEffect, ExhibitCommand, FrameOutput, LoadState};
use crate::annotation::AnnotationStore;
use crate::camera::{CameraAnimator, OrbitController};
use crate::error::VitrineError;
use crate::interaction::{CursorStyle, ModeController};
use crate::model::loader::{LoadEvent, ModelLoader};
use crate::model::Model;
use crate::options::Options;
use crate::overlay;
use crate::tour::TourController;

/// The whole exhibit session: camera, model, annotations, modes and tour.
///
/// The engine does no rendering and owns no window. A host feeds it
/// [`ExhibitCommand`]s through [`execute`](Self::execute), calls
/// [`tick`](Self::tick) once per frame and applies the returned
/// [`FrameOutput`].
///
/// ```ignore
/// let mut engine = ExhibitEngine::new(Options::default(), 1280, 800);
/// engine.load_model("statue.glb")?;
/// loop {
///     let frame = engine.tick(clock.tick());
///     for effect in frame.effects { /* ... */ }
/// }
/// ```
pub struct ExhibitEngine {
    options: Options,
    controller: OrbitController,
    animator: CameraAnimator,
    load_state: LoadState,
    loader: Option<ModelLoader>,
    model: Option<Model>,
    store: AnnotationStore,
    modes: ModeController,
    tour: TourController,
    viewport: Vec2,
    pointer: Vec2,
    auto_rotate: bool,
    reported_cursor: CursorStyle,
    effects: Vec<EngineEffect>,
}

impl ExhibitEngine {
    /// Create an engine with no model for a `width` x `height` viewport.
    #[must_use]
    pub fn new(options: Options, width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let controller =
            OrbitController::new(&options.camera, width as f32 / height as f32);
        let store =
            AnnotationStore::new(options.display.default_description.clone());
        Self {
            options,
            controller,
            animator: CameraAnimator::new(),
            load_state: LoadState::Empty,
            loader: None,
            model: None,
            store,
            modes: ModeController::new(),
            tour: TourController::new(),
            viewport: Vec2::new(width as f32, height as f32),
            pointer: Vec2::ZERO,
            auto_rotate: false,
            reported_cursor: CursorStyle::Default,
            effects: Vec::new(),
        }
    }

    /// Create an engine around an already built model.
    #[must_use]
    pub fn with_model(
        options: Options,
        width: u32,
        height: u32,
        model: Model,
    ) -> Self {
        let mut engine = Self::new(options, width, height);
        engine.install_model(model);
        engine
    }

    /// Start importing a glTF/GLB file on a background thread. Progress
    /// and the result arrive through [`tick`](Self::tick).
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::ThreadSpawn`] if the loader thread cannot be
    /// created.
    pub fn load_model(
        &mut self,
        path: impl Into<PathBuf>,
    ) -> Result<(), VitrineError> {
        let loader =
            ModelLoader::spawn(path, self.options.display.normalize_size)?;
        self.loader = Some(loader);
        self.load_state = LoadState::Loading { progress: 0.0 };
        Ok(())
    }

    /// Advance one frame: poll the loader, move the camera (flight first,
    /// then turntable spin), lay out labels and hand back pending effects.
    pub fn tick(&mut self, dt: Duration) -> FrameOutput {
        self.poll_loader();

        let camera_moving = if let Some(pose) = self.animator.tick(dt) {
            self.controller.set_pose(pose.eye, pose.target);
            true
        } else if self.auto_rotate && self.model.is_some() {
            self.controller.auto_rotate(dt.as_secs_f32());
            true
        } else {
            false
        };

        let labels = overlay::layout_labels(
            &self.store,
            self.controller.camera().build_matrix(),
            self.viewport,
        );

        FrameOutput {
            labels,
            effects: std::mem::take(&mut self.effects),
            camera_moving,
        }
    }

    fn poll_loader(&mut self) {
        let Some(loader) = self.loader.as_mut() else {
            return;
        };
        let events = loader.poll();
        if loader.is_finished() {
            self.loader = None;
        }

        for event in events {
            match event {
                LoadEvent::Progress(progress) => {
                    self.load_state = LoadState::Loading { progress };
                    self.effects.push(EngineEffect::LoadProgress(progress));
                }
                LoadEvent::Loaded(model) => self.install_model(*model),
                LoadEvent::Failed(message) => {
                    log::error!("model load failed: {message}");
                    self.load_state = LoadState::Failed(message.clone());
                    self.effects.push(EngineEffect::ModelFailed(message));
                }
            }
        }
    }

    fn install_model(&mut self, model: Model) {
        let bounds = model.bounds();
        log::info!(
            "model '{}' ready: {} meshes, {} triangles",
            model.name(),
            model.meshes().len(),
            model.triangle_count()
        );
        self.controller.fit_to_bounds(bounds.min, bounds.max);
        self.model = Some(model);
        self.load_state = LoadState::Loaded;
        self.effects.push(EngineEffect::ModelLoaded { bounds });
    }

    fn push_message(&mut self, message: impl Into<String>) {
        self.effects.push(EngineEffect::Message(message.into()));
    }

    /// Emit [`EngineEffect::CursorChanged`] if the affordance differs from
    /// what the host last saw.
    fn sync_cursor(&mut self) {
        let cursor = self.modes.cursor();
        if cursor != self.reported_cursor {
            self.reported_cursor = cursor;
            self.effects.push(EngineEffect::CursorChanged(cursor));
        }
    }
}

#[cfg(test)]
mod tests;
