//! Command dispatch and pointer routing.

use glam::Vec2;
use web_time::Duration;

use super::{EngineEffect, ExhibitCommand, ExhibitEngine};
use crate::camera::CameraPose;
use crate::error::InteractionError;
use crate::interaction::{Mode, ModeTransition};
use crate::model::Model;
use crate::picking;

impl ExhibitEngine {
    /// Execute a single command.
    ///
    /// A rejected command leaves the session untouched; the rejection is
    /// logged and surfaced as [`EngineEffect::Message`] before being
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns the [`InteractionError`] describing why the command was
    /// rejected.
    pub fn execute(
        &mut self,
        command: ExhibitCommand,
    ) -> Result<(), InteractionError> {
        let result = self.dispatch(command);
        if let Err(err) = result {
            log::warn!("command rejected: {err}");
            self.push_message(err.to_string());
        }
        result
    }

    fn dispatch(
        &mut self,
        command: ExhibitCommand,
    ) -> Result<(), InteractionError> {
        match command {
            ExhibitCommand::RotateCamera { delta } => {
                self.controller.rotate(delta);
            }
            ExhibitCommand::PanCamera { delta } => self.controller.pan(delta),
            ExhibitCommand::Zoom { delta } => self.controller.zoom(delta),
            ExhibitCommand::ToggleAutoRotate => {
                self.auto_rotate = !self.auto_rotate;
                log::info!("auto-rotate {}", on_off(self.auto_rotate));
            }
            ExhibitCommand::ResetView => self.reset_view()?,
            ExhibitCommand::PointerMoved { position } => {
                self.handle_pointer_move(position);
            }
            ExhibitCommand::Click { position } => self.handle_click(position)?,
            ExhibitCommand::ToggleMeasuring => {
                self.require_model()?;
                let transition = self.modes.toggle_measuring();
                self.apply_transition(transition);
            }
            ExhibitCommand::BeginPlacement => {
                self.require_model()?;
                let transition = self.modes.begin_placement();
                self.apply_transition(transition);
            }
            ExhibitCommand::CancelPlacement => {
                if let Some(transition) = self.modes.end_placement() {
                    self.apply_transition(transition);
                }
            }
            ExhibitCommand::SaveAnnotation { title, description } => {
                self.save_annotation(&title, &description)?;
            }
            ExhibitCommand::Cancel => self.cancel(),
            ExhibitCommand::DeleteAnnotation { index } => {
                self.delete_annotation(index)?;
            }
            ExhibitCommand::FocusAnnotation { index } => {
                self.focus_annotation(index)?;
            }
            ExhibitCommand::StartTour => self.start_tour()?,
            ExhibitCommand::NextStop => self.next_stop(),
            ExhibitCommand::PrevStop => self.prev_stop(),
            ExhibitCommand::EndTour => self.end_tour(),
            ExhibitCommand::ToggleFullscreen => {
                self.effects.push(EngineEffect::FullscreenToggled);
            }
            ExhibitCommand::TakeScreenshot => {
                self.effects.push(EngineEffect::ScreenshotRequested);
            }
            ExhibitCommand::Resize { width, height } => {
                self.resize(width, height);
            }
        }
        Ok(())
    }

    fn require_model(&self) -> Result<(), InteractionError> {
        if self.model.is_some() {
            Ok(())
        } else {
            Err(InteractionError::ModelNotLoaded)
        }
    }

    /// Publish the side effects of a mode change.
    pub(super) fn apply_transition(&mut self, transition: ModeTransition) {
        log::debug!("mode {:?} -> {:?}", transition.from, transition.to);
        let was_placing = transition.from == Mode::PlacingAnnotation;
        let is_placing = transition.to == Mode::PlacingAnnotation;
        if is_placing {
            self.effects.push(EngineEffect::PlacementPanel { open: true });
        } else if was_placing {
            self.effects.push(EngineEffect::PlacementPanel { open: false });
        }
        self.sync_cursor();
    }

    /// Escape closes the innermost thing that is open: the active mode,
    /// otherwise the tour.
    fn cancel(&mut self) {
        if let Some(transition) = self.modes.cancel() {
            self.apply_transition(transition);
        } else {
            self.end_tour();
        }
    }

    /// Route a click by mode: markers first while idle, then the model
    /// surface for measuring or placement. Misses do nothing.
    fn handle_click(&mut self, position: Vec2) -> Result<(), InteractionError> {
        self.pointer = position;
        let camera = self.controller.camera();
        let Some(ray) = picking::screen_ray(position, self.viewport, camera)
        else {
            return Ok(());
        };

        if self.modes.mode() == Mode::Idle {
            if let Some(index) = picking::pick_marker(
                &ray,
                &self.store,
                self.options.display.marker_radius,
            ) {
                log::debug!("marker click -> annotation {index}");
                return self.focus_annotation(index);
            }
        }

        let Some(hit) = self
            .model
            .as_ref()
            .and_then(|model| picking::cast_model(&ray, model))
        else {
            return Ok(());
        };

        match self.modes.mode() {
            Mode::Measuring => {
                let recorded = self.modes.record_measurement(hit.point)?;
                if let Some(distance) = recorded {
                    log::info!(
                        "measured {}",
                        self.options.display.format_distance(distance)
                    );
                    self.effects
                        .push(EngineEffect::MeasurementPublished { distance });
                }
            }
            Mode::PlacingAnnotation => {
                log::debug!("staged placement at {}", hit.point);
                self.modes.stage_placement(hit.point);
            }
            Mode::Idle => {}
        }
        Ok(())
    }

    /// Hover handling: the placement preview follows the surface, and in
    /// idle the cursor turns into a pointer over markers.
    fn handle_pointer_move(&mut self, position: Vec2) {
        self.pointer = position;
        let camera = self.controller.camera();
        let ray = picking::screen_ray(position, self.viewport, camera);

        match self.modes.mode() {
            Mode::PlacingAnnotation => {
                let hit = ray.as_ref().and_then(|ray| {
                    self.model
                        .as_ref()
                        .and_then(|model| picking::cast_model(ray, model))
                });
                self.modes.update_preview(hit.map(|h| h.point));
            }
            Mode::Idle => {
                let over_marker = ray.is_some_and(|ray| {
                    picking::pick_marker(
                        &ray,
                        &self.store,
                        self.options.display.marker_radius,
                    )
                    .is_some()
                });
                if self.modes.set_marker_hover(over_marker) {
                    self.sync_cursor();
                }
            }
            Mode::Measuring => {}
        }
    }

    /// Fly back to the front view of the whole model.
    fn reset_view(&mut self) -> Result<(), InteractionError> {
        let bounds = self
            .model
            .as_ref()
            .map(Model::bounds)
            .ok_or(InteractionError::ModelNotLoaded)?;
        let mut framed = self.controller.clone();
        framed.reset_to_bounds(bounds.min, bounds.max);
        let to = CameraPose {
            eye: framed.eye(),
            target: framed.target(),
        };
        self.animator
            .animate(self.live_pose(), to, self.flight_duration());
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = Vec2::new(width as f32, height as f32);
        self.controller.resize(width, height);
    }

    pub(super) fn live_pose(&self) -> CameraPose {
        CameraPose {
            eye: self.controller.eye(),
            target: self.controller.target(),
        }
    }

    pub(super) fn flight_duration(&self) -> Duration {
        Duration::from_millis(self.options.tour.flight_duration_ms)
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
