//! Annotation authoring and the guided tour.

use glam::Vec3;

use super::{EngineEffect, ExhibitEngine};
use crate::camera::CameraPose;
use crate::error::InteractionError;
use crate::tour::TourStep;

impl ExhibitEngine {
    /// Commit the staged placement, then return to idle.
    pub(super) fn save_annotation(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<(), InteractionError> {
        let ordinal = self
            .store
            .add(title, description, self.modes.pending())?
            .ordinal();
        log::info!("annotation #{ordinal} saved: {}", title.trim());
        if let Some(transition) = self.modes.end_placement() {
            self.apply_transition(transition);
        }
        Ok(())
    }

    /// Remove an annotation and keep the tour cursor on a valid entry.
    pub(super) fn delete_annotation(
        &mut self,
        index: usize,
    ) -> Result<(), InteractionError> {
        let removed = self.store.delete_at(index)?;
        log::info!("annotation deleted: {}", removed.title());

        let touring = self.tour.cursor().is_some();
        match self.tour.on_deleted(index, self.store.len()) {
            Some(cursor) => {
                self.effects.push(EngineEffect::ShowDetail { index: cursor });
            }
            None if touring => {
                log::info!("tour ended: no annotations left");
                self.effects.push(EngineEffect::HideDetail);
            }
            None => {}
        }
        Ok(())
    }

    /// Fly to an annotation and show its details.
    pub(super) fn focus_annotation(
        &mut self,
        index: usize,
    ) -> Result<(), InteractionError> {
        let step = self.tour.focus(index, self.store.len())?;
        self.show_stop(step);
        Ok(())
    }

    pub(super) fn start_tour(&mut self) -> Result<(), InteractionError> {
        let step = self.tour.start(self.store.len())?;
        log::info!("tour started ({} stops)", self.store.len());
        self.show_stop(step);
        Ok(())
    }

    pub(super) fn next_stop(&mut self) {
        if let Some(step) = self.tour.next(self.store.len()) {
            self.show_stop(step);
        }
    }

    pub(super) fn prev_stop(&mut self) {
        if let Some(step) = self.tour.prev(self.store.len()) {
            self.show_stop(step);
        }
    }

    pub(super) fn end_tour(&mut self) {
        if self.tour.cursor().is_some() {
            self.tour.end();
            log::debug!("tour ended");
            self.effects.push(EngineEffect::HideDetail);
        }
    }

    /// Start a flight from the live camera to the stop's viewpoint.
    fn show_stop(&mut self, step: TourStep) {
        let Some(position) = self.store.get(step.index).map(|a| a.position())
        else {
            return;
        };
        let to = CameraPose {
            eye: position + Vec3::from(self.options.tour.focus_offset),
            target: position,
        };
        self.animator
            .animate(self.live_pose(), to, self.flight_duration());
        log::debug!("focus annotation {} at {position}", step.index);
        self.effects
            .push(EngineEffect::ShowDetail { index: step.index });
    }
}
