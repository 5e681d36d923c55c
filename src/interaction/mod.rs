//! Mutually exclusive interaction modes and their transient state.
//!
//! Exactly one [`Mode`] is active. Entering a mode first exits the current
//! one and clears that mode's transient state (measurement points, pending
//! placement, hover preview). Transitions only happen on explicit requests;
//! nothing here changes mode on its own.

mod measurement;

use glam::Vec3;
pub use measurement::MeasurementSession;

use crate::error::InteractionError;

/// Active interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Orbit the camera; clicks on markers focus annotations.
    #[default]
    Idle,
    /// Clicks on the model collect measurement points.
    Measuring,
    /// Clicks on the model stage an annotation position.
    PlacingAnnotation,
}

/// Pointer affordance requested from the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorStyle {
    /// Platform default arrow.
    #[default]
    Default,
    /// Hand over a clickable marker.
    Pointer,
    /// Precise surface picking.
    Crosshair,
}

/// A completed mode change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeTransition {
    /// Mode before the change.
    pub from: Mode,
    /// Mode after the change.
    pub to: Mode,
}

/// The placement hover indicator. Hidden until the pointer is over the
/// model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverPreview {
    /// Last surface point under the pointer.
    pub position: Vec3,
    /// Whether the pointer is currently over the model.
    pub visible: bool,
}

impl HoverPreview {
    fn hidden() -> Self {
        Self {
            position: Vec3::ZERO,
            visible: false,
        }
    }
}

/// Mode state machine plus the transient state owned by each mode.
#[derive(Debug, Clone, Default)]
pub struct ModeController {
    mode: Mode,
    measurement: MeasurementSession,
    pending: Option<Vec3>,
    preview: Option<HoverPreview>,
    hovering_marker: bool,
}

impl ModeController {
    /// Start in [`Mode::Idle`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// True in [`Mode::Measuring`].
    #[must_use]
    pub fn is_measuring(&self) -> bool {
        self.mode == Mode::Measuring
    }

    /// True in [`Mode::PlacingAnnotation`].
    #[must_use]
    pub fn is_placing(&self) -> bool {
        self.mode == Mode::PlacingAnnotation
    }

    /// The measurement session (empty outside Measuring).
    #[must_use]
    pub fn measurement(&self) -> &MeasurementSession {
        &self.measurement
    }

    /// Staged annotation position, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Vec3> {
        self.pending
    }

    /// Whether the "save" action is enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.is_placing() && self.pending.is_some()
    }

    /// Placement hover preview (only while placing).
    #[must_use]
    pub fn preview(&self) -> Option<&HoverPreview> {
        self.preview.as_ref()
    }

    /// Pointer affordance for the current state.
    #[must_use]
    pub fn cursor(&self) -> CursorStyle {
        match self.mode {
            Mode::Measuring | Mode::PlacingAnnotation => CursorStyle::Crosshair,
            Mode::Idle if self.hovering_marker => CursorStyle::Pointer,
            Mode::Idle => CursorStyle::Default,
        }
    }

    /// Leave the current mode, dropping its transient state.
    fn exit_current(&mut self) -> Mode {
        let from = self.mode;
        match from {
            Mode::Idle => {}
            Mode::Measuring => self.measurement.clear(),
            Mode::PlacingAnnotation => {
                self.pending = None;
                self.preview = None;
            }
        }
        self.hovering_marker = false;
        self.mode = Mode::Idle;
        from
    }

    /// Idle/Placing → Measuring, or Measuring → Idle. Either way the
    /// measurement session starts empty.
    pub fn toggle_measuring(&mut self) -> ModeTransition {
        let from = self.exit_current();
        if from != Mode::Measuring {
            self.measurement.clear();
            self.mode = Mode::Measuring;
        }
        ModeTransition {
            from,
            to: self.mode,
        }
    }

    /// Enter placement with no staged position and a hidden preview.
    pub fn begin_placement(&mut self) -> ModeTransition {
        let from = self.exit_current();
        self.pending = None;
        self.preview = Some(HoverPreview::hidden());
        self.mode = Mode::PlacingAnnotation;
        ModeTransition {
            from,
            to: self.mode,
        }
    }

    /// Placing → Idle (cancel or save). `None` when not placing.
    pub fn end_placement(&mut self) -> Option<ModeTransition> {
        if !self.is_placing() {
            return None;
        }
        let from = self.exit_current();
        Some(ModeTransition {
            from,
            to: Mode::Idle,
        })
    }

    /// Escape from any mode. `None` when already idle.
    pub fn cancel(&mut self) -> Option<ModeTransition> {
        if self.mode == Mode::Idle {
            return None;
        }
        let from = self.exit_current();
        Some(ModeTransition {
            from,
            to: Mode::Idle,
        })
    }

    /// Record a measurement point. Returns the distance once the second
    /// point lands.
    ///
    /// # Errors
    ///
    /// [`InteractionError::MeasurementComplete`] if two points are already
    /// recorded. Outside Measuring the call is ignored (`Ok(None)`).
    pub fn record_measurement(
        &mut self,
        point: Vec3,
    ) -> Result<Option<f32>, InteractionError> {
        if !self.is_measuring() {
            return Ok(None);
        }
        self.measurement.record(point)
    }

    /// Stage `point` as the pending placement, replacing any previous one.
    /// Ignored outside placement.
    pub fn stage_placement(&mut self, point: Vec3) {
        if self.is_placing() {
            self.pending = Some(point);
        }
    }

    /// Move the hover preview to the surface point under the pointer, or
    /// hide it on a miss.
    pub fn update_preview(&mut self, hit: Option<Vec3>) {
        if let Some(preview) = self.preview.as_mut() {
            match hit {
                Some(position) => {
                    preview.position = position;
                    preview.visible = true;
                }
                None => preview.visible = false,
            }
        }
    }

    /// Record whether the pointer is over a marker (Idle only). Returns
    /// true when the cursor affordance changed.
    pub fn set_marker_hover(&mut self, hovering: bool) -> bool {
        let hovering = hovering && self.mode == Mode::Idle;
        let changed = self.hovering_marker != hovering;
        self.hovering_marker = hovering;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measuring_toggle_sets_crosshair_and_clears() {
        let mut modes = ModeController::new();
        let t = modes.toggle_measuring();
        assert_eq!(t, ModeTransition { from: Mode::Idle, to: Mode::Measuring });
        assert_eq!(modes.cursor(), CursorStyle::Crosshair);
        let _ = modes.record_measurement(Vec3::ZERO).unwrap();

        let t = modes.toggle_measuring();
        assert_eq!(t.to, Mode::Idle);
        assert!(modes.measurement().points().is_empty());
        assert_eq!(modes.cursor(), CursorStyle::Default);
    }

    #[test]
    fn measuring_while_placing_exits_placement_first() {
        let mut modes = ModeController::new();
        let _ = modes.begin_placement();
        modes.stage_placement(Vec3::X);
        assert!(modes.can_save());

        let t = modes.toggle_measuring();
        assert_eq!(t.from, Mode::PlacingAnnotation);
        assert_eq!(modes.mode(), Mode::Measuring);
        assert!(!modes.is_placing());
        assert_eq!(modes.pending(), None);
        assert!(modes.preview().is_none());
    }

    #[test]
    fn placing_while_measuring_exits_measuring_first() {
        let mut modes = ModeController::new();
        let _ = modes.toggle_measuring();
        let _ = modes.record_measurement(Vec3::ONE).unwrap();
        let t = modes.begin_placement();
        assert_eq!(t.from, Mode::Measuring);
        assert!(modes.is_placing());
        assert!(!modes.is_measuring());
        assert!(modes.measurement().points().is_empty());
    }

    #[test]
    fn placement_preview_starts_hidden_and_tracks_hits() {
        let mut modes = ModeController::new();
        let _ = modes.begin_placement();
        assert!(!modes.preview().unwrap().visible);
        modes.update_preview(Some(Vec3::Y));
        assert!(modes.preview().unwrap().visible);
        assert_eq!(modes.preview().unwrap().position, Vec3::Y);
        modes.update_preview(None);
        assert!(!modes.preview().unwrap().visible);
    }

    #[test]
    fn staging_replaces_previous_pending() {
        let mut modes = ModeController::new();
        let _ = modes.begin_placement();
        assert!(!modes.can_save());
        modes.stage_placement(Vec3::X);
        modes.stage_placement(Vec3::Z);
        assert_eq!(modes.pending(), Some(Vec3::Z));
    }

    #[test]
    fn end_placement_discards_everything() {
        let mut modes = ModeController::new();
        assert_eq!(modes.end_placement(), None);
        let _ = modes.begin_placement();
        modes.stage_placement(Vec3::X);
        let t = modes.end_placement().unwrap();
        assert_eq!(t.to, Mode::Idle);
        assert_eq!(modes.pending(), None);
        assert!(modes.preview().is_none());
    }

    #[test]
    fn cancel_from_any_mode_returns_to_idle() {
        let mut modes = ModeController::new();
        assert_eq!(modes.cancel(), None);
        let _ = modes.toggle_measuring();
        assert_eq!(modes.cancel().unwrap().from, Mode::Measuring);
        let _ = modes.begin_placement();
        assert_eq!(modes.cancel().unwrap().from, Mode::PlacingAnnotation);
        assert_eq!(modes.mode(), Mode::Idle);
    }

    #[test]
    fn marker_hover_only_affects_idle() {
        let mut modes = ModeController::new();
        assert!(modes.set_marker_hover(true));
        assert_eq!(modes.cursor(), CursorStyle::Pointer);
        let _ = modes.toggle_measuring();
        assert!(!modes.set_marker_hover(true));
        assert_eq!(modes.cursor(), CursorStyle::Crosshair);
    }

    #[test]
    fn inputs_outside_their_mode_are_ignored() {
        let mut modes = ModeController::new();
        modes.stage_placement(Vec3::X);
        assert_eq!(modes.pending(), None);
        assert_eq!(modes.record_measurement(Vec3::X), Ok(None));
        assert!(modes.measurement().points().is_empty());
    }
}
