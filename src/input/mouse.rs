use glam::Vec2;

/// Pointer travel (pixels) after which a press counts as a drag.
const DRAG_THRESHOLD_PX: f32 = 4.0;

/// Result of releasing the primary button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickResult {
    /// The press turned into a camera drag; no click.
    Drag,
    /// A click at the given pixel position.
    Click(Vec2),
    /// Release without a matching press.
    NoAction,
}

/// Tracks pointer position and distinguishes clicks from drags.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Last known cursor position.
    pub mouse_pos: Vec2,
    press_pos: Option<Vec2>,
    is_dragging: bool,
}

impl InputState {
    /// Fresh state with no press held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a primary press at the current position.
    pub fn handle_mouse_down(&mut self) {
        self.press_pos = Some(self.mouse_pos);
        self.is_dragging = false;
    }

    /// Update cursor position; returns the delta since the last move.
    pub fn handle_mouse_position(&mut self, pos: Vec2) -> Vec2 {
        let delta = pos - self.mouse_pos;
        self.mouse_pos = pos;
        if let Some(press) = self.press_pos {
            if press.distance(pos) > DRAG_THRESHOLD_PX {
                self.is_dragging = true;
            }
        }
        delta
    }

    /// Whether a press is currently held.
    #[must_use]
    pub fn is_pressed(&self) -> bool {
        self.press_pos.is_some()
    }

    /// Whether the held press has become a drag.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Process a primary release.
    pub fn process_mouse_up(&mut self) -> ClickResult {
        let was_dragging = self.is_dragging;
        self.is_dragging = false;
        match self.press_pos.take() {
            None => ClickResult::NoAction,
            Some(_) if was_dragging => ClickResult::Drag,
            Some(_) => ClickResult::Click(self.mouse_pos),
        }
    }
}
