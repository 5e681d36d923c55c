//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (mouse tracking,
//! drag detection, modifier keys) and the key-binding map. It is the only
//! thing that sits between raw window events and the engine's
//! [`execute`](crate::ExhibitEngine::execute) method.

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::mouse::{ClickResult, InputState};
use crate::engine::ExhibitCommand;
use crate::input::keyboard::KeyAction;
use crate::options::KeybindingOptions;

/// Which drag gesture is in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragButton {
    Primary,
    Secondary,
}

/// Converts raw window events into [`ExhibitCommand`]s.
///
/// A primary drag orbits (or pans with shift held), a secondary drag pans,
/// a primary press released without travel becomes a
/// [`Click`](ExhibitCommand::Click). Every cursor move is also reported as
/// [`PointerMoved`](ExhibitCommand::PointerMoved) for hover handling.
///
/// # Usage
///
/// ```ignore
/// for cmd in input_processor.handle_event(event) {
///     let _ = engine.execute(cmd);
/// }
///
/// if let Some(cmd) = input_processor.handle_key_press("KeyM") {
///     let _ = engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    state: InputState,
    drag: Option<DragButton>,
    shift_pressed: bool,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_key_bindings(KeybindingOptions::default())
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            state: InputState::new(),
            drag: None,
            shift_pressed: false,
            key_bindings,
        }
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ExhibitCommand> {
        self.key_bindings.lookup(key).map(KeyAction::to_command)
    }

    /// Process a raw input event and return the resulting commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<ExhibitCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => self
                .handle_mouse_button(button, pressed)
                .into_iter()
                .collect(),
            InputEvent::Scroll { delta } => {
                vec![ExhibitCommand::Zoom { delta }]
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                Vec::new()
            }
        }
    }

    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Vec<ExhibitCommand> {
        let position = Vec2::new(x, y);
        let delta = self.state.handle_mouse_position(position);
        let mut commands = vec![ExhibitCommand::PointerMoved { position }];

        let camera = match self.drag {
            Some(DragButton::Primary) if !self.state.is_dragging() => None,
            Some(DragButton::Primary) if self.shift_pressed => {
                Some(ExhibitCommand::PanCamera { delta })
            }
            Some(DragButton::Primary) => {
                Some(ExhibitCommand::RotateCamera { delta })
            }
            Some(DragButton::Secondary) => {
                Some(ExhibitCommand::PanCamera { delta })
            }
            None => None,
        };
        commands.extend(camera);
        commands
    }

    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<ExhibitCommand> {
        match (button, pressed) {
            (MouseButton::Left, true) => {
                self.state.handle_mouse_down();
                self.drag = Some(DragButton::Primary);
                None
            }
            (MouseButton::Left, false) => {
                self.drag = None;
                match self.state.process_mouse_up() {
                    ClickResult::Click(position) => {
                        Some(ExhibitCommand::Click { position })
                    }
                    ClickResult::Drag | ClickResult::NoAction => None,
                }
            }
            (MouseButton::Right | MouseButton::Middle, true) => {
                if self.drag.is_none() {
                    self.drag = Some(DragButton::Secondary);
                }
                None
            }
            (MouseButton::Right | MouseButton::Middle, false) => {
                if self.drag == Some(DragButton::Secondary) {
                    self.drag = None;
                }
                None
            }
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new()
    }
}
