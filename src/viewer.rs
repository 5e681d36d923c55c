//! Standalone exhibit window backed by winit.
//!
//! ```no_run
//! # use vitrine::Viewer;
//! Viewer::builder()
//!     .with_path("assets/models/vase.glb")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```
//!
//! Besides the bound keys, the window understands a few fixed ones:
//! digits `1`-`9` focus an annotation, `Delete` removes the focused one,
//! and while a placement is staged typed text fills the title (`Tab`
//! switches to the description, `Enter` saves).

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{CursorIcon, Fullscreen, Window, WindowId},
};

use crate::engine::{EngineEffect, ExhibitCommand, ExhibitEngine, LoadState};
use crate::error::VitrineError;
use crate::gpu::render_context::RenderContext;
use crate::input::{InputEvent, InputProcessor, MouseButton};
use crate::interaction::{CursorStyle, Mode};
use crate::options::Options;
use crate::renderer::ExhibitRenderer;
use crate::util::frame_timing::FrameClock;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    path: Option<PathBuf>,
    options: Option<Options>,
    title: String,
    screenshot_dir: PathBuf,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            path: None,
            options: None,
            title: "Vitrine".into(),
            screenshot_dir: PathBuf::from("."),
        }
    }

    /// Set the exhibit asset path (`.gltf` or `.glb`).
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title prefix.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Directory screenshots are written to.
    #[must_use]
    pub fn with_screenshot_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.screenshot_dir = dir.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            path: self.path,
            options: self.options.unwrap_or_default(),
            title: self.title,
            screenshot_dir: self.screenshot_dir,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window that displays one exhibit.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    path: Option<PathBuf>,
    options: Options,
    title: String,
    screenshot_dir: PathBuf,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::Viewer`] if the event loop cannot start.
    pub fn run(self) -> Result<(), VitrineError> {
        let event_loop =
            EventLoop::new().map_err(|e| VitrineError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let input =
            InputProcessor::with_key_bindings(self.options.keybindings.clone());
        let mut app = ViewerApp {
            session: None,
            input,
            clock: FrameClock::new(),
            draft: AnnotationDraft::default(),
            path: self.path,
            options: Some(self.options),
            title: self.title,
            screenshot_dir: self.screenshot_dir,
            status: String::new(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| VitrineError::Viewer(e.to_string()))
    }
}

// ── Annotation text entry ────────────────────────────────────────────────

/// Which field typed text goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum DraftField {
    #[default]
    Title,
    Description,
}

/// Title and description typed while a placement is staged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct AnnotationDraft {
    title: String,
    description: String,
    field: DraftField,
}

impl AnnotationDraft {
    fn push_text(&mut self, text: &str) {
        let target = match self.field {
            DraftField::Title => &mut self.title,
            DraftField::Description => &mut self.description,
        };
        target.extend(text.chars().filter(|c| !c.is_control()));
    }

    fn backspace(&mut self) {
        let _ = match self.field {
            DraftField::Title => self.title.pop(),
            DraftField::Description => self.description.pop(),
        };
    }

    fn switch_field(&mut self) {
        self.field = match self.field {
            DraftField::Title => DraftField::Description,
            DraftField::Description => DraftField::Title,
        };
    }

    /// Save command for the current text. The draft is kept so a rejected
    /// save (empty title) can be corrected.
    fn to_command(&self) -> ExhibitCommand {
        ExhibitCommand::SaveAnnotation {
            title: self.title.clone(),
            description: self.description.clone(),
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Window title summarizing what the visitor is doing.
fn status_line(
    base: &str,
    engine: &ExhibitEngine,
    draft: &AnnotationDraft,
) -> String {
    let mut parts = vec![base.to_owned()];
    match engine.load_state() {
        LoadState::Empty => parts.push("no model".into()),
        LoadState::Loading { progress } => {
            parts.push(format!("loading {:.0}%", progress * 100.0));
        }
        LoadState::Failed(message) => {
            parts.push(format!("load failed: {message}"));
        }
        LoadState::Loaded => {}
    }
    match engine.mode() {
        Mode::Measuring => parts.push(engine.measurement_text().map_or_else(
            || "measuring".into(),
            |d| format!("distance {d}"),
        )),
        Mode::PlacingAnnotation if engine.pending_placement().is_some() => {
            let caret = |field| if draft.field == field { "_" } else { "" };
            parts.push(format!(
                "title: {}{} | description: {}{}",
                draft.title,
                caret(DraftField::Title),
                draft.description,
                caret(DraftField::Description),
            ));
        }
        Mode::PlacingAnnotation => {
            parts.push("click the model to place".into());
        }
        Mode::Idle => {}
    }
    if let Some((index, annotation)) = engine.detail_panel() {
        let progress = engine
            .tour_progress()
            .map(|(current, total)| format!(" ({current}/{total})"))
            .unwrap_or_default();
        parts.push(format!("#{} {}{progress}", index + 1, annotation.title()));
    }
    parts.join(" | ")
}

fn cursor_icon(style: CursorStyle) -> CursorIcon {
    match style {
        CursorStyle::Default => CursorIcon::Default,
        CursorStyle::Pointer => CursorIcon::Pointer,
        CursorStyle::Crosshair => CursorIcon::Crosshair,
    }
}

fn digit_index(code: KeyCode) -> Option<usize> {
    let index = match code {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        KeyCode::Digit7 => 6,
        KeyCode::Digit8 => 7,
        KeyCode::Digit9 => 8,
        _ => return None,
    };
    Some(index)
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Everything that exists once the window is open.
struct Session {
    window: Arc<Window>,
    context: RenderContext,
    renderer: ExhibitRenderer,
    engine: ExhibitEngine,
}

struct ViewerApp {
    session: Option<Session>,
    input: InputProcessor,
    clock: FrameClock,
    draft: AnnotationDraft,
    path: Option<PathBuf>,
    options: Option<Options>,
    title: String,
    screenshot_dir: PathBuf,
    status: String,
}

impl ViewerApp {
    fn open(
        &mut self,
        event_loop: &ActiveEventLoop,
    ) -> Result<Session, VitrineError> {
        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| VitrineError::Viewer(e.to_string()))?,
        );
        let inner = window.inner_size();
        let size = (inner.width.max(1), inner.height.max(1));

        let context =
            pollster::block_on(RenderContext::new(window.clone(), size))?;
        let options = self.options.take().unwrap_or_default();
        let renderer = ExhibitRenderer::new(&context, &options.display);
        let mut engine = ExhibitEngine::new(options, size.0, size.1);
        if let Some(path) = &self.path {
            engine.load_model(path.clone())?;
        }

        window.request_redraw();
        Ok(Session {
            window,
            context,
            renderer,
            engine,
        })
    }

    fn run_commands(&mut self, commands: Vec<ExhibitCommand>) {
        let Some(session) = &mut self.session else {
            return;
        };
        for command in commands {
            // rejections are logged and surfaced as effects by the engine
            let _ = session.engine.execute(command);
        }
    }

    fn handle_input(&mut self, event: InputEvent) {
        let commands = self.input.handle_event(event);
        self.run_commands(commands);
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        let Some(session) = &self.session else {
            return;
        };
        let engine = &session.engine;

        let staged = engine.mode() == Mode::PlacingAnnotation
            && engine.pending_placement().is_some();
        if staged && code != KeyCode::Escape {
            match code {
                KeyCode::Enter | KeyCode::NumpadEnter => {
                    let command = self.draft.to_command();
                    self.run_commands(vec![command]);
                }
                KeyCode::Backspace => self.draft.backspace(),
                KeyCode::Tab => self.draft.switch_field(),
                _ => {
                    if let Some(text) = event.text.as_deref() {
                        self.draft.push_text(text);
                    }
                }
            }
            return;
        }

        let fixed = match code {
            KeyCode::Delete => engine
                .detail_panel()
                .map(|(index, _)| ExhibitCommand::DeleteAnnotation { index }),
            _ => digit_index(code)
                .map(|index| ExhibitCommand::FocusAnnotation { index }),
        };
        let key = format!("{code:?}");
        let command = fixed.or_else(|| self.input.handle_key_press(&key));
        if let Some(command) = command {
            self.run_commands(vec![command]);
        }
    }

    fn redraw(&mut self) {
        let dt = self.clock.tick();
        let Some(session) = &mut self.session else {
            return;
        };
        let output = session.engine.tick(dt);
        session
            .renderer
            .prepare(&session.context, &session.engine, &output.labels);

        for effect in output.effects {
            match effect {
                EngineEffect::Message(message) => log::info!("{message}"),
                EngineEffect::MeasurementPublished { distance } => {
                    let display = &session.engine.options().display;
                    let text = display.format_distance(distance);
                    log::info!("measured {text}");
                }
                EngineEffect::ShowDetail { index } => {
                    let annotations = session.engine.annotations();
                    if let Some(annotation) = annotations.get(index) {
                        log::info!(
                            "#{} {}: {}",
                            annotation.ordinal(),
                            annotation.title(),
                            annotation.description()
                        );
                    }
                }
                EngineEffect::PlacementPanel { open } => {
                    if !open {
                        self.draft.clear();
                    }
                }
                EngineEffect::CursorChanged(style) => {
                    session.window.set_cursor(cursor_icon(style));
                }
                EngineEffect::FullscreenToggled => {
                    let next = session
                        .window
                        .fullscreen()
                        .is_none()
                        .then_some(Fullscreen::Borderless(None));
                    session.window.set_fullscreen(next);
                }
                EngineEffect::ScreenshotRequested => {
                    let dir = &self.screenshot_dir;
                    let shot = session.renderer.capture(&session.context, dir);
                    if let Err(e) = shot {
                        log::error!("screenshot failed: {e}");
                    }
                }
                EngineEffect::ModelLoaded { .. } => {
                    if let Some(model) = session.engine.model() {
                        session.renderer.upload_model(&session.context, model);
                    }
                }
                EngineEffect::ModelFailed(message) => {
                    log::error!("could not load exhibit: {message}");
                }
                EngineEffect::HideDetail | EngineEffect::LoadProgress(_) => {}
            }
        }

        match session.renderer.render(&session.context) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                session.context.reconfigure();
            }
            Err(e) => log::error!("render error: {e:?}"),
        }

        let status = status_line(&self.title, &session.engine, &self.draft);
        if status != self.status {
            session.window.set_title(&status);
            self.status = status;
        }
        session.window.request_redraw();
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.session.is_some() {
            return;
        }
        match self.open(event_loop) {
            Ok(session) => self.session = Some(session),
            Err(e) => {
                log::error!("failed to open viewer: {e}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }
        if self.session.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(session) = &mut self.session {
                    session.context.resize(size.width, size.height);
                    session.renderer.resize(&session.context);
                }
                self.run_commands(vec![ExhibitCommand::Resize {
                    width: size.width,
                    height: size.height,
                }]);
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                self.handle_input(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.handle_input(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.handle_input(InputEvent::Scroll { delta });
            }

            WindowEvent::ModifiersChanged(modifiers) => {
                self.handle_input(InputEvent::ModifiersChanged {
                    shift: modifiers.state().shift_key(),
                });
            }

            WindowEvent::KeyboardInput { event, .. } => self.handle_key(&event),

            _ => (),
        }
    }
}
