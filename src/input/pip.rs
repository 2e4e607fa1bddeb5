//! Per-view camera interaction for a main view plus picture-in-picture
//! insets.
//!
//! Every named sub-view owns an independent [`PipState`]. Pointer events are
//! routed by rectangle containment (insets are tested before the main view,
//! since they sit on top of it). A drag is a small state machine:
//! `Idle -> Dragging(rotate | pan) -> Idle`.

use glam::{Vec2, Vec3};

use super::event::{InputEvent, MouseButton};
use super::layout::reset_button_rect;
use crate::camera::{Camera, View};
use crate::error::SomaError;
use crate::options::{CameraOptions, Options};
use crate::render::Rect;

/// Pointer travel (pixels) below which a press/release pair is a click.
const CLICK_SLOP: f32 = 3.0;

/// Interaction state of one sub-view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipState {
    /// Camera for this sub-view. Its `zoom` is driven by [`zoom`](Self::zoom).
    pub camera: Camera,
    /// Zoom factor, clamped to the configured bounds.
    pub zoom: f32,
    /// Screen-space offset of the projection center.
    pub pan: Vec2,
    /// Spin about Y while idle.
    pub auto_rotate: bool,
    /// Radians added per [`PipController::update`] tick.
    pub auto_rotate_speed: f32,
}

/// Whether a sub-view is the full-surface main view or an inset over it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Background view; loses hit-tests to any inset above it.
    Main,
    /// Picture-in-picture panel.
    Inset,
}

/// A named sub-view: its rectangle and interaction state.
#[derive(Debug, Clone, PartialEq)]
pub struct SubView {
    name: String,
    kind: ViewKind,
    rect: Rect,
    home_rotation: Vec3,
    state: PipState,
}

impl SubView {
    /// View name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Main view or inset.
    #[must_use]
    pub fn kind(&self) -> ViewKind {
        self.kind
    }

    /// Screen rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Current interaction state.
    #[must_use]
    pub fn state(&self) -> &PipState {
        &self.state
    }

    /// Hit region of the reset control.
    #[must_use]
    pub fn reset_button(&self, size: f32) -> Rect {
        reset_button_rect(self.rect, size)
    }

    fn reset_to_home(&mut self) {
        self.state.camera.rotation = self.home_rotation;
        self.state.zoom = 1.0;
        self.state.pan = Vec2::ZERO;
    }
}

/// What a drag does to its sub-view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragKind {
    /// Primary button: orbit.
    Rotate,
    /// Secondary button: translate.
    Pan,
}

/// Pointer drag state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No button held over a sub-view.
    #[default]
    Idle,
    /// A button went down inside sub-view `view` and is still held.
    Dragging {
        /// Index of the active sub-view.
        view: usize,
        /// Rotate or pan.
        kind: DragKind,
        /// Cursor position at the previous move.
        last: Vec2,
        /// Total pointer travel since the press.
        travel: f32,
    },
}

/// Result of feeding an event to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputResponse {
    /// Outside every sub-view, or nothing to do.
    Ignored,
    /// Some sub-view state changed.
    Updated,
    /// Press and release without dragging.
    Clicked {
        /// Sub-view that was clicked.
        view: String,
        /// Whether shift was held.
        toggle: bool,
    },
}

/// Routes pointer and wheel input to independent per-view cameras.
#[derive(Debug, Clone)]
pub struct PipController {
    views: Vec<SubView>,
    drag: DragState,
    cursor: Vec2,
    shift: bool,
    camera: CameraOptions,
    auto_rotate_speed: f32,
    reset_button_size: f32,
}

impl PipController {
    /// Controller with no views, configured from `options`.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            views: Vec::new(),
            drag: DragState::Idle,
            cursor: Vec2::ZERO,
            shift: false,
            camera: options.camera.clone(),
            auto_rotate_speed: options.pip.auto_rotate_speed,
            reset_button_size: options.pip.reset_button_size,
        }
    }

    /// Apply new camera and inset options. View states are kept; zooms are
    /// re-clamped to the new bounds.
    pub fn configure(&mut self, options: &Options) {
        self.camera = options.camera.clone();
        self.auto_rotate_speed = options.pip.auto_rotate_speed;
        self.reset_button_size = options.pip.reset_button_size;
        for view in &mut self.views {
            view.state.zoom = self.camera.clamp_zoom(view.state.zoom);
            view.state.auto_rotate_speed = self.auto_rotate_speed;
            view.state.camera.fov = self.camera.fov;
        }
    }

    /// Register a sub-view (or replace the one with the same name) with a
    /// fresh camera.
    pub fn add_view(&mut self, name: impl Into<String>, kind: ViewKind, rect: Rect) {
        let name = name.into();
        let view = SubView {
            name,
            kind,
            rect,
            home_rotation: Vec3::ZERO,
            state: PipState {
                camera: self.camera.initial_camera(),
                zoom: 1.0,
                pan: Vec2::ZERO,
                auto_rotate: false,
                auto_rotate_speed: self.auto_rotate_speed,
            },
        };
        match self.index_of(&view.name) {
            Some(i) => self.views[i] = view,
            None => self.views.push(view),
        }
    }

    /// All sub-views in registration order.
    #[must_use]
    pub fn views(&self) -> &[SubView] {
        &self.views
    }

    /// Current drag state.
    #[must_use]
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Name of the sub-view being dragged.
    #[must_use]
    pub fn active_view(&self) -> Option<&str> {
        match self.drag {
            DragState::Dragging { view, .. } => Some(self.views[view].name()),
            DragState::Idle => None,
        }
    }

    /// Last known cursor position.
    #[must_use]
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Side length of each view's reset control.
    #[must_use]
    pub fn reset_button_size(&self) -> f32 {
        self.reset_button_size
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.views.iter().position(|v| v.name == name)
    }

    fn view_mut(&mut self, name: &str) -> Result<&mut SubView, SomaError> {
        self.index_of(name)
            .map(|i| &mut self.views[i])
            .ok_or_else(|| SomaError::UnknownView(name.to_owned()))
    }

    /// Topmost sub-view containing `pos`: insets (latest first), then main
    /// views.
    fn index_at(&self, pos: Vec2) -> Option<usize> {
        let hit = |kind: ViewKind| {
            self.views
                .iter()
                .rposition(|v| v.kind == kind && v.rect.contains(pos))
        };
        hit(ViewKind::Inset).or_else(|| hit(ViewKind::Main))
    }

    /// Name of the sub-view that owns `pos`.
    #[must_use]
    pub fn view_at(&self, pos: Vec2) -> Option<&str> {
        self.index_at(pos).map(|i| self.views[i].name())
    }

    /// Whether `pos` is over an inset rather than the main view.
    #[must_use]
    pub fn is_mouse_over_pip(&self, pos: Vec2) -> bool {
        self.index_at(pos)
            .is_some_and(|i| self.views[i].kind == ViewKind::Inset)
    }

    /// Move a sub-view's rectangle.
    pub fn set_rect(&mut self, name: &str, rect: Rect) -> Result<(), SomaError> {
        self.view_mut(name)?.rect = rect;
        Ok(())
    }

    /// Set the rotation the view starts in and returns to on reset.
    pub fn set_home_rotation(&mut self, name: &str, rotation: Vec3) -> Result<(), SomaError> {
        let view = self.view_mut(name)?;
        view.home_rotation = rotation;
        view.state.camera.rotation = rotation;
        Ok(())
    }

    /// Enable or disable idle spinning for a sub-view.
    pub fn set_auto_rotate(&mut self, name: &str, enabled: bool) -> Result<(), SomaError> {
        self.view_mut(name)?.state.auto_rotate = enabled;
        Ok(())
    }

    /// State of the named sub-view.
    #[must_use]
    pub fn get_state(&self, name: &str) -> Option<&PipState> {
        self.index_of(name).map(|i| &self.views[i].state)
    }

    /// Restore the named sub-view's zoom to 1 and pan to zero, and its
    /// rotation to the view's home rotation.
    ///
    /// The home rotation is zero unless set with
    /// [`set_home_rotation`](Self::set_home_rotation), so an unconfigured view
    /// resets to rotation zero.
    pub fn reset_pip(&mut self, name: &str) -> Result<(), SomaError> {
        self.view_mut(name)?.reset_to_home();
        log::debug!("reset view {name}");
        Ok(())
    }

    /// Reset the sub-view whose reset control contains `pos`. Returns
    /// whether one was hit.
    pub fn check_reset_button(&mut self, pos: Vec2) -> bool {
        let Some(i) = self.index_at(pos) else {
            return false;
        };
        if !self.views[i].reset_button(self.reset_button_size).contains(pos) {
            return false;
        }
        self.views[i].reset_to_home();
        log::debug!("reset view {}", self.views[i].name);
        true
    }

    /// Pointer pressed at `pos`.
    ///
    /// Starts a rotate (primary) or pan (secondary) drag on the owning
    /// sub-view and turns its auto-rotation off. Primary presses on a reset
    /// control reset instead of dragging. The middle button does nothing.
    pub fn handle_mouse_down(&mut self, pos: Vec2, button: MouseButton) -> bool {
        self.cursor = pos;
        if button == MouseButton::Left && self.check_reset_button(pos) {
            return true;
        }
        let kind = match button {
            MouseButton::Left => DragKind::Rotate,
            MouseButton::Right => DragKind::Pan,
            MouseButton::Middle => return false,
        };
        let Some(view) = self.index_at(pos) else {
            return false;
        };
        self.views[view].state.auto_rotate = false;
        self.drag = DragState::Dragging {
            view,
            kind,
            last: pos,
            travel: 0.0,
        };
        true
    }

    /// Pointer moved to `pos`. Returns whether a view changed.
    pub fn handle_mouse_move(&mut self, pos: Vec2) -> bool {
        self.cursor = pos;
        let DragState::Dragging {
            view,
            kind,
            last,
            travel,
        } = self.drag
        else {
            return false;
        };
        let delta = pos - last;
        self.drag = DragState::Dragging {
            view,
            kind,
            last: pos,
            travel: travel + delta.length(),
        };

        let state = &mut self.views[view].state;
        match kind {
            DragKind::Rotate => {
                state.camera.rotation.y += delta.x * self.camera.rotate_speed;
                state.camera.rotation.x += delta.y * self.camera.rotate_speed;
            }
            DragKind::Pan => state.pan += delta * self.camera.pan_speed,
        }
        delta != Vec2::ZERO
    }

    /// Pointer released. Returns the clicked view name when the pointer
    /// barely moved since the press.
    pub fn handle_mouse_up(&mut self) -> Option<String> {
        let drag = std::mem::take(&mut self.drag);
        match drag {
            DragState::Dragging { view, travel, .. } if travel < CLICK_SLOP => {
                Some(self.views[view].name.clone())
            }
            _ => None,
        }
    }

    /// Wheel at `pos`: zoom the owning sub-view only.
    pub fn handle_wheel(&mut self, pos: Vec2, delta: f32) -> bool {
        self.cursor = pos;
        let Some(i) = self.index_at(pos) else {
            return false;
        };
        let state = &mut self.views[i].state;
        state.zoom = self
            .camera
            .clamp_zoom(state.zoom * (delta * self.camera.zoom_speed).exp());
        true
    }

    /// Feed a platform-agnostic event.
    pub fn handle_event(&mut self, event: InputEvent) -> InputResponse {
        let changed = match event {
            InputEvent::CursorMoved { x, y } => self.handle_mouse_move(Vec2::new(x, y)),
            InputEvent::MouseButton {
                button,
                pressed: true,
            } => self.handle_mouse_down(self.cursor, button),
            InputEvent::MouseButton { pressed: false, .. } => {
                return match self.handle_mouse_up() {
                    Some(view) => InputResponse::Clicked {
                        view,
                        toggle: self.shift,
                    },
                    None => InputResponse::Ignored,
                };
            }
            InputEvent::Scroll { delta } => self.handle_wheel(self.cursor, delta),
            InputEvent::ModifiersChanged { shift } => {
                self.shift = shift;
                false
            }
        };
        if changed {
            InputResponse::Updated
        } else {
            InputResponse::Ignored
        }
    }

    /// Advance auto-rotation on every idle sub-view that has it enabled.
    /// Returns whether anything moved.
    pub fn update(&mut self) -> bool {
        let active = match self.drag {
            DragState::Dragging { view, .. } => Some(view),
            DragState::Idle => None,
        };
        let mut moved = false;
        for (i, view) in self.views.iter_mut().enumerate() {
            if view.state.auto_rotate && Some(i) != active {
                view.state.camera.rotation.y += view.state.auto_rotate_speed;
                moved = true;
            }
        }
        moved
    }

    /// Camera and viewport that display the named sub-view.
    ///
    /// Render and pick in that sub-view must both use this.
    #[must_use]
    pub fn view_for(&self, name: &str) -> Option<View> {
        let view = &self.views[self.index_of(name)?];
        let mut camera = view.state.camera;
        camera.zoom = view.state.zoom;
        let viewport = self
            .camera
            .viewport(view.rect.width, view.rect.height)
            .with_origin(view.rect.origin() + view.state.pan);
        Some(View::new(camera, viewport))
    }
}
