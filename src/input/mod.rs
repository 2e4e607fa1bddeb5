//! Input handling: platform-agnostic events, sub-view layout, and the
//! per-view camera controller.

/// Platform-agnostic input events.
pub mod event;
/// Corner-anchored inset rectangles.
pub mod layout;
/// Multi-view camera interaction.
pub mod pip;

pub use event::{InputEvent, MouseButton};
pub use layout::{anchored_rect, inset_rects, reset_button_rect};
pub use pip::{
    DragKind, DragState, InputResponse, PipController, PipState, SubView,
    ViewKind,
};
