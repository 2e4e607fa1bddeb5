//! Camera model and software perspective projection.
//!
//! Provides the camera/viewport records, the point projector used by both
//! the renderer and the picker, and depth fog.

/// Core camera, viewport, and projected-point types.
pub mod core;
/// Perspective projection and depth fog.
pub mod projection;

pub use self::core::{Camera, ProjectedPoint, View, Viewport};
pub use projection::{apply_depth_fog, project, DepthFog, DepthRange};
