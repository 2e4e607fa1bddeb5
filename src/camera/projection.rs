//! Perspective projection and depth fog.

use glam::Vec3;

use super::core::{Camera, ProjectedPoint, Viewport};
use crate::util::easing::EasingFunction;

/// Points at or nearer than this camera-space depth are never visible, even
/// if the viewport's near plane is configured at or below zero.
pub const NEAR_EPSILON: f32 = 1e-3;

/// Project a world-space point into the viewport.
///
/// `depth` is the camera-space Z (distance along the view axis) and
/// `scale = zoom * fov / (fov + depth)`. Points at or in front of the near
/// plane, or beyond the far plane, come back with `scale == 0`; their screen
/// position is pinned to the viewport center and must not be used.
#[must_use]
pub fn project(
    point: Vec3,
    camera: &Camera,
    viewport: &Viewport,
) -> ProjectedPoint {
    let cam = camera.to_camera_space(point);
    let depth = cam.z;
    let center = viewport.center();

    if depth <= viewport.near.max(NEAR_EPSILON) || depth > viewport.far {
        return ProjectedPoint {
            x: center.x,
            y: center.y,
            scale: 0.0,
            depth,
        };
    }

    let scale = camera.zoom * camera.fov / (camera.fov + depth);
    ProjectedPoint {
        x: center.x + cam.x * scale,
        y: center.y + cam.y * scale,
        scale,
        depth,
    }
}

/// Project every point of a slice into `out`, reusing its allocation.
pub fn project_all(
    points: impl IntoIterator<Item = Vec3>,
    camera: &Camera,
    viewport: &Viewport,
    out: &mut Vec<ProjectedPoint>,
) {
    out.clear();
    out.extend(points.into_iter().map(|p| project(p, camera, viewport)));
}

/// Linearly fade `base_alpha` as a normalized `depth` goes from `near_fog`
/// to `far_fog`. The result is clamped to `[0, base_alpha]`.
#[must_use]
pub fn apply_depth_fog(
    base_alpha: f32,
    depth: f32,
    near_fog: f32,
    far_fog: f32,
) -> f32 {
    DepthFog {
        near: near_fog,
        far: far_fog,
        floor: 0.0,
        curve: EasingFunction::Linear,
    }
    .apply(base_alpha, depth)
}

/// Depth fog parameters over a normalized depth in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthFog {
    /// Normalized depth where fading begins.
    pub near: f32,
    /// Normalized depth where fading reaches `floor`.
    pub far: f32,
    /// Fraction of the base alpha kept at full fog.
    pub floor: f32,
    /// Shape of the fade between `near` and `far`.
    pub curve: EasingFunction,
}

impl Default for DepthFog {
    fn default() -> Self {
        Self {
            near: 0.2,
            far: 0.8,
            floor: 0.0,
            curve: EasingFunction::Linear,
        }
    }
}

impl DepthFog {
    /// Faded alpha for `base_alpha` at normalized `depth`.
    #[must_use]
    pub fn apply(&self, base_alpha: f32, depth: f32) -> f32 {
        let base = base_alpha.max(0.0);
        let span = self.far - self.near;
        let t = if span <= f32::EPSILON {
            if depth >= self.far {
                1.0
            } else {
                0.0
            }
        } else {
            (depth - self.near) / span
        };
        let fade = self.curve.evaluate(t) * (1.0 - self.floor.clamp(0.0, 1.0));
        (base * (1.0 - fade)).clamp(0.0, base)
    }
}

/// Maps absolute face depths onto `[0, 1]` for fog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthRange {
    /// Nearest depth in the frame.
    pub min: f32,
    /// Farthest depth in the frame.
    pub max: f32,
}

impl DepthRange {
    /// Range covering every depth yielded by `depths`, or `None` if empty.
    pub fn from_depths(depths: impl IntoIterator<Item = f32>) -> Option<Self> {
        depths.into_iter().fold(None, |acc, d| {
            Some(match acc {
                None => Self { min: d, max: d },
                Some(r) => Self {
                    min: r.min.min(d),
                    max: r.max.max(d),
                },
            })
        })
    }

    /// Normalized position of `depth` in the range.
    #[inline]
    #[must_use]
    pub fn normalize(&self, depth: f32) -> f32 {
        let span = self.max - self.min;
        if span <= f32::EPSILON {
            0.0
        } else {
            ((depth - self.min) / span).clamp(0.0, 1.0)
        }
    }
}
