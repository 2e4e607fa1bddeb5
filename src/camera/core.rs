use std::hash::Hasher;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::util::hash::{fingerprint_hasher, hash_vec2, hash_vec3};
use crate::util::vector::rotate_xyz;

/// Perspective camera for the software projector.
///
/// A world point is translated by `-position`, then rotated by
/// [`rotation`](Self::rotation) (Euler order X, then Y, then Z), then pushed
/// [`orbit_distance`](Self::orbit_distance) along camera-space +Z. The
/// camera looks down camera-space +Z, so a camera at `(0, 0, -d)` with zero
/// rotation sees the origin at depth `d`.
///
/// With `position` at the target and a positive `orbit_distance`, changing
/// `rotation` orbits the camera around the target instead of turning it in
/// place; see [`Camera::orbiting`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Euler rotation (radians) applied to the world before projection.
    pub rotation: Vec3,
    /// Perspective strength: `scale = fov / (fov + depth)`. Larger values
    /// flatten the perspective and enlarge distant geometry.
    pub fov: f32,
    /// Multiplier on the projected scale.
    pub zoom: f32,
    /// Camera-space depth added after rotation.
    #[serde(default)]
    pub orbit_distance: f32,
}

impl Camera {
    /// Camera on the -Z axis at `distance`, looking at the origin.
    #[must_use]
    pub fn looking_at_origin(distance: f32, fov: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -distance),
            rotation: Vec3::ZERO,
            fov,
            zoom: 1.0,
            orbit_distance: 0.0,
        }
    }

    /// Camera orbiting the origin at `distance`; rotation turns the world
    /// about the origin.
    #[must_use]
    pub fn orbiting(distance: f32, fov: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov,
            zoom: 1.0,
            orbit_distance: distance,
        }
    }

    /// Transform a world-space point into camera space.
    #[inline]
    #[must_use]
    pub fn to_camera_space(&self, point: Vec3) -> Vec3 {
        rotate_xyz(point - self.position, self.rotation) + Vec3::Z * self.orbit_distance
    }

    /// Transform a world-space direction into camera space (rotation only).
    #[inline]
    #[must_use]
    pub fn direction_to_camera_space(&self, dir: Vec3) -> Vec3 {
        rotate_xyz(dir, self.rotation)
    }

    pub(crate) fn hash_into(&self, hasher: &mut impl Hasher) {
        hash_vec3(self.position, hasher);
        hash_vec3(self.rotation, hasher);
        hasher.write_u32(self.fov.to_bits());
        hasher.write_u32(self.zoom.to_bits());
        hasher.write_u32(self.orbit_distance.to_bits());
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::looking_at_origin(600.0, 600.0)
    }
}

/// Pixel-space target region plus clip distances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Top-left corner of the region on the drawing surface.
    pub origin: Vec2,
    /// Region width in pixels.
    pub width: f32,
    /// Region height in pixels.
    pub height: f32,
    /// Points at or nearer than this depth are not visible.
    pub near: f32,
    /// Points beyond this depth are not visible.
    pub far: f32,
}

impl Viewport {
    /// Viewport anchored at the surface origin.
    #[must_use]
    pub fn new(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            width,
            height,
            near,
            far,
        }
    }

    /// Same viewport moved to a different top-left corner.
    #[must_use]
    pub fn with_origin(self, origin: Vec2) -> Self {
        Self { origin, ..self }
    }

    /// Screen position of the view axis.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin + Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    pub(crate) fn hash_into(&self, hasher: &mut impl Hasher) {
        hash_vec2(self.origin, hasher);
        hasher.write_u32(self.width.to_bits());
        hasher.write_u32(self.height.to_bits());
        hasher.write_u32(self.near.to_bits());
        hasher.write_u32(self.far.to_bits());
    }
}

/// Result of projecting one world-space point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedPoint {
    /// Screen-space X in pixels.
    pub x: f32,
    /// Screen-space Y in pixels.
    pub y: f32,
    /// Perspective size/opacity factor; `<= 0` means not visible.
    pub scale: f32,
    /// Camera-space distance along the view axis (larger = farther).
    pub depth: f32,
}

impl ProjectedPoint {
    /// Screen position as a vector.
    #[inline]
    #[must_use]
    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Whether the point may be drawn or picked.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.scale > 0.0
    }
}

/// A camera paired with the viewport it draws into.
///
/// Rendering and picking for a sub-view must use the same `View`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Camera state.
    pub camera: Camera,
    /// Target region.
    pub viewport: Viewport,
}

impl View {
    /// Pair a camera with a viewport.
    #[must_use]
    pub fn new(camera: Camera, viewport: Viewport) -> Self {
        Self { camera, viewport }
    }

    /// Project a point with this view.
    #[inline]
    #[must_use]
    pub fn project(&self, point: Vec3) -> ProjectedPoint {
        super::projection::project(point, &self.camera, &self.viewport)
    }

    /// Bit-exact fingerprint of camera and viewport state.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = fingerprint_hasher();
        self.camera.hash_into(&mut hasher);
        self.viewport.hash_into(&mut hasher);
        hasher.finish()
    }
}
