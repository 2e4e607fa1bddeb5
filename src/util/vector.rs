//! Euclidean vector helpers and axis rotations.
//!
//! Thin wrappers over [`glam::Vec3`] so callers that think in terms of the
//! classic canvas helpers (`distance`, `normalize`, `rotate_y`, ...) get the
//! same names. All functions are pure.

use glam::Vec3;

/// Distance between two points.
#[inline]
#[must_use]
pub fn distance(a: Vec3, b: Vec3) -> f32 {
    a.distance(b)
}

/// Unit-length copy of `v`, or the zero vector when `v` has no length.
#[inline]
#[must_use]
pub fn normalize(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// Dot product.
#[inline]
#[must_use]
pub fn dot(a: Vec3, b: Vec3) -> f32 {
    a.dot(b)
}

/// Cross product (right-handed).
#[inline]
#[must_use]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(b)
}

/// Rotate `p` about the X axis by `angle` radians.
#[inline]
#[must_use]
pub fn rotate_x(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x, p.y * c - p.z * s, p.y * s + p.z * c)
}

/// Rotate `p` about the Y axis by `angle` radians.
#[inline]
#[must_use]
pub fn rotate_y(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x * c + p.z * s, p.y, -p.x * s + p.z * c)
}

/// Rotate `p` about the Z axis by `angle` radians.
#[inline]
#[must_use]
pub fn rotate_z(p: Vec3, angle: f32) -> Vec3 {
    let (s, c) = angle.sin_cos();
    Vec3::new(p.x * c - p.y * s, p.x * s + p.y * c, p.z)
}

/// Apply the engine's Euler order: X, then Y, then Z.
#[inline]
#[must_use]
pub fn rotate_xyz(p: Vec3, rotation: Vec3) -> Vec3 {
    rotate_z(rotate_y(rotate_x(p, rotation.x), rotation.y), rotation.z)
}

/// Mean of a set of points, or `None` for an empty set.
#[must_use]
pub fn centroid(points: impl IntoIterator<Item = Vec3>) -> Option<Vec3> {
    let (sum, count) = points
        .into_iter()
        .fold((Vec3::ZERO, 0usize), |(s, n), p| (s + p, n + 1));
    (count > 0).then(|| sum / count as f32)
}
