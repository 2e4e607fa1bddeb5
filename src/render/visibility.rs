//! Per-face visibility shared by the renderer and the picker.
//!
//! A face survives when all three vertices are visible
//! (`scale > 0`), its indices are in range, it has non-zero area, and
//! (when culling is enabled) its projected winding faces the viewer.

use glam::Vec2;

use crate::camera::ProjectedPoint;
use crate::mesh::Mesh;

/// A face that passed the visibility tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleFace {
    /// Index into [`Mesh::faces`].
    pub index: u32,
    /// Projected corners.
    pub screen: [Vec2; 3],
    /// Mean of the three vertex depths.
    pub depth: f32,
    /// Signed screen area (doubled); negative for front faces.
    pub signed_area: f32,
}

/// Why faces were dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CullCounts {
    /// At least one vertex had `scale <= 0`.
    pub hidden: usize,
    /// Facing away from the viewer.
    pub backfacing: usize,
    /// Out-of-range indices (skipped in release builds).
    pub invalid: usize,
    /// Zero-area in world space.
    pub degenerate: usize,
}

impl CullCounts {
    /// Total dropped faces.
    #[must_use]
    pub fn total(&self) -> usize {
        self.hidden + self.backfacing + self.invalid + self.degenerate
    }
}

/// Doubled signed area of a screen triangle.
///
/// With the screen's Y axis pointing down, outward-wound faces that face
/// the camera come out negative.
#[inline]
#[must_use]
pub fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
    (b - a).perp_dot(c - a)
}

/// Whether a face with this signed area faces the viewer.
#[inline]
#[must_use]
pub fn is_front_facing(signed_area: f32) -> bool {
    signed_area < 0.0
}

/// Fill `out` with every face of `mesh` that is visible under `projected`.
///
/// `projected` must hold one entry per mesh vertex. Faces keep mesh order.
/// Out-of-range faces panic in debug builds.
pub fn collect_visible(
    mesh: &Mesh,
    projected: &[ProjectedPoint],
    backface_cull: bool,
    out: &mut Vec<VisibleFace>,
) -> CullCounts {
    out.clear();
    let mut counts = CullCounts::default();

    for (index, face) in mesh.faces().iter().enumerate() {
        let [ia, ib, ic] = face.indices;
        let corners = (
            projected.get(ia as usize),
            projected.get(ib as usize),
            projected.get(ic as usize),
        );
        let (Some(a), Some(b), Some(c)) = corners else {
            debug_assert!(
                false,
                "face {index} has a vertex index out of range ({:?}, {} vertices)",
                face.indices,
                projected.len()
            );
            counts.invalid += 1;
            continue;
        };

        if !(a.is_visible() && b.is_visible() && c.is_visible()) {
            counts.hidden += 1;
            continue;
        }
        if face.is_degenerate() {
            counts.degenerate += 1;
            continue;
        }

        let screen = [a.screen(), b.screen(), c.screen()];
        let area = signed_area(screen[0], screen[1], screen[2]);
        if backface_cull && !is_front_facing(area) {
            counts.backfacing += 1;
            continue;
        }

        out.push(VisibleFace {
            index: index as u32,
            screen,
            depth: (a.depth + b.depth + c.depth) / 3.0,
            signed_area: area,
        });
    }

    counts
}
