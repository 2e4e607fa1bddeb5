//! Region picking against projected geometry.
//!
//! Uses the same projection and visibility tests as the renderer, then
//! checks the cursor against each surviving screen triangle with the
//! barycentric-sign test. The nearest hit wins; equal depths keep mesh
//! order.

mod selection;

use glam::Vec2;
pub use selection::RegionSelection;

use crate::camera::{ProjectedPoint, View};
use crate::mesh::{Mesh, RegionId};
use crate::render::visibility::collect_visible;

/// The face under the cursor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    /// Region of the face, if it has one.
    pub region: Option<RegionId>,
    /// Index into [`Mesh::faces`].
    pub face_index: u32,
    /// Mean camera-space depth of the face.
    pub depth: f32,
}

impl PickHit {
    /// Name of the hit region in `mesh`.
    #[must_use]
    pub fn region_name<'m>(&self, mesh: &'m Mesh) -> Option<&'m str> {
        self.region
            .and_then(|id| mesh.region(id))
            .map(|r| r.name.as_str())
    }
}

#[inline]
fn edge_sign(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    (p.x - b.x) * (a.y - b.y) - (a.x - b.x) * (p.y - b.y)
}

/// Whether `p` lies inside (or on an edge of) triangle `abc`, for either
/// winding.
#[must_use]
pub fn point_in_triangle(p: Vec2, a: Vec2, b: Vec2, c: Vec2) -> bool {
    let d1 = edge_sign(p, a, b);
    let d2 = edge_sign(p, b, c);
    let d3 = edge_sign(p, c, a);
    let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
    let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
    !(has_neg && has_pos)
}

/// Every face under `cursor`, nearest first.
#[must_use]
pub fn pick_all_projected(
    cursor: Vec2,
    mesh: &Mesh,
    projected: &[ProjectedPoint],
    backface_cull: bool,
) -> Vec<PickHit> {
    let mut visible = Vec::new();
    let _ = collect_visible(mesh, projected, backface_cull, &mut visible);

    let mut hits: Vec<PickHit> = visible
        .iter()
        .filter(|vf| {
            let [a, b, c] = vf.screen;
            point_in_triangle(cursor, a, b, c)
        })
        .map(|vf| PickHit {
            region: mesh.faces()[vf.index as usize].region,
            face_index: vf.index,
            depth: vf.depth,
        })
        .collect();
    // Stable, so ties resolve to the earlier face.
    hits.sort_by(|a, b| a.depth.total_cmp(&b.depth));
    hits
}

/// Nearest face under `cursor` given already-projected vertices.
#[must_use]
pub fn pick_projected(
    cursor: Vec2,
    mesh: &Mesh,
    projected: &[ProjectedPoint],
    backface_cull: bool,
) -> Option<PickHit> {
    pick_all_projected(cursor, mesh, projected, backface_cull)
        .into_iter()
        .next()
}

/// Nearest front-facing face under `cursor` in `view`.
///
/// `view` must be the camera and viewport that produced the displayed
/// frame for that sub-view.
#[must_use]
pub fn pick(cursor: Vec2, mesh: &Mesh, view: &View) -> Option<PickHit> {
    let projected: Vec<ProjectedPoint> =
        mesh.vertices().iter().map(|v| view.project(v.position)).collect();
    pick_projected(cursor, mesh, &projected, true)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::{Camera, Viewport};
    use crate::mesh::primitives::generate_sphere;
    use crate::mesh::MeshBuilder;
    use crate::region::{classify_regions, RegionTable};
    use crate::util::color::Rgba;

    fn view() -> View {
        View::new(
            Camera::orbiting(600.0, 600.0),
            Viewport::new(800.0, 600.0, 1.0, 5000.0),
        )
    }

    /// Two stacked facing quads: a near "front" square at z = -50 and a
    /// far "back" square at z = 50, both facing the camera.
    fn stacked() -> Mesh {
        let mut b = MeshBuilder::new();
        for (z, name) in [(-50.0, "front"), (50.0, "back")] {
            let ids: Vec<u32> = [
                Vec3::new(-40.0, -40.0, z),
                Vec3::new(-40.0, 40.0, z),
                Vec3::new(40.0, 40.0, z),
                Vec3::new(40.0, -40.0, z),
            ]
            .into_iter()
            .map(|p| b.push_vertex(p))
            .collect();
            b.push_polygon_in_region(&ids, name);
        }
        let mut mesh = b.build().unwrap();
        let table = RegionTable::new().with_rule("unused", Rgba::WHITE, |_| false);
        classify_regions(&mut mesh, &table).unwrap();
        mesh
    }

    #[test]
    fn triangle_containment_either_winding() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(10.0, 0.0);
        let c = Vec2::new(0.0, 10.0);
        assert!(point_in_triangle(Vec2::new(2.0, 2.0), a, b, c));
        assert!(point_in_triangle(Vec2::new(2.0, 2.0), a, c, b));
        assert!(point_in_triangle(Vec2::new(5.0, 5.0), a, b, c));
        assert!(!point_in_triangle(Vec2::new(6.0, 6.0), a, b, c));
        assert!(!point_in_triangle(Vec2::new(-0.1, 2.0), a, b, c));
    }

    #[test]
    fn nearest_overlapping_face_wins() {
        let mesh = stacked();
        let v = view();
        let hit = pick(v.viewport.center(), &mesh, &v).unwrap();
        assert_eq!(hit.region_name(&mesh), Some("front"));
        assert!((hit.depth - 550.0).abs() < 1e-3);

        let projected: Vec<ProjectedPoint> =
            mesh.vertices().iter().map(|p| v.project(p.position)).collect();
        let all = pick_all_projected(v.viewport.center(), &mesh, &projected, true);
        assert!(all.len() >= 2);
        assert!(all.windows(2).all(|w| w[0].depth <= w[1].depth));
        assert_eq!(all.last().unwrap().region_name(&mesh), Some("back"));
    }

    #[test]
    fn miss_returns_none() {
        let mesh = stacked();
        let v = view();
        assert!(pick(Vec2::new(5.0, 5.0), &mesh, &v).is_none());
    }

    #[test]
    fn picked_region_matches_projected_triangle() {
        let mut mesh = generate_sphere(100.0, 16, 24).unwrap();
        let table = RegionTable::new()
            .with_rule("left", Rgba::WHITE, |p| p.x < -0.1)
            .with_rule("right", Rgba::WHITE, |p| p.x > 0.1);
        classify_regions(&mut mesh, &table).unwrap();
        let v = view();

        // Screen x grows with camera-space x.
        let left = pick(Vec2::new(400.0 - 30.0, 300.0), &mesh, &v).unwrap();
        assert_eq!(left.region_name(&mesh), Some("left"));
        let right = pick(Vec2::new(400.0 + 30.0, 300.0), &mesh, &v).unwrap();
        assert_eq!(right.region_name(&mesh), Some("right"));
        // Only the camera-facing hemisphere is pickable.
        let face = &mesh.faces()[left.face_index as usize];
        assert!(face.normal.z < 0.0);
    }

    #[test]
    fn degenerate_faces_are_not_pickable() {
        let mut b = MeshBuilder::new();
        let _ = b.push_vertex(Vec3::new(-40.0, 0.0, 0.0));
        let _ = b.push_vertex(Vec3::new(40.0, 0.0, 0.0));
        b.push_triangle([0, 1, 1]);
        let mesh = b.build().unwrap();
        let v = view();
        // The cursor sits on the collapsed triangle's only edge.
        let cursor = v.viewport.center();
        assert!(pick(cursor, &mesh, &v).is_none());

        let projected: Vec<_> =
            mesh.vertices().iter().map(|p| v.project(p.position)).collect();
        assert!(pick_all_projected(cursor, &mesh, &projected, false).is_empty());
    }

    #[test]
    fn wrong_camera_picks_differently() {
        let mesh = stacked();
        let v = view();
        let mut turned = v;
        turned.camera.rotation.y = std::f32::consts::PI;
        let hit = pick(v.viewport.center(), &mesh, &turned);
        // Rotated half a turn, both squares face away.
        assert!(hit.is_none());
    }
}
