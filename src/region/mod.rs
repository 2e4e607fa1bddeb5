//! Region classification and boundary extraction.
//!
//! A [`RegionTable`] is an ordered list of named predicates over
//! radius-normalized positions. [`classify_regions`] assigns each vertex the
//! first matching rule, derives face regions, records per-region vertex lists
//! and centroids, and extracts the [`BoundaryEdge`]s separating regions.

/// Default anatomical table for brain meshes.
pub mod brain;

use std::fmt;

use glam::Vec3;
use rustc_hash::FxHashMap;

use crate::error::SomaError;
use crate::mesh::{BoundaryEdge, Face, Mesh, RegionId, RegionInfo, Vertex};
use crate::util::color::Rgba;
use crate::util::vector::centroid;

/// Test over a position normalized by the mesh's nominal radius.
pub type RegionPredicate = Box<dyn Fn(Vec3) -> bool + Send + Sync>;

/// Color given to override-only regions that have no table entry.
pub const NEUTRAL_REGION_COLOR: Rgba = Rgba::new(0.7, 0.7, 0.7, 1.0);

/// One named rule.
pub struct RegionRule {
    /// Region name.
    pub name: String,
    /// Base material color.
    pub color: Rgba,
    predicate: RegionPredicate,
}

impl RegionRule {
    /// Whether a normalized position belongs to this region.
    #[inline]
    #[must_use]
    pub fn matches(&self, p: Vec3) -> bool {
        (self.predicate)(p)
    }
}

impl fmt::Debug for RegionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionRule")
            .field("name", &self.name)
            .field("color", &self.color)
            .finish_non_exhaustive()
    }
}

/// Ordered predicate list; earlier rules win.
#[derive(Debug, Default)]
pub struct RegionTable {
    rules: Vec<RegionRule>,
}

impl RegionTable {
    /// Empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule with the lowest priority so far.
    #[must_use]
    pub fn with_rule(
        mut self,
        name: impl Into<String>,
        color: Rgba,
        predicate: impl Fn(Vec3) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.push(name, color, predicate);
        self
    }

    /// Append a rule with the lowest priority so far.
    pub fn push(
        &mut self,
        name: impl Into<String>,
        color: Rgba,
        predicate: impl Fn(Vec3) -> bool + Send + Sync + 'static,
    ) {
        self.rules.push(RegionRule {
            name: name.into(),
            color,
            predicate: Box::new(predicate),
        });
    }

    /// Rules in priority order.
    #[must_use]
    pub fn rules(&self) -> &[RegionRule] {
        &self.rules
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Index of the first rule matching a normalized position.
    #[must_use]
    pub fn classify(&self, normalized: Vec3) -> Option<usize> {
        self.rules.iter().position(|r| r.matches(normalized))
    }

    /// Replace the color of a named rule. Returns whether it exists.
    pub fn set_color(&mut self, name: &str, color: Rgba) -> bool {
        match self.rules.iter_mut().find(|r| r.name == name) {
            Some(rule) => {
                rule.color = color;
                true
            }
            None => false,
        }
    }
}

/// Assign regions to every vertex and face of `mesh` and extract its
/// boundary edges.
///
/// Any previous classification is discarded first, so running this twice
/// with the same table gives identical results. Faces carrying a
/// `region_override` take that region; override names missing from the
/// table are appended after the table's regions.
pub fn classify_regions(
    mesh: &mut Mesh,
    table: &RegionTable,
) -> Result<(), SomaError> {
    if table.is_empty() {
        return Err(SomaError::EmptyRegionTable);
    }

    let mut regions: Vec<RegionInfo> = table
        .rules()
        .iter()
        .map(|rule| RegionInfo {
            name: rule.name.clone(),
            color: rule.color,
            vertex_indices: Vec::new(),
            face_count: 0,
            centroid: None,
        })
        .collect();

    let inv_radius = if mesh.nominal_radius() > f32::EPSILON {
        mesh.nominal_radius().recip()
    } else {
        1.0
    };

    for (i, vertex) in mesh.vertices.iter_mut().enumerate() {
        vertex.region = table
            .classify(vertex.position * inv_radius)
            .map(|r| RegionId(r as u16));
        if let Some(id) = vertex.region {
            regions[id.index()].vertex_indices.push(i as u32);
        }
    }

    let mut override_members: FxHashMap<u16, Vec<Vec3>> = FxHashMap::default();
    for face in &mut mesh.faces {
        face.region = match face.region_override.as_deref() {
            Some(name) => {
                let id = region_for_override(&mut regions, name);
                if let Some(pos) = face_positions(&mesh.vertices, face) {
                    override_members.entry(id.0).or_default().extend(pos);
                }
                Some(id)
            }
            None => face
                .indices
                .iter()
                .find_map(|&i| mesh.vertices.get(i as usize)?.region),
        };
        if let Some(id) = face.region {
            regions[id.index()].face_count += 1;
        }
    }

    for (idx, region) in regions.iter_mut().enumerate() {
        region.centroid = if region.vertex_indices.is_empty() {
            override_members
                .get(&(idx as u16))
                .and_then(|pts| centroid(pts.iter().copied()))
        } else {
            centroid(
                region
                    .vertex_indices
                    .iter()
                    .map(|&i| mesh.vertices[i as usize].position),
            )
        };
    }

    log::debug!(
        "classified {} vertices into {} regions",
        mesh.vertices.len(),
        regions.len()
    );
    mesh.regions = regions;
    mesh.boundaries = extract_boundaries(mesh);
    Ok(())
}

fn region_for_override(regions: &mut Vec<RegionInfo>, name: &str) -> RegionId {
    if let Some(i) = regions.iter().position(|r| r.name == name) {
        return RegionId(i as u16);
    }
    regions.push(RegionInfo {
        name: name.to_owned(),
        color: NEUTRAL_REGION_COLOR,
        vertex_indices: Vec::new(),
        face_count: 0,
        centroid: None,
    });
    RegionId((regions.len() - 1) as u16)
}

fn face_positions(
    vertices: &[Vertex],
    face: &Face,
) -> Option<[Vec3; 3]> {
    let [a, b, c] = face.indices;
    Some([
        vertices.get(a as usize)?.position,
        vertices.get(b as usize)?.position,
        vertices.get(c as usize)?.position,
    ])
}

/// Edges shared by exactly two faces whose regions are both set and differ.
///
/// Edges are keyed by their sorted index pair; the result is ordered by
/// `(i1, i2)`.
#[must_use]
pub fn extract_boundaries(mesh: &Mesh) -> Vec<BoundaryEdge> {
    let vertex_count = mesh.vertices().len();
    let mut edges: FxHashMap<(u32, u32), Vec<u32>> = FxHashMap::default();

    for (fi, face) in mesh.faces().iter().enumerate() {
        if face.indices.iter().any(|&i| i as usize >= vertex_count) {
            continue;
        }
        let [a, b, c] = face.indices;
        for (u, v) in [(a, b), (b, c), (c, a)] {
            if u == v {
                continue;
            }
            edges.entry((u.min(v), u.max(v))).or_default().push(fi as u32);
        }
    }

    let faces = mesh.faces();
    let mut boundaries: Vec<BoundaryEdge> = edges
        .into_iter()
        .filter_map(|((i1, i2), sharing)| {
            let [f1, f2] = <[u32; 2]>::try_from(sharing).ok()?;
            let r1 = faces[f1 as usize].region?;
            let r2 = faces[f2 as usize].region?;
            (r1 != r2).then_some(BoundaryEdge {
                i1,
                i2,
                faces: [f1, f2],
            })
        })
        .collect();
    boundaries.sort_unstable_by_key(|e| (e.i1, e.i2));
    boundaries
}

/// Recolor a classified mesh's region by name. Returns whether it exists.
pub fn set_region_color(mesh: &mut Mesh, name: &str, color: Rgba) -> bool {
    match mesh.regions.iter_mut().find(|r| r.name == name) {
        Some(region) => {
            region.color = color;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::primitives::generate_sphere;
    use crate::mesh::MeshBuilder;

    fn hemispheres() -> RegionTable {
        RegionTable::new()
            .with_rule("left", Rgba::new(1.0, 0.0, 0.0, 1.0), |p| p.x < 0.0)
            .with_rule("right", Rgba::new(0.0, 0.0, 1.0, 1.0), |p| p.x > 0.0)
    }

    fn region_snapshot(mesh: &Mesh) -> (Vec<Option<RegionId>>, Vec<Option<RegionId>>) {
        (
            mesh.vertices().iter().map(|v| v.region).collect(),
            mesh.faces().iter().map(|f| f.region).collect(),
        )
    }

    #[test]
    fn empty_table_is_an_error() {
        let mut mesh = generate_sphere(1.0, 4, 6).unwrap();
        assert!(matches!(
            classify_regions(&mut mesh, &RegionTable::new()),
            Err(SomaError::EmptyRegionTable)
        ));
    }

    #[test]
    fn first_matching_rule_wins() {
        let table = RegionTable::new()
            .with_rule("top", Rgba::WHITE, |p| p.y > 0.5)
            .with_rule("upper", Rgba::WHITE, |p| p.y > 0.0);
        assert_eq!(table.classify(Vec3::new(0.0, 0.9, 0.0)), Some(0));
        assert_eq!(table.classify(Vec3::new(0.0, 0.2, 0.0)), Some(1));
        assert_eq!(table.classify(Vec3::new(0.0, -0.2, 0.0)), None);
    }

    #[test]
    fn positions_are_normalized_by_radius() {
        let mut mesh = generate_sphere(200.0, 8, 12).unwrap();
        let table =
            RegionTable::new().with_rule("cap", Rgba::WHITE, |p| p.y > 0.9);
        classify_regions(&mut mesh, &table).unwrap();
        let cap = &mesh.regions()[0];
        assert!(!cap.vertex_indices.is_empty());
        for &i in &cap.vertex_indices {
            assert!(mesh.vertices()[i as usize].position.y > 180.0);
        }
        let c = cap.centroid.unwrap();
        assert!(c.x.abs() < 1e-3 && c.z.abs() < 1e-3 && c.y > 180.0);
    }

    #[test]
    fn classification_is_idempotent() {
        let mut mesh = generate_sphere(10.0, 10, 16).unwrap();
        let table = hemispheres();
        classify_regions(&mut mesh, &table).unwrap();
        let first = region_snapshot(&mesh);
        let first_boundaries = mesh.boundaries().to_vec();
        classify_regions(&mut mesh, &table).unwrap();
        assert_eq!(region_snapshot(&mesh), first);
        assert_eq!(mesh.boundaries(), first_boundaries.as_slice());
        assert_eq!(mesh.regions().len(), 2);
    }

    #[test]
    fn unmatched_vertices_stay_unassigned() {
        let mut mesh = generate_sphere(1.0, 6, 8).unwrap();
        let table =
            RegionTable::new().with_rule("north", Rgba::WHITE, |p| p.y > 0.8);
        classify_regions(&mut mesh, &table).unwrap();
        assert!(mesh.vertices().iter().any(|v| v.region.is_none()));
        assert!(mesh.faces().iter().any(|f| f.region.is_none()));
    }

    #[test]
    fn face_region_is_first_assigned_vertex() {
        let mut b = MeshBuilder::new();
        let v0 = b.push_vertex(Vec3::new(0.0, 0.0, 0.0));
        let v1 = b.push_vertex(Vec3::new(1.0, 0.0, 0.0));
        let v2 = b.push_vertex(Vec3::new(1.0, 1.0, 0.0));
        let v3 = b.push_vertex(Vec3::new(0.0, 1.0, 0.0));
        b.push_triangle([v1, v2, v0]);
        b.push_triangle([v2, v3, v0]);
        let mut mesh = b.build().unwrap();

        let table = RegionTable::new()
            .with_rule("a", Rgba::WHITE, |p| p.x > 0.5 && p.y < 0.5)
            .with_rule("b", Rgba::WHITE, |_| true);
        classify_regions(&mut mesh, &table).unwrap();

        assert_eq!(mesh.face_region_name(0), Some("a"));
        assert_eq!(mesh.face_region_name(1), Some("b"));
        assert_eq!(mesh.boundaries().len(), 1);
        let edge = mesh.boundaries()[0];
        assert_eq!((edge.i1, edge.i2), (v0, v2));
        assert_eq!(edge.faces, [0, 1]);
    }

    #[test]
    fn single_region_has_no_boundaries() {
        let mut mesh = generate_sphere(1.0, 8, 12).unwrap();
        let table = RegionTable::new().with_rule("all", Rgba::WHITE, |_| true);
        classify_regions(&mut mesh, &table).unwrap();
        assert!(mesh.boundaries().is_empty());
        assert_eq!(mesh.regions()[0].face_count, mesh.faces().len());
    }

    #[test]
    fn boundaries_only_separate_distinct_assigned_regions() {
        let mut mesh = generate_sphere(1.0, 12, 16).unwrap();
        classify_regions(&mut mesh, &hemispheres()).unwrap();
        assert!(!mesh.boundaries().is_empty());
        for edge in mesh.boundaries() {
            let [f1, f2] = edge.faces;
            let r1 = mesh.faces()[f1 as usize].region;
            let r2 = mesh.faces()[f2 as usize].region;
            assert!(r1.is_some() && r2.is_some());
            assert_ne!(r1, r2);
            assert!(edge.i1 < edge.i2);
        }
    }

    #[test]
    fn overrides_take_precedence_and_create_regions() {
        let mut b = MeshBuilder::new();
        let ids: Vec<u32> = [Vec3::ZERO, Vec3::X, Vec3::Y]
            .into_iter()
            .map(|p| b.push_vertex_with(Vertex::new(p)))
            .collect();
        b.push_polygon_in_region(&ids, "cap");
        b.push_triangle([ids[0], ids[1], ids[2]]);
        let mut mesh = b.build().unwrap();

        let table = RegionTable::new().with_rule("all", Rgba::WHITE, |_| true);
        classify_regions(&mut mesh, &table).unwrap();

        assert_eq!(mesh.face_region_name(0), Some("cap"));
        assert_eq!(mesh.face_region_name(1), Some("all"));
        let cap = &mesh.regions()[mesh.region_id("cap").unwrap().index()];
        assert_eq!(cap.color, NEUTRAL_REGION_COLOR);
        assert_eq!(cap.face_count, 1);
        assert!(cap.centroid.is_some());
    }

    #[test]
    fn recolor_by_name() {
        let mut mesh = generate_sphere(1.0, 4, 6).unwrap();
        classify_regions(&mut mesh, &hemispheres()).unwrap();
        assert!(set_region_color(&mut mesh, "left", Rgba::BLACK));
        assert!(!set_region_color(&mut mesh, "nowhere", Rgba::BLACK));
        assert_eq!(mesh.regions()[0].color, Rgba::BLACK);
    }
}
