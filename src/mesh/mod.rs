//! Triangle meshes for the software renderer.
//!
//! A [`Mesh`] is generated once (by [`primitives`] or [`deform`] through a
//! [`MeshBuilder`]) and is immutable afterwards, except for its region data
//! which [`crate::region::classify_regions`] fills in as a single post-pass.
//!
//! Winding convention: every face's indices are ordered so that
//! `(b - a) × (c - a)` points out of the surface. Backface culling and
//! lighting both rely on this.

mod builder;
/// Mesh cache keyed by logical names.
pub mod cache;
/// Anatomical deformation of a unit sphere.
pub mod deform;
/// Bezier curves and orthonormal frames for tube extrusion.
pub mod frame;
/// Parametric surface generators.
pub mod primitives;

use std::hash::Hasher;
use std::ops::Range;

pub use builder::MeshBuilder;
pub use cache::MeshCache;
use glam::Vec3;

use crate::error::SomaError;
use crate::util::color::Rgba;
use crate::util::hash::{fingerprint_hasher, hash_vec3};

/// Index of a region in [`Mesh::regions`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u16);

impl RegionId {
    /// Position in the region list.
    #[inline]
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

/// A mesh vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    /// World-space position.
    pub position: Vec3,
    /// Region assigned by classification (`None` until classified, or if
    /// no predicate matched).
    pub region: Option<RegionId>,
    /// Generator-defined vertex kind (e.g. head group vs tail in a bilayer).
    pub kind: Option<u32>,
    /// Optional color that overrides the region color for faces whose first
    /// vertex carries it.
    pub color_hint: Option<Rgba>,
}

impl Vertex {
    /// Plain vertex at `position`.
    #[must_use]
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            region: None,
            kind: None,
            color_hint: None,
        }
    }
}

/// A triangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// Vertex indices, outward winding.
    pub indices: [u32; 3],
    /// Region derived from the vertices (or the override).
    pub region: Option<RegionId>,
    /// Region name forced by the generator, taking precedence over
    /// vertex-derived regions.
    pub region_override: Option<Box<str>>,
    /// Unit geometric normal in world space; zero for degenerate faces.
    pub normal: Vec3,
}

impl Face {
    /// Face with no region.
    #[must_use]
    pub fn new(indices: [u32; 3]) -> Self {
        Self {
            indices,
            region: None,
            region_override: None,
            normal: Vec3::ZERO,
        }
    }

    /// Whether the face has zero area.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vec3::ZERO
    }
}

/// Summary of one named region after classification.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionInfo {
    /// Region name.
    pub name: String,
    /// Base material color.
    pub color: Rgba,
    /// Vertices assigned to the region, ascending.
    pub vertex_indices: Vec<u32>,
    /// Number of faces whose region is this one.
    pub face_count: usize,
    /// Mean position of the region's vertices (or, for regions that only
    /// exist through face overrides, of those faces' vertices).
    pub centroid: Option<Vec3>,
}

/// An edge separating two faces of different regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoundaryEdge {
    /// Lower vertex index.
    pub i1: u32,
    /// Higher vertex index.
    pub i2: u32,
    /// The two faces sharing the edge.
    pub faces: [u32; 2],
}

/// Latitude/longitude vertex grid inside a mesh (sphere-like surfaces).
///
/// Vertex `(row, col)` lives at `base + row * cols + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridTopology {
    /// First vertex of the grid.
    pub base: u32,
    /// Number of latitude rings.
    pub rows: u32,
    /// Vertices per ring.
    pub cols: u32,
}

impl GridTopology {
    /// Vertex indices of one latitude ring.
    #[must_use]
    pub fn row(&self, row: u32) -> Range<u32> {
        let start = self.base + row * self.cols;
        start..start + self.cols
    }
}

/// Immutable geometry plus region metadata.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub(crate) vertices: Vec<Vertex>,
    pub(crate) faces: Vec<Face>,
    pub(crate) regions: Vec<RegionInfo>,
    pub(crate) boundaries: Vec<BoundaryEdge>,
    grids: Vec<GridTopology>,
    nominal_radius: f32,
    fingerprint: u64,
}

impl Mesh {
    /// Build a mesh, validating indices and computing face normals.
    pub fn new(
        vertices: Vec<Vertex>,
        faces: Vec<Face>,
        nominal_radius: f32,
    ) -> Result<Self, SomaError> {
        validate_faces(&vertices, &faces)?;
        Ok(Self::new_unchecked(vertices, faces, nominal_radius))
    }

    /// Build a mesh without validating face indices.
    ///
    /// Out-of-range faces survive into the mesh; the renderer and picker
    /// assert on them in debug builds and skip them in release builds.
    #[must_use]
    pub fn new_unchecked(
        vertices: Vec<Vertex>,
        mut faces: Vec<Face>,
        nominal_radius: f32,
    ) -> Self {
        for face in &mut faces {
            face.normal = geometric_normal(&vertices, face.indices);
        }

        let mut hasher = fingerprint_hasher();
        hasher.write_usize(vertices.len());
        for v in &vertices {
            hash_vec3(v.position, &mut hasher);
        }
        hasher.write_usize(faces.len());
        for face in &faces {
            for i in face.indices {
                hasher.write_u32(i);
            }
        }

        Self {
            vertices,
            faces,
            regions: Vec::new(),
            boundaries: Vec::new(),
            grids: Vec::new(),
            nominal_radius,
            fingerprint: hasher.finish(),
        }
    }

    pub(crate) fn with_grids(mut self, grids: Vec<GridTopology>) -> Self {
        self.grids = grids;
        self
    }

    /// All vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All faces.
    #[must_use]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Regions in classification priority order.
    #[must_use]
    pub fn regions(&self) -> &[RegionInfo] {
        &self.regions
    }

    /// Region record for an id.
    #[must_use]
    pub fn region(&self, id: RegionId) -> Option<&RegionInfo> {
        self.regions.get(id.index())
    }

    /// Look up a region id by name.
    #[must_use]
    pub fn region_id(&self, name: &str) -> Option<RegionId> {
        self.regions
            .iter()
            .position(|r| r.name == name)
            .map(|i| RegionId(i as u16))
    }

    /// Name of a face's region, if it has one.
    #[must_use]
    pub fn face_region_name(&self, face: usize) -> Option<&str> {
        let id = self.faces.get(face)?.region?;
        self.region(id).map(|r| r.name.as_str())
    }

    /// Edges separating differently-named regions.
    #[must_use]
    pub fn boundaries(&self) -> &[BoundaryEdge] {
        &self.boundaries
    }

    /// Latitude grids available for the wireframe overlay.
    #[must_use]
    pub fn grids(&self) -> &[GridTopology] {
        &self.grids
    }

    /// Radius used to normalize positions for region predicates.
    #[must_use]
    pub fn nominal_radius(&self) -> f32 {
        self.nominal_radius
    }

    /// Geometry fingerprint, stable for identical vertex/face buffers.
    #[must_use]
    pub fn fingerprint(&self) -> u64 {
        self.fingerprint
    }

    /// Positions of a face's vertices, or `None` if any index is out of
    /// range.
    #[inline]
    #[must_use]
    pub fn face_positions(&self, face: &Face) -> Option<[Vec3; 3]> {
        let [a, b, c] = face.indices;
        Some([
            self.vertices.get(a as usize)?.position,
            self.vertices.get(b as usize)?.position,
            self.vertices.get(c as usize)?.position,
        ])
    }

    /// Axis-aligned bounds `(min, max)` of all vertices.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.vertices.iter().fold(None, |acc, v| {
            let p = v.position;
            Some(match acc {
                None => (p, p),
                Some((lo, hi)) => (lo.min(p), hi.max(p)),
            })
        })
    }
}

fn validate_faces(vertices: &[Vertex], faces: &[Face]) -> Result<(), SomaError> {
    let vertex_count = vertices.len();
    for (face_idx, face) in faces.iter().enumerate() {
        if let Some(&bad) =
            face.indices.iter().find(|&&i| i as usize >= vertex_count)
        {
            return Err(SomaError::InvalidFace {
                face: face_idx,
                index: bad,
                vertex_count,
            });
        }
    }
    Ok(())
}

fn geometric_normal(vertices: &[Vertex], indices: [u32; 3]) -> Vec3 {
    let get = |i: u32| vertices.get(i as usize).map(|v| v.position);
    match (get(indices[0]), get(indices[1]), get(indices[2])) {
        (Some(a), Some(b), Some(c)) => (b - a).cross(c - a).normalize_or_zero(),
        _ => Vec3::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> (Vec<Vertex>, Vec<Face>) {
        let vertices = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ]
        .into_iter()
        .map(Vertex::new)
        .collect();
        let faces = vec![Face::new([0, 1, 2]), Face::new([0, 2, 3])];
        (vertices, faces)
    }

    #[test]
    fn normals_follow_winding() {
        let (v, f) = quad();
        let mesh = Mesh::new(v, f, 1.0).unwrap();
        for face in mesh.faces() {
            assert_eq!(face.normal, Vec3::Z);
        }
    }

    #[test]
    fn out_of_range_face_is_rejected() {
        let (v, mut f) = quad();
        f.push(Face::new([0, 2, 9]));
        match Mesh::new(v, f, 1.0) {
            Err(SomaError::InvalidFace {
                face,
                index,
                vertex_count,
            }) => {
                assert_eq!((face, index, vertex_count), (2, 9, 4));
            }
            other => panic!("expected InvalidFace, got {other:?}"),
        }
    }

    #[test]
    fn degenerate_face_has_zero_normal() {
        let (v, _) = quad();
        let mesh = Mesh::new(v, vec![Face::new([0, 1, 1])], 1.0).unwrap();
        assert!(mesh.faces()[0].is_degenerate());
    }

    #[test]
    fn fingerprint_is_stable_and_sensitive() {
        let (v, f) = quad();
        let a = Mesh::new(v.clone(), f.clone(), 1.0).unwrap();
        let b = Mesh::new(v.clone(), f.clone(), 1.0).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());

        let mut moved = v;
        moved[3].position.x += 0.5;
        let c = Mesh::new(moved, f, 1.0).unwrap();
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn grid_rows_index_contiguously() {
        let grid = GridTopology {
            base: 10,
            rows: 3,
            cols: 4,
        };
        assert_eq!(grid.row(1).collect::<Vec<_>>(), [14, 15, 16, 17]);
    }
}
