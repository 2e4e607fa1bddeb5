use glam::Vec3;

use super::{Face, GridTopology, Mesh, Vertex};
use crate::error::SomaError;

/// Accumulates vertices and faces from one or more generators.
///
/// Polygons are fan-triangulated on insertion so the finished [`Mesh`] only
/// ever holds triangles.
#[derive(Debug, Clone, Default)]
pub struct MeshBuilder {
    vertices: Vec<Vertex>,
    faces: Vec<Face>,
    grids: Vec<GridTopology>,
    nominal_radius: f32,
}

impl MeshBuilder {
    /// Empty builder with a nominal radius of 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nominal_radius: 1.0,
            ..Self::default()
        }
    }

    /// Set the radius used to normalize positions for region predicates.
    #[must_use]
    pub fn with_nominal_radius(mut self, radius: f32) -> Self {
        self.nominal_radius = radius;
        self
    }

    /// Number of vertices pushed so far (also the next vertex index).
    #[must_use]
    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    /// Number of triangles pushed so far.
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Push a vertex and return its index.
    pub fn push_vertex(&mut self, position: Vec3) -> u32 {
        self.push_vertex_with(Vertex::new(position))
    }

    /// Push a fully specified vertex and return its index.
    pub fn push_vertex_with(&mut self, vertex: Vertex) -> u32 {
        let idx = self.vertex_count();
        self.vertices.push(vertex);
        idx
    }

    /// Push a triangle with outward winding `a, b, c`.
    pub fn push_triangle(&mut self, indices: [u32; 3]) {
        self.faces.push(Face::new(indices));
    }

    /// Fan-triangulate a convex polygon (outward winding).
    pub fn push_polygon(&mut self, indices: &[u32]) {
        self.push_polygon_inner(indices, None);
    }

    /// Fan-triangulate a convex polygon whose faces always belong to
    /// `region`, regardless of vertex classification.
    pub fn push_polygon_in_region(&mut self, indices: &[u32], region: &str) {
        self.push_polygon_inner(indices, Some(region));
    }

    fn push_polygon_inner(&mut self, indices: &[u32], region: Option<&str>) {
        let Some((&first, rest)) = indices.split_first() else {
            return;
        };
        for pair in rest.windows(2) {
            let mut face = Face::new([first, pair[0], pair[1]]);
            face.region_override = region.map(Box::from);
            self.faces.push(face);
        }
    }

    /// Record that the vertices starting at `base` form a `rows × cols`
    /// latitude grid.
    pub fn mark_grid(&mut self, base: u32, rows: u32, cols: u32) {
        self.grids.push(GridTopology { base, rows, cols });
    }

    /// Append another mesh's geometry, offsetting its indices.
    ///
    /// Region assignments on the appended mesh are dropped; face overrides
    /// and vertex metadata are kept. Returns the index offset applied.
    pub fn append(&mut self, mesh: &Mesh) -> u32 {
        let offset = self.vertex_count();
        self.vertices.extend(mesh.vertices().iter().map(|v| Vertex {
            region: None,
            ..v.clone()
        }));
        self.faces.extend(mesh.faces().iter().map(|f| Face {
            indices: f.indices.map(|i| i + offset),
            region: None,
            region_override: f.region_override.clone(),
            normal: Vec3::ZERO,
        }));
        self.grids.extend(mesh.grids().iter().map(|g| GridTopology {
            base: g.base + offset,
            ..*g
        }));
        offset
    }

    /// Validate and finish the mesh.
    pub fn build(self) -> Result<Mesh, SomaError> {
        let mesh = Mesh::new(self.vertices, self.faces, self.nominal_radius)?;
        Ok(mesh.with_grids(self.grids))
    }
}
