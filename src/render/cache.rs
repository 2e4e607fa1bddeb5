use std::hash::Hasher;

use crate::camera::projection::project_all;
use crate::camera::{ProjectedPoint, View};
use crate::mesh::Mesh;
use crate::util::hash::fingerprint_hasher;

/// Projected vertices of the last (mesh, view) pair.
///
/// Rendering and picking the same mesh with the same view in one frame
/// projects once.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    key: Option<u64>,
    points: Vec<ProjectedPoint>,
    hits: u64,
    misses: u64,
}

impl ProjectionCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache key for a mesh seen through a view.
    #[must_use]
    pub fn key_for(mesh: &Mesh, view: &View) -> u64 {
        let mut hasher = fingerprint_hasher();
        hasher.write_u64(mesh.fingerprint());
        hasher.write_u64(view.fingerprint());
        hasher.finish()
    }

    /// Projected vertices of `mesh` under `view`, recomputed only when the
    /// geometry or the view changed.
    pub fn project(&mut self, mesh: &Mesh, view: &View) -> &[ProjectedPoint] {
        let key = Self::key_for(mesh, view);
        if self.key == Some(key) && self.points.len() == mesh.vertices().len() {
            self.hits += 1;
        } else {
            self.misses += 1;
            project_all(
                mesh.vertices().iter().map(|v| v.position),
                &view.camera,
                &view.viewport,
                &mut self.points,
            );
            self.key = Some(key);
        }
        &self.points
    }

    /// Forget the cached projection.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// `(hits, misses)` since creation.
    #[must_use]
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::{Camera, Viewport};
    use crate::mesh::primitives::generate_sphere;

    fn view() -> View {
        View::new(Camera::default(), Viewport::new(640.0, 480.0, 1.0, 5000.0))
    }

    #[test]
    fn same_mesh_and_view_hits() {
        let mesh = generate_sphere(50.0, 6, 8).unwrap();
        let mut cache = ProjectionCache::new();
        let first = cache.project(&mesh, &view()).to_vec();
        let second = cache.project(&mesh, &view()).to_vec();
        assert_eq!(first, second);
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn camera_change_misses() {
        let mesh = generate_sphere(50.0, 6, 8).unwrap();
        let mut cache = ProjectionCache::new();
        let _ = cache.project(&mesh, &view());
        let mut rotated = view();
        rotated.camera.rotation.y += 0.1;
        let _ = cache.project(&mesh, &rotated);
        cache.invalidate();
        let _ = cache.project(&mesh, &rotated);
        assert_eq!(cache.stats(), (0, 3));
    }
}
