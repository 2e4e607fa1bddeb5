//! Meshes cached by logical key.
//!
//! Generators run once per key (e.g. `"protein:TP53"` or `"brain"`); the
//! resulting mesh is shared with every view that draws it.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::Mesh;
use crate::error::SomaError;

/// Meshes keyed by a caller-chosen logical name.
#[derive(Debug, Default)]
pub struct MeshCache {
    meshes: FxHashMap<String, Arc<Mesh>>,
}

impl MeshCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached meshes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Cached mesh for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<Mesh>> {
        self.meshes.get(key).cloned()
    }

    /// Cached mesh for `key`, or [`SomaError::UnknownMesh`].
    pub fn require(&self, key: &str) -> Result<Arc<Mesh>, SomaError> {
        self.get(key)
            .ok_or_else(|| SomaError::UnknownMesh(key.to_owned()))
    }

    /// Store `mesh` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, mesh: Mesh) -> Arc<Mesh> {
        let key = key.into();
        let mesh = Arc::new(mesh);
        log::info!(
            "mesh cache: stored '{key}' ({} vertices, {} faces)",
            mesh.vertices().len(),
            mesh.faces().len()
        );
        let _ = self.meshes.insert(key, Arc::clone(&mesh));
        mesh
    }

    /// Cached mesh for `key`, generating and storing it on first use.
    ///
    /// A failing generator leaves the cache unchanged.
    pub fn get_or_insert_with(
        &mut self,
        key: &str,
        generate: impl FnOnce() -> Result<Mesh, SomaError>,
    ) -> Result<Arc<Mesh>, SomaError> {
        if let Some(mesh) = self.meshes.get(key) {
            return Ok(Arc::clone(mesh));
        }
        let mesh = generate()?;
        Ok(self.insert(key, mesh))
    }

    /// Drop the mesh stored under `key`.
    pub fn remove(&mut self, key: &str) -> Option<Arc<Mesh>> {
        self.meshes.remove(key)
    }

    /// Drop every cached mesh.
    pub fn clear(&mut self) {
        self.meshes.clear();
    }
}
