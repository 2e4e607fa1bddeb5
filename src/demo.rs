//! The stock three-view scene: a brain in the main view with a helix and a
//! protein blob in insets.

use std::f32::consts::PI;

use glam::Vec3;

use crate::engine::{Engine, MAIN_VIEW};
use crate::error::SomaError;
use crate::mesh::deform::{generate_brain, BrainShape};
use crate::mesh::primitives::{
    generate_blob, generate_helix_path, generate_tube_chain, BlobParams,
};
use crate::region::brain::brain_region_table;
use crate::region::{classify_regions, RegionTable};
use crate::util::color::Rgba;

/// Inset showing a backbone helix.
pub const HELIX_VIEW: &str = "helix";
/// Inset showing a two-domain protein blob.
pub const PROTEIN_VIEW: &str = "protein";

/// Upright three-quarter view of the brain (world +Y is screen-down).
const BRAIN_HOME: Vec3 = Vec3::new(PI - 0.35, 0.6, 0.0);

/// Load the demo meshes into `engine` and bind them to their views.
pub fn populate(engine: &mut Engine) -> Result<(), SomaError> {
    let _ = engine.load_mesh("brain", || {
        let mut mesh = generate_brain(&BrainShape::default(), 48, 64)?;
        classify_regions(&mut mesh, &brain_region_table())?;
        Ok(mesh)
    })?;
    let _ = engine.load_mesh("helix:alpha", || {
        let path = generate_helix_path(40.0, 60.0, 4.0, 12, 0.0);
        let mut mesh = generate_tube_chain(&path, 10.0, 10)?;
        let table = RegionTable::new().with_rule(
            "backbone",
            Rgba::new(0.35, 0.75, 0.95, 1.0),
            |_| true,
        );
        classify_regions(&mut mesh, &table)?;
        Ok(mesh)
    })?;
    let _ = engine.load_mesh("protein:blob", || {
        let mut mesh = generate_blob(&BlobParams::default())?;
        let table = RegionTable::new()
            .with_rule("n_domain", Rgba::new(0.85, 0.45, 0.6, 1.0), |p| p.x < 0.0)
            .with_rule("c_domain", Rgba::new(0.55, 0.8, 0.45, 1.0), |_| true);
        classify_regions(&mut mesh, &table)?;
        Ok(mesh)
    })?;

    engine.add_inset(HELIX_VIEW);
    engine.add_inset(PROTEIN_VIEW);
    engine.bind_mesh(MAIN_VIEW, "brain")?;
    engine.bind_mesh(HELIX_VIEW, "helix:alpha")?;
    engine.bind_mesh(PROTEIN_VIEW, "protein:blob")?;

    let pip = engine.pip_mut();
    pip.set_home_rotation(MAIN_VIEW, BRAIN_HOME)?;
    pip.set_auto_rotate(HELIX_VIEW, true)?;
    pip.set_auto_rotate(PROTEIN_VIEW, true)?;
    log::info!("demo scene ready: {} meshes", engine.meshes().len());
    Ok(())
}
