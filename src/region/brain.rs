use super::RegionTable;
use crate::util::color::Rgba;

/// Region names in priority order.
pub const BRAIN_REGIONS: [&str; 6] = [
    "brainstem",
    "cerebellum",
    "occipital",
    "temporal",
    "frontal",
    "parietal",
];

/// The default lobe table for meshes from
/// [`generate_brain`](crate::mesh::deform::generate_brain).
///
/// Coordinates are radius-normalized with +Y superior, +Z anterior and X
/// lateral. Ventral-medial samples near the equator are left unassigned.
#[must_use]
pub fn brain_region_table() -> RegionTable {
    RegionTable::new()
        .with_rule("brainstem", Rgba::new(0.62, 0.5, 0.68, 1.0), |p| {
            p.y < -0.55 && p.x.abs() < 0.35 && p.z > -0.5
        })
        .with_rule("cerebellum", Rgba::new(0.86, 0.6, 0.38, 1.0), |p| {
            p.z < -0.55 && p.y < -0.1
        })
        .with_rule("occipital", Rgba::new(0.45, 0.72, 0.52, 1.0), |p| {
            p.z < -0.6
        })
        .with_rule("temporal", Rgba::new(0.92, 0.78, 0.4, 1.0), |p| {
            p.y < -0.1 && p.x.abs() > 0.55
        })
        .with_rule("frontal", Rgba::new(0.48, 0.62, 0.92, 1.0), |p| {
            p.z > 0.25
        })
        .with_rule("parietal", Rgba::new(0.9, 0.52, 0.52, 1.0), |p| {
            p.y > 0.1
        })
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::mesh::deform::{generate_brain, BrainShape};
    use crate::region::classify_regions;

    #[test]
    fn table_order_matches_names() {
        let table = brain_region_table();
        let names: Vec<&str> =
            table.rules().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, BRAIN_REGIONS);
    }

    #[test]
    fn landmarks_classify_as_expected() {
        let table = brain_region_table();
        let name = |p: Vec3| table.classify(p).map(|i| BRAIN_REGIONS[i]);
        assert_eq!(name(Vec3::new(0.0, -0.8, 0.0)), Some("brainstem"));
        assert_eq!(name(Vec3::new(0.0, -0.4, -0.8)), Some("cerebellum"));
        assert_eq!(name(Vec3::new(0.0, 0.3, -0.9)), Some("occipital"));
        assert_eq!(name(Vec3::new(0.8, -0.3, 0.0)), Some("temporal"));
        assert_eq!(name(Vec3::new(0.0, 0.2, 0.9)), Some("frontal"));
        assert_eq!(name(Vec3::new(0.0, 0.9, 0.0)), Some("parietal"));
        assert_eq!(name(Vec3::new(0.4, -0.2, 0.0)), None);
    }

    #[test]
    fn generated_brain_has_every_lobe_and_outlines() {
        let mut mesh = generate_brain(&BrainShape::default(), 32, 48).unwrap();
        classify_regions(&mut mesh, &brain_region_table()).unwrap();
        for region in mesh.regions() {
            assert!(
                !region.vertex_indices.is_empty(),
                "{} is empty",
                region.name
            );
            assert!(region.centroid.is_some());
        }
        assert!(!mesh.boundaries().is_empty());
        assert!(mesh.vertices().iter().any(|v| v.region.is_none()));
    }
}
