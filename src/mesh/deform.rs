//! Warps a unit sphere into a brain-like shape.
//!
//! The pipeline is applied per unit-sphere sample, in order:
//! 1. [`fissure`] carves the longitudinal groove between hemispheres,
//! 2. each [`Bulge`] swells a lobe with a cosine bump,
//! 3. [`Wrinkle`] terms displace the surface radially (cortical folding),
//! 4. the result is scaled to the final radius and axis proportions.
//!
//! Everything is a pure function of the input coordinates and the
//! [`BrainShape`], so generated meshes classify identically every time.

use std::f32::consts::PI;

use glam::Vec3;

use super::primitives::push_uv_sphere;
use super::{Mesh, MeshBuilder};
use crate::error::SomaError;

/// A smooth regional swelling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bulge {
    /// Bump center on the unit sphere.
    pub center: Vec3,
    /// Falloff radius (unit-sphere distance); zero effect beyond it.
    pub radius: f32,
    /// Outward scale at the bump center (0.1 = 10% larger).
    pub strength: f32,
}

impl Bulge {
    /// Bump weight in `[0, 1]` at `p`.
    #[inline]
    #[must_use]
    pub fn weight(&self, p: Vec3) -> f32 {
        if self.radius <= 0.0 {
            return 0.0;
        }
        let d = p.distance(self.center) / self.radius;
        if d >= 1.0 {
            0.0
        } else {
            0.5 + 0.5 * (d * PI).cos()
        }
    }

    /// Scale `p` outward by this bulge.
    #[inline]
    #[must_use]
    pub fn apply(&self, p: Vec3) -> Vec3 {
        p * (1.0 + self.strength * self.weight(p))
    }
}

/// One frequency band of the folding displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wrinkle {
    /// Spatial frequency in radians per unit length.
    pub frequency: f32,
    /// Radial displacement amplitude (fraction of the radius).
    pub amplitude: f32,
}

/// Parameters of the deformation pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct BrainShape {
    /// Final nominal radius.
    pub radius: f32,
    /// Per-axis proportions applied with the radius.
    pub axis_scale: Vec3,
    /// Fissure depth `k` (fraction of `y` removed at `x == 0`).
    pub fissure_depth: f32,
    /// Fissure sharpness `c`; larger values narrow the groove.
    pub fissure_sharpness: f32,
    /// Regional swellings, applied in order.
    pub bulges: Vec<Bulge>,
    /// Folding bands, summed.
    pub wrinkles: Vec<Wrinkle>,
}

impl Default for BrainShape {
    fn default() -> Self {
        Self {
            radius: 150.0,
            axis_scale: Vec3::new(0.85, 0.8, 1.1),
            fissure_depth: 0.25,
            fissure_sharpness: 12.0,
            bulges: vec![
                // Frontal
                Bulge {
                    center: Vec3::new(0.0, 0.3, 0.9),
                    radius: 0.8,
                    strength: 0.08,
                },
                // Temporal, left and right
                Bulge {
                    center: Vec3::new(-0.85, -0.3, 0.2),
                    radius: 0.6,
                    strength: 0.1,
                },
                Bulge {
                    center: Vec3::new(0.85, -0.3, 0.2),
                    radius: 0.6,
                    strength: 0.1,
                },
                // Occipital
                Bulge {
                    center: Vec3::new(0.0, 0.1, -0.95),
                    radius: 0.6,
                    strength: 0.06,
                },
            ],
            wrinkles: vec![
                Wrinkle {
                    frequency: 9.0,
                    amplitude: 0.025,
                },
                Wrinkle {
                    frequency: 17.0,
                    amplitude: 0.012,
                },
                Wrinkle {
                    frequency: 31.0,
                    amplitude: 0.005,
                },
            ],
        }
    }
}

/// Longitudinal fissure: `y *= 1 - k * exp(-c * |x|)` where `y > 0`.
#[inline]
#[must_use]
pub fn fissure(p: Vec3, depth: f32, sharpness: f32) -> Vec3 {
    if p.y <= 0.0 {
        return p;
    }
    let factor = 1.0 - depth * (-sharpness * p.x.abs()).exp();
    Vec3::new(p.x, p.y * factor, p.z)
}

/// Radial displacement factor from the folding bands at `p`.
#[must_use]
pub fn wrinkle_displacement(p: Vec3, wrinkles: &[Wrinkle]) -> f32 {
    wrinkles
        .iter()
        .map(|w| {
            let f = w.frequency;
            w.amplitude
                * ((p.x * f).sin() * (p.y * f * 1.3).cos()
                    + (p.z * f * 0.9).sin() * (p.x * f * 0.7).cos())
                * 0.5
        })
        .sum()
}

/// Run the whole pipeline on one unit-sphere sample.
#[must_use]
pub fn deform_point(p: Vec3, shape: &BrainShape) -> Vec3 {
    let p = fissure(p, shape.fissure_depth, shape.fissure_sharpness);
    let p = shape.bulges.iter().fold(p, |p, b| b.apply(p));
    let p = p * (1.0 + wrinkle_displacement(p, &shape.wrinkles));
    p * shape.axis_scale * shape.radius
}

/// UV sphere pushed through [`deform_point`].
///
/// The mesh's nominal radius is `shape.radius`, so region predicates see
/// roughly unit-scale coordinates.
pub fn generate_brain(
    shape: &BrainShape,
    lat_bands: u32,
    lon_bands: u32,
) -> Result<Mesh, SomaError> {
    let mut builder = MeshBuilder::new().with_nominal_radius(shape.radius);
    push_uv_sphere(&mut builder, lat_bands, lon_bands, |d| {
        deform_point(d, shape)
    });
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fissure_only_touches_upper_half() {
        let lower = Vec3::new(0.0, -0.5, 0.5);
        assert_eq!(fissure(lower, 0.3, 10.0), lower);

        let midline = fissure(Vec3::new(0.0, 1.0, 0.0), 0.3, 10.0);
        assert!((midline.y - 0.7).abs() < 1e-6);

        let lateral = fissure(Vec3::new(0.8, 0.6, 0.0), 0.3, 10.0);
        assert!(lateral.y > 0.599);
    }

    #[test]
    fn bulge_is_smooth_and_local() {
        let b = Bulge {
            center: Vec3::Z,
            radius: 0.5,
            strength: 0.2,
        };
        assert!((b.weight(Vec3::Z) - 1.0).abs() < 1e-6);
        assert_eq!(b.weight(Vec3::NEG_Z), 0.0);
        // Continuous at the falloff edge.
        let edge = Vec3::new(0.0, 0.4999, 1.0);
        assert!(b.weight(edge) < 1e-3);
        assert!((b.apply(Vec3::Z).z - 1.2).abs() < 1e-6);
    }

    #[test]
    fn pipeline_is_deterministic() {
        let shape = BrainShape::default();
        let a = generate_brain(&shape, 16, 24).unwrap();
        let b = generate_brain(&shape, 16, 24).unwrap();
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.vertices(), b.vertices());
    }

    #[test]
    fn brain_keeps_outward_winding() {
        let mesh = generate_brain(&BrainShape::default(), 24, 32).unwrap();
        let outward = mesh
            .faces()
            .iter()
            .filter(|f| !f.is_degenerate())
            .filter(|f| {
                let [a, b, c] = mesh.face_positions(f).unwrap();
                f.normal.dot((a + b + c) / 3.0) > 0.0
            })
            .count();
        let total = mesh.faces().iter().filter(|f| !f.is_degenerate()).count();
        // The fissure may fold a handful of medial faces.
        assert!(outward as f32 / total as f32 > 0.97);
    }

    #[test]
    fn midline_is_indented() {
        let shape = BrainShape {
            bulges: Vec::new(),
            wrinkles: Vec::new(),
            axis_scale: Vec3::ONE,
            ..BrainShape::default()
        };
        let top = deform_point(Vec3::Y, &shape);
        assert!(top.y < shape.radius * 0.8);
        let side = deform_point(Vec3::X, &shape);
        assert!((side.x - shape.radius).abs() < 1e-3);
    }
}
