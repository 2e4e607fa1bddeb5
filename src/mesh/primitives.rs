//! Parametric surface generators.
//!
//! Every generator returns a finished [`Mesh`] with outward winding and no
//! regions; classification is a separate post-pass.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::frame::{bezier_frames, segment_frames, CurveFrame};
use super::{Mesh, MeshBuilder, Vertex};
use crate::error::SomaError;

/// Bezier samples per tube span.
pub const TUBE_STEPS: usize = 12;

/// Vertex kind tag for bilayer head-group vertices.
pub const KIND_HEAD_GROUP: u32 = 1;

/// Unit-sphere direction for latitude index `lat` of `lat_bands` and
/// longitude index `lon` of `lon_bands`.
///
/// Latitude 0 is the +Y pole.
#[inline]
#[must_use]
pub fn sphere_direction(lat: u32, lat_bands: u32, lon: u32, lon_bands: u32) -> Vec3 {
    let theta = lat as f32 * PI / lat_bands as f32;
    let phi = lon as f32 * TAU / lon_bands as f32;
    let (sin_t, cos_t) = theta.sin_cos();
    let (sin_p, cos_p) = phi.sin_cos();
    Vec3::new(cos_p * sin_t, cos_t, sin_p * sin_t)
}

/// Push a UV sphere whose unit directions are mapped through `map`.
///
/// The grid has `lat_bands + 1` rings of `lon_bands + 1` vertices (the seam
/// column is duplicated). Pole triangles that would be degenerate are not
/// emitted.
pub(crate) fn push_uv_sphere(
    builder: &mut MeshBuilder,
    lat_bands: u32,
    lon_bands: u32,
    map: impl Fn(Vec3) -> Vec3,
) {
    let lat_bands = lat_bands.max(2);
    let lon_bands = lon_bands.max(3);
    let base = builder.vertex_count();
    let cols = lon_bands + 1;

    for lat in 0..=lat_bands {
        for lon in 0..=lon_bands {
            let dir = sphere_direction(lat, lat_bands, lon, lon_bands);
            let _ = builder.push_vertex(map(dir));
        }
    }

    for lat in 0..lat_bands {
        for lon in 0..lon_bands {
            let a = base + lat * cols + lon;
            let b = a + cols;
            if lat != 0 {
                builder.push_triangle([a, a + 1, b]);
            }
            if lat != lat_bands - 1 {
                builder.push_triangle([a + 1, b + 1, b]);
            }
        }
    }

    builder.mark_grid(base, lat_bands + 1, cols);
}

/// UV sphere centered on the origin.
pub fn generate_sphere(
    radius: f32,
    lat_bands: u32,
    lon_bands: u32,
) -> Result<Mesh, SomaError> {
    let mut builder = MeshBuilder::new().with_nominal_radius(radius);
    push_uv_sphere(&mut builder, lat_bands, lon_bands, |d| d * radius);
    builder.build()
}

/// Extrude `segments`-sided rings at each frame and stitch consecutive rings.
pub(crate) fn push_rings(
    builder: &mut MeshBuilder,
    frames: &[CurveFrame],
    radius: f32,
    segments: u32,
) {
    let segments = segments.max(3);
    let base = builder.vertex_count();

    for frame in frames {
        for j in 0..segments {
            let angle = j as f32 * TAU / segments as f32;
            let _ = builder.push_vertex(frame.ring_point(radius, angle));
        }
    }

    let ring = |i: u32, j: u32| base + i * segments + (j % segments);
    for i in 0..frames.len().saturating_sub(1) as u32 {
        for j in 0..segments {
            builder.push_triangle([ring(i, j), ring(i, j + 1), ring(i + 1, j)]);
            builder.push_triangle([
                ring(i, j + 1),
                ring(i + 1, j + 1),
                ring(i + 1, j),
            ]);
        }
    }
}

/// Tube of `radius` following the quadratic Bezier `p1 → control → p2`.
///
/// Used for axons, vessels, and chromosome arms. Ends are left open.
pub fn generate_tube_along_curve(
    p1: Vec3,
    p2: Vec3,
    control: Vec3,
    radius: f32,
    segments: u32,
) -> Result<Mesh, SomaError> {
    let frames = bezier_frames(p1, control, p2, TUBE_STEPS);
    let mut builder =
        MeshBuilder::new().with_nominal_radius(p1.distance(p2).max(radius));
    push_rings(&mut builder, &frames, radius, segments);
    builder.build()
}

/// Open cylinder from `p1` to `p2`.
pub fn generate_cylinder(
    p1: Vec3,
    p2: Vec3,
    radius: f32,
    segments: u32,
) -> Result<Mesh, SomaError> {
    let frames = segment_frames(p1, p2);
    let mut builder =
        MeshBuilder::new().with_nominal_radius(p1.distance(p2).max(radius));
    push_rings(&mut builder, &frames, radius, segments);
    builder.build()
}

/// One continuous tube through `points`, smoothed with quadratic Bezier
/// spans that use each interior point as a control point and pass through
/// the midpoints between neighbors.
///
/// Used for polypeptide and nucleic-acid backbones. Fewer than two points
/// produce an empty mesh.
pub fn generate_tube_chain(
    points: &[Vec3],
    radius: f32,
    segments: u32,
) -> Result<Mesh, SomaError> {
    let mut builder = MeshBuilder::new().with_nominal_radius(
        points
            .iter()
            .map(|p| p.length())
            .fold(radius, f32::max),
    );

    let frames: Vec<CurveFrame> = match points {
        [] | [_] => Vec::new(),
        [a, b] => segment_frames(*a, *b).to_vec(),
        _ => {
            let n = points.len();
            let mut frames = Vec::new();
            for i in 1..n - 1 {
                let start = if i == 1 {
                    points[0]
                } else {
                    (points[i - 1] + points[i]) * 0.5
                };
                let end = if i == n - 2 {
                    points[n - 1]
                } else {
                    (points[i] + points[i + 1]) * 0.5
                };
                let span = bezier_frames(start, points[i], end, TUBE_STEPS);
                // Consecutive spans share an endpoint.
                let skip = usize::from(!frames.is_empty());
                frames.extend(span.into_iter().skip(skip));
            }
            frames
        }
    };

    push_rings(&mut builder, &frames, radius, segments);
    builder.build()
}

/// Points along a helix around the Y axis, centered vertically on the
/// origin.
#[must_use]
pub fn generate_helix_path(
    radius: f32,
    pitch: f32,
    turns: f32,
    samples_per_turn: u32,
    phase: f32,
) -> Vec<Vec3> {
    let samples = ((turns * samples_per_turn as f32).ceil() as u32).max(1);
    let height = pitch * turns;
    (0..=samples)
        .map(|i| {
            let t = i as f32 / samples as f32;
            let angle = phase + t * turns * TAU;
            Vec3::new(
                radius * angle.cos(),
                t * height - height * 0.5,
                radius * angle.sin(),
            )
        })
        .collect()
}

/// Parameters for [`generate_bilayer_sheet`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilayerParams {
    /// Extent along X.
    pub width: f32,
    /// Extent along Z.
    pub depth: f32,
    /// Grid cells along X.
    pub cols: u32,
    /// Grid cells along Z.
    pub rows: u32,
    /// Distance between the two leaflets.
    pub thickness: f32,
    /// Amplitude of the membrane undulation.
    pub undulation: f32,
}

impl Default for BilayerParams {
    fn default() -> Self {
        Self {
            width: 400.0,
            depth: 300.0,
            cols: 24,
            rows: 18,
            thickness: 40.0,
            undulation: 8.0,
        }
    }
}

/// Lipid bilayer patch: two undulating grid sheets facing away from each
/// other (+Y leaflet on top, -Y leaflet below). Every vertex is tagged
/// [`KIND_HEAD_GROUP`].
pub fn generate_bilayer_sheet(params: &BilayerParams) -> Result<Mesh, SomaError> {
    let cols = params.cols.max(1);
    let rows = params.rows.max(1);
    let mut builder = MeshBuilder::new()
        .with_nominal_radius(params.width.max(params.depth) * 0.5);

    for side in [1.0_f32, -1.0] {
        let base = builder.vertex_count();
        for r in 0..=rows {
            for c in 0..=cols {
                let x = -params.width * 0.5 + c as f32 * params.width / cols as f32;
                let z = -params.depth * 0.5 + r as f32 * params.depth / rows as f32;
                let wave = params.undulation
                    * (x * TAU / params.width.max(f32::EPSILON)).sin()
                    * (z * PI / params.depth.max(f32::EPSILON)).cos();
                let y = side * params.thickness * 0.5 + wave;
                let _ = builder.push_vertex_with(Vertex {
                    kind: Some(KIND_HEAD_GROUP),
                    ..Vertex::new(Vec3::new(x, y, z))
                });
            }
        }

        let v = |r: u32, c: u32| base + r * (cols + 1) + c;
        for r in 0..rows {
            for c in 0..cols {
                let upper = [[v(r, c), v(r + 1, c), v(r, c + 1)], [
                    v(r, c + 1),
                    v(r + 1, c),
                    v(r + 1, c + 1),
                ]];
                for [a, b, cc] in upper {
                    if side > 0.0 {
                        builder.push_triangle([a, b, cc]);
                    } else {
                        builder.push_triangle([a, cc, b]);
                    }
                }
            }
        }
        builder.mark_grid(base, rows + 1, cols + 1);
    }

    builder.build()
}

/// Parameters for [`generate_blob`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlobParams {
    /// Base radius.
    pub radius: f32,
    /// Latitude bands.
    pub lat_bands: u32,
    /// Longitude bands.
    pub lon_bands: u32,
    /// Number of lobes pushed out of the base sphere.
    pub lobes: u32,
    /// Seed for lobe placement; equal seeds give identical meshes.
    pub seed: u64,
}

impl Default for BlobParams {
    fn default() -> Self {
        Self {
            radius: 100.0,
            lat_bands: 20,
            lon_bands: 28,
            lobes: 5,
            seed: 1,
        }
    }
}

/// Organic blob: a sphere pushed outward by a few seeded, smoothly
/// falling-off lobes. Used for cells, organelles, and protein globules.
pub fn generate_blob(params: &BlobParams) -> Result<Mesh, SomaError> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let lobes: Vec<(Vec3, f32, f32)> = (0..params.lobes)
        .map(|_| {
            let dir = Vec3::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            )
            .try_normalize()
            .unwrap_or(Vec3::Y);
            let amplitude = rng.random_range(0.08..0.25);
            let sharpness = rng.random_range(2.0..6.0);
            (dir, amplitude, sharpness)
        })
        .collect();

    let radius = params.radius;
    let mut builder = MeshBuilder::new().with_nominal_radius(radius);
    push_uv_sphere(&mut builder, params.lat_bands, params.lon_bands, |d| {
        let bump: f32 = lobes
            .iter()
            .map(|&(dir, amp, sharp)| amp * d.dot(dir).max(0.0).powf(sharp))
            .sum();
        d * radius * (1.0 + bump)
    });
    builder.build()
}
