use glam::Vec3;

/// Tangents whose |y| exceeds this are treated as vertical and framed
/// against +X instead of +Y.
const VERTICAL_THRESHOLD: f32 = 0.99;

/// Finite-difference step for tangent estimation.
const TANGENT_EPSILON: f32 = 1e-3;

/// A point on a curve with an orthonormal frame.
///
/// `binormal == tangent × normal`, so rings built as
/// `normal * cos(a) + binormal * sin(a)` wind counter-clockwise around the
/// tangent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveFrame {
    /// Position on the curve.
    pub position: Vec3,
    /// Unit tangent.
    pub tangent: Vec3,
    /// Unit normal.
    pub normal: Vec3,
    /// Unit binormal.
    pub binormal: Vec3,
}

impl CurveFrame {
    /// Frame at `position` with the given travel direction.
    ///
    /// Picks +Y as the reference "up" unless the tangent is nearly vertical,
    /// then re-derives normal and binormal with cross products.
    #[must_use]
    pub fn from_tangent(position: Vec3, tangent: Vec3) -> Self {
        let tangent = tangent.try_normalize().unwrap_or(Vec3::Z);
        let up = if tangent.y.abs() > VERTICAL_THRESHOLD {
            Vec3::X
        } else {
            Vec3::Y
        };
        let normal = up.cross(tangent).normalize();
        let binormal = tangent.cross(normal).normalize();
        Self {
            position,
            tangent,
            normal,
            binormal,
        }
    }

    /// Point on the ring of `radius` around this frame at `angle` radians.
    #[inline]
    #[must_use]
    pub fn ring_point(&self, radius: f32, angle: f32) -> Vec3 {
        let (s, c) = angle.sin_cos();
        self.position + (self.normal * c + self.binormal * s) * radius
    }
}

/// Evaluate a quadratic Bezier at `t`.
#[inline]
#[must_use]
pub fn quadratic_bezier(p0: Vec3, control: Vec3, p1: Vec3, t: f32) -> Vec3 {
    let omt = 1.0 - t;
    p0 * (omt * omt) + control * (2.0 * omt * t) + p1 * (t * t)
}

/// Sample `steps + 1` frames along a quadratic Bezier.
///
/// Tangents come from a central finite difference (one-sided at the ends).
#[must_use]
pub fn bezier_frames(
    p0: Vec3,
    control: Vec3,
    p1: Vec3,
    steps: usize,
) -> Vec<CurveFrame> {
    let steps = steps.max(1);
    (0..=steps)
        .map(|i| {
            let t = i as f32 / steps as f32;
            let pos = quadratic_bezier(p0, control, p1, t);
            let t0 = (t - TANGENT_EPSILON).max(0.0);
            let t1 = (t + TANGENT_EPSILON).min(1.0);
            let tangent = quadratic_bezier(p0, control, p1, t1)
                - quadratic_bezier(p0, control, p1, t0);
            CurveFrame::from_tangent(pos, tangent)
        })
        .collect()
}

/// Frames along a straight segment (two frames, same orientation).
#[must_use]
pub fn segment_frames(p0: Vec3, p1: Vec3) -> [CurveFrame; 2] {
    let tangent = p1 - p0;
    [
        CurveFrame::from_tangent(p0, tangent),
        CurveFrame::from_tangent(p1, tangent),
    ]
}
