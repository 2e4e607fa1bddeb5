use glam::Vec3;

use crate::options::LightingOptions;

/// Per-frame lighting constants, computed once and passed into the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingParams {
    /// Unit world-space direction from surfaces toward the light.
    pub light_dir: Vec3,
    /// Constant term.
    pub ambient: f32,
    /// Lambert weight.
    pub diffuse: f32,
    /// Highlight weight.
    pub specular: f32,
    /// Highlight exponent.
    pub shininess: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self::from_options(&LightingOptions::default())
    }
}

impl ShadingParams {
    /// Resolve lighting options; the light direction is normalized here.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        Self {
            light_dir: Vec3::from_array(options.light_dir).normalize_or_zero(),
            ambient: options.ambient,
            diffuse: options.diffuse,
            specular: options.specular,
            shininess: options.shininess,
        }
    }

    /// Same parameters with a different light direction.
    #[must_use]
    pub fn with_light_dir(self, dir: Vec3) -> Self {
        Self {
            light_dir: dir.normalize_or_zero(),
            ..self
        }
    }

    /// `ambient + diffuse * d + specular * d^shininess` with
    /// `d = max(0, normal · light_dir)`.
    ///
    /// `normal` must be a world-space unit normal.
    #[inline]
    #[must_use]
    pub fn lighting(&self, normal: Vec3) -> f32 {
        let d = normal.dot(self.light_dir).max(0.0);
        self.ambient + self.diffuse * d + self.specular * d.powf(self.shininess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> ShadingParams {
        ShadingParams {
            light_dir: Vec3::Z,
            ambient: 0.3,
            diffuse: 0.6,
            specular: 0.2,
            shininess: 8.0,
        }
    }

    #[test]
    fn facing_light_gets_every_term() {
        assert!((params().lighting(Vec3::Z) - 1.1).abs() < 1e-6);
    }

    #[test]
    fn facing_away_is_ambient_only() {
        assert!((params().lighting(Vec3::NEG_Z) - 0.3).abs() < 1e-6);
        assert!((params().lighting(Vec3::X) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn options_direction_is_normalized() {
        let p = ShadingParams::default();
        assert!((p.light_dir.length() - 1.0).abs() < 1e-5);
        let q = p.with_light_dir(Vec3::new(0.0, 3.0, 4.0));
        assert!((q.light_dir - Vec3::new(0.0, 0.6, 0.8)).length() < 1e-6);
    }
}
