//! Linear RGBA color used by every drawing surface.

use serde::{Deserialize, Serialize};

/// RGBA color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
    /// Alpha (opacity).
    pub a: f32,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Construct from components.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from an `[r, g, b]` triple (the options file format).
    #[must_use]
    pub const fn from_rgb(rgb: [f32; 3]) -> Self {
        Self::new(rgb[0], rgb[1], rgb[2], 1.0)
    }

    /// Same color with a different alpha.
    #[must_use]
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Multiply the RGB channels by `factor`, clamping to `[0, 1]`.
    #[must_use]
    pub fn shade(self, factor: f32) -> Self {
        Self::new(
            (self.r * factor).clamp(0.0, 1.0),
            (self.g * factor).clamp(0.0, 1.0),
            (self.b * factor).clamp(0.0, 1.0),
            self.a,
        )
    }

    /// Component-wise linear interpolation.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// 8-bit channels, rounded.
    #[must_use]
    pub fn to_u8(self) -> [u8; 4] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// CSS `rgba(...)` string for canvas fill/stroke styles.
    #[must_use]
    pub fn to_css(self) -> String {
        let [r, g, b, _] = self.to_u8();
        format!("rgba({r},{g},{b},{:.3})", self.a.clamp(0.0, 1.0))
    }

    /// CSS `rgb(...)` string without alpha (SVG paints alpha separately).
    #[must_use]
    pub fn to_css_rgb(self) -> String {
        let [r, g, b, _] = self.to_u8();
        format!("rgb({r},{g},{b})")
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shade_clamps() {
        let c = Rgba::new(0.8, 0.5, 0.1, 0.5).shade(2.0);
        assert_eq!(c, Rgba::new(1.0, 1.0, 0.2, 0.5));
    }

    #[test]
    fn css_formatting() {
        assert_eq!(Rgba::new(1.0, 0.0, 0.5, 0.25).to_css(), "rgba(255,0,128,0.250)");
        assert_eq!(Rgba::BLACK.to_css_rgb(), "rgb(0,0,0)");
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rgba::BLACK;
        let b = Rgba::WHITE;
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }
}
