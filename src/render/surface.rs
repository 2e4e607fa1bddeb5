use glam::Vec2;

use crate::util::color::Rgba;

/// Axis-aligned screen rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// Rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Bottom-right corner.
    #[inline]
    #[must_use]
    pub fn max(&self) -> Vec2 {
        self.origin() + self.size()
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin() + self.size() * 0.5
    }

    /// Whether `p` lies inside (edges inclusive).
    #[inline]
    #[must_use]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && p.x <= self.x + self.width
            && p.y <= self.y + self.height
    }
}

/// How new paint combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Ordinary alpha compositing.
    #[default]
    Normal,
    /// Colors add (canvas `"lighter"`), so highlights glow through.
    Additive,
}

/// Immediate-mode 2D drawing target.
///
/// Mirrors the subset of a canvas 2D context the renderer needs. State set
/// by [`clip_rect`](Self::clip_rect) and
/// [`set_blend_mode`](Self::set_blend_mode) persists until the matching
/// [`restore`](Self::restore).
pub trait DrawSurface {
    /// Push the clip/blend state.
    fn save(&mut self);
    /// Pop the clip/blend state.
    fn restore(&mut self);
    /// Intersect the clip region with `rect`.
    fn clip_rect(&mut self, rect: Rect);
    /// Set how subsequent paint is composited.
    fn set_blend_mode(&mut self, mode: BlendMode);
    /// Fill a closed polygon.
    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba);
    /// Stroke an open polyline.
    fn stroke_polyline(&mut self, points: &[Vec2], color: Rgba, width: f32);
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
    /// Outline an axis-aligned rectangle.
    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f32);
    /// Draw centered text.
    fn fill_text(&mut self, text: &str, at: Vec2, color: Rgba, size: f32);
}
