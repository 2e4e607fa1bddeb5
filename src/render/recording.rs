//! A [`DrawSurface`] that records commands, for tests and SVG export.

use std::fmt::Write as _;

use glam::Vec2;

use super::surface::{BlendMode, DrawSurface, Rect};
use crate::util::color::Rgba;

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// [`DrawSurface::save`].
    Save,
    /// [`DrawSurface::restore`].
    Restore,
    /// [`DrawSurface::clip_rect`].
    Clip(Rect),
    /// [`DrawSurface::set_blend_mode`].
    Blend(BlendMode),
    /// [`DrawSurface::fill_polygon`].
    Polygon {
        /// Corners.
        points: Vec<Vec2>,
        /// Fill color.
        color: Rgba,
    },
    /// [`DrawSurface::stroke_polyline`].
    Polyline {
        /// Vertices.
        points: Vec<Vec2>,
        /// Stroke color.
        color: Rgba,
        /// Stroke width.
        width: f32,
    },
    /// [`DrawSurface::fill_rect`].
    FillRect {
        /// Rectangle.
        rect: Rect,
        /// Fill color.
        color: Rgba,
    },
    /// [`DrawSurface::stroke_rect`].
    StrokeRect {
        /// Rectangle.
        rect: Rect,
        /// Stroke color.
        color: Rgba,
        /// Stroke width.
        width: f32,
    },
    /// [`DrawSurface::fill_text`].
    Text {
        /// Text content.
        text: String,
        /// Anchor (text center).
        at: Vec2,
        /// Fill color.
        color: Rgba,
        /// Font size in pixels.
        size: f32,
    },
}

/// Records every call for later inspection or SVG export.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop every recorded command.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Number of filled polygons.
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Polygon { .. }))
            .count()
    }

    /// Render the recording as a standalone SVG document.
    ///
    /// Clips become `<clipPath>` groups and additive blending maps to the
    /// `plus-lighter` blend mode.
    #[must_use]
    pub fn to_svg(&self, width: f32, height: f32, background: Rgba) -> String {
        let mut svg = String::new();
        let mut defs = String::new();
        let mut body = String::new();

        // Each save level remembers how many groups it must close and the
        // blend mode to return to.
        let mut stack: Vec<(usize, BlendMode)> = Vec::new();
        let mut open_groups = 0usize;
        let mut blend = BlendMode::Normal;
        let mut clip_id = 0usize;

        for cmd in &self.commands {
            match cmd {
                DrawCommand::Save => {
                    stack.push((open_groups, blend));
                    open_groups = 0;
                }
                DrawCommand::Restore => {
                    for _ in 0..open_groups {
                        body.push_str("</g>\n");
                    }
                    (open_groups, blend) =
                        stack.pop().unwrap_or((0, BlendMode::Normal));
                }
                DrawCommand::Clip(rect) => {
                    let _ = writeln!(
                        defs,
                        r#"<clipPath id="clip{clip_id}"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath>"#,
                        rect.x, rect.y, rect.width, rect.height
                    );
                    let _ = writeln!(body, r#"<g clip-path="url(#clip{clip_id})">"#);
                    clip_id += 1;
                    open_groups += 1;
                }
                DrawCommand::Blend(mode) => blend = *mode,
                DrawCommand::Polygon { points, color } => {
                    let _ = writeln!(
                        body,
                        r#"<polygon points="{}" fill="{}" fill-opacity="{:.3}"{}/>"#,
                        svg_points(points),
                        color.to_css_rgb(),
                        color.a,
                        blend_style(blend)
                    );
                }
                DrawCommand::Polyline {
                    points,
                    color,
                    width,
                } => {
                    let _ = writeln!(
                        body,
                        r#"<polyline points="{}" fill="none" stroke="{}" stroke-opacity="{:.3}" stroke-width="{width:.2}"{}/>"#,
                        svg_points(points),
                        color.to_css_rgb(),
                        color.a,
                        blend_style(blend)
                    );
                }
                DrawCommand::FillRect { rect, color } => {
                    let _ = writeln!(
                        body,
                        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{:.3}"/>"#,
                        rect.x,
                        rect.y,
                        rect.width,
                        rect.height,
                        color.to_css_rgb(),
                        color.a
                    );
                }
                DrawCommand::StrokeRect { rect, color, width } => {
                    let _ = writeln!(
                        body,
                        r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="{}" stroke-opacity="{:.3}" stroke-width="{width:.2}"/>"#,
                        rect.x,
                        rect.y,
                        rect.width,
                        rect.height,
                        color.to_css_rgb(),
                        color.a
                    );
                }
                DrawCommand::Text {
                    text,
                    at,
                    color,
                    size,
                } => {
                    let _ = writeln!(
                        body,
                        r#"<text x="{:.2}" y="{:.2}" font-size="{size:.1}" font-family="sans-serif" text-anchor="middle" dominant-baseline="middle" fill="{}" fill-opacity="{:.3}">{}</text>"#,
                        at.x,
                        at.y,
                        color.to_css_rgb(),
                        color.a,
                        escape_xml(text)
                    );
                }
            }
        }
        // Unbalanced saves still produce well-formed XML.
        let unclosed = open_groups + stack.iter().map(|(n, _)| n).sum::<usize>();
        for _ in 0..unclosed {
            body.push_str("</g>\n");
        }

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
        );
        if !defs.is_empty() {
            let _ = write!(svg, "<defs>\n{defs}</defs>\n");
        }
        let _ = writeln!(
            svg,
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            background.to_css_rgb()
        );
        svg.push_str(&body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl DrawSurface for RecordingSurface {
    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Clip(rect));
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        self.commands.push(DrawCommand::Blend(mode));
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Rgba, width: f32) {
        self.commands.push(DrawCommand::Polyline {
            points: points.to_vec(),
            color,
            width,
        });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f32) {
        self.commands
            .push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, color: Rgba, size: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            at,
            color,
            size,
        });
    }
}

fn svg_points(points: &[Vec2]) -> String {
    let mut out = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:.2},{:.2}", p.x, p.y);
    }
    out
}

fn blend_style(mode: BlendMode) -> &'static str {
    match mode {
        BlendMode::Normal => "",
        BlendMode::Additive => r#" style="mix-blend-mode:plus-lighter""#,
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}
