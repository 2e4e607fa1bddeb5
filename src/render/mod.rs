//! Depth-sorted software rendering onto a [`DrawSurface`].
//!
//! Per frame the [`Renderer`] projects every vertex once (through its
//! [`ProjectionCache`]), drops hidden, malformed, degenerate, and
//! back-facing faces, shades the survivors from their world-space normals,
//! sorts them far-to-near, and paints them (painter's algorithm, no depth
//! buffer). A highlighted region is repainted additively on top, followed
//! by the optional wireframe, region outlines, and labels.

/// Projection reuse across render and pick calls.
pub mod cache;
mod overlay;
/// Command recording and SVG export.
pub mod recording;
/// Lighting parameters.
pub mod shading;
/// The drawing-surface abstraction.
pub mod surface;
pub mod visibility;

use std::f32::consts::TAU;

pub use cache::ProjectionCache;
use glam::Vec2;
pub use recording::{DrawCommand, RecordingSurface};
pub use shading::ShadingParams;
pub use surface::{BlendMode, DrawSurface, Rect};
pub use visibility::{collect_visible, CullCounts, VisibleFace};

use crate::camera::{DepthFog, DepthRange, ProjectedPoint, View};
use crate::mesh::{Face, Mesh};
use crate::options::Options;
use crate::picking::{pick_projected, PickHit};
use crate::util::color::Rgba;

/// A region drawn with a pulsing additive overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    /// Region name to highlight.
    pub region: String,
    /// Overlay color.
    pub color: Rgba,
    /// Pulse frequency; zero holds the overlay at full strength.
    pub pulse_hz: f32,
    /// Animation time in seconds.
    pub time: f32,
}

impl Highlight {
    /// Pulse strength in `[0, 1]` at the current time.
    #[must_use]
    pub fn intensity(&self) -> f32 {
        if self.pulse_hz <= 0.0 {
            1.0
        } else {
            0.5 + 0.5 * (TAU * self.pulse_hz * self.time).sin()
        }
    }

    fn alpha(&self) -> f32 {
        0.2 + 0.5 * self.intensity()
    }
}

/// Resolved per-draw rendering options.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Depth fog over the frame's normalized depth range.
    pub fog: DepthFog,
    /// Skip faces turned away from the viewer.
    pub backface_cull: bool,
    /// Color for faces without a region or color hint.
    pub default_material: Rgba,
    /// Draw every Nth latitude ring (0 = off).
    pub wireframe_every: u32,
    /// Wireframe color; alpha is the pre-fog opacity.
    pub wireframe_color: Rgba,
    /// Draw region boundaries.
    pub show_boundaries: bool,
    /// Boundary color.
    pub boundary_color: Rgba,
    /// Boundary stroke width.
    pub boundary_width: f32,
    /// Draw region labels.
    pub show_labels: bool,
    /// Label color.
    pub label_color: Rgba,
    /// Label font size.
    pub label_size: f32,
    /// Region to highlight, if any.
    pub highlight: Option<Highlight>,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

impl RenderStyle {
    /// Resolve renderer options and palette.
    #[must_use]
    pub fn from_options(options: &Options) -> Self {
        let render = &options.render;
        let colors = &options.colors;
        Self {
            fog: render.depth_fog(),
            backface_cull: render.backface_cull,
            default_material: Rgba::from_rgb(colors.default_material),
            wireframe_every: render.wireframe_every,
            wireframe_color: Rgba::from_rgb(colors.boundary)
                .with_alpha(render.wireframe_alpha),
            show_boundaries: render.show_boundaries,
            boundary_color: Rgba::from_rgb(colors.boundary),
            boundary_width: render.boundary_width,
            show_labels: render.show_labels,
            label_color: Rgba::from_rgb(colors.label),
            label_size: render.label_size,
            highlight: None,
        }
    }

    /// Same style with a highlighted region.
    #[must_use]
    pub fn with_highlight(self, highlight: Option<Highlight>) -> Self {
        Self { highlight, ..self }
    }
}

/// What one [`Renderer::render`] call did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Faces in the mesh.
    pub faces: usize,
    /// Faces with a vertex behind the near plane or past the far plane.
    pub hidden: usize,
    /// Faces culled as back-facing.
    pub backfacing: usize,
    /// Faces with out-of-range indices.
    pub invalid: usize,
    /// Zero-area faces.
    pub degenerate: usize,
    /// Faces painted in the main pass.
    pub drawn: usize,
    /// Faces repainted by the highlight pass.
    pub highlighted: usize,
    /// Wireframe polylines stroked.
    pub wireframe_lines: usize,
    /// Boundary edges stroked.
    pub boundary_edges: usize,
    /// Labels drawn.
    pub labels: usize,
}

impl FrameStats {
    fn from_counts(faces: usize, counts: CullCounts) -> Self {
        Self {
            faces,
            hidden: counts.hidden,
            backfacing: counts.backfacing,
            invalid: counts.invalid,
            degenerate: counts.degenerate,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct PaintedFace {
    face: VisibleFace,
    color: Rgba,
}

/// Reusable per-view render state: the projection cache and scratch
/// buffers.
#[derive(Debug, Default)]
pub struct Renderer {
    cache: ProjectionCache,
    visible: Vec<VisibleFace>,
    painted: Vec<PaintedFace>,
}

impl Renderer {
    /// Renderer with empty buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Projected vertices of `mesh` under `view` (cached).
    pub fn projected(&mut self, mesh: &Mesh, view: &View) -> &[ProjectedPoint] {
        self.cache.project(mesh, view)
    }

    /// Projection cache statistics `(hits, misses)`.
    #[must_use]
    pub fn cache_stats(&self) -> (u64, u64) {
        self.cache.stats()
    }

    /// Paint `mesh` as seen through `view`.
    ///
    /// Never mutates the camera. Malformed faces panic in debug builds and
    /// are skipped (and counted) otherwise.
    pub fn render<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        mesh: &Mesh,
        view: &View,
        shading: &ShadingParams,
        style: &RenderStyle,
    ) -> FrameStats {
        let projected = self.cache.project(mesh, view);
        let counts = collect_visible(
            mesh,
            projected,
            style.backface_cull,
            &mut self.visible,
        );
        if counts.invalid > 0 {
            log::warn!(
                "skipped {} faces with out-of-range vertex indices",
                counts.invalid
            );
        }
        let mut stats = FrameStats::from_counts(mesh.faces().len(), counts);

        let range = DepthRange::from_depths(self.visible.iter().map(|f| f.depth));
        let fog = |alpha: f32, depth: f32| match range {
            Some(r) => style.fog.apply(alpha, r.normalize(depth)),
            None => alpha,
        };

        self.painted.clear();
        for vf in &self.visible {
            let face = &mesh.faces()[vf.index as usize];
            let base = face_color(mesh, face, style.default_material);
            let lit = base.shade(shading.lighting(face.normal));
            self.painted.push(PaintedFace {
                face: *vf,
                color: lit.with_alpha(fog(base.a, vf.depth)),
            });
        }
        // Stable: equal depths keep mesh order.
        self.painted
            .sort_by(|a, b| b.face.depth.total_cmp(&a.face.depth));

        for p in &self.painted {
            surface.fill_polygon(&p.face.screen, p.color);
        }
        stats.drawn = self.painted.len();

        if let Some(h) = &style.highlight {
            stats.highlighted = paint_highlight(surface, mesh, &self.painted, h);
        }

        let front_depth = mesh
            .bounds()
            .map(|(lo, hi)| view.project((lo + hi) * 0.5).depth);
        if let Some(front_depth) = front_depth {
            let overlay = overlay::Overlay {
                mesh,
                view,
                projected,
                front_depth,
                fog: &fog,
            };
            if style.wireframe_every > 0 {
                stats.wireframe_lines = overlay.wireframe(
                    surface,
                    style.wireframe_every,
                    style.wireframe_color,
                );
            }
            if style.show_boundaries {
                stats.boundary_edges = overlay.boundaries(
                    surface,
                    &self.visible,
                    style.boundary_color,
                    style.boundary_width,
                );
            }
            if style.show_labels {
                stats.labels =
                    overlay.labels(surface, style.label_color, style.label_size);
            }
        }

        log::debug!("frame stats: {stats:?}");
        stats
    }

    /// Frontmost face under `cursor`, using this renderer's cached
    /// projection. `view` must be the one the frame was drawn with.
    pub fn pick(
        &mut self,
        cursor: Vec2,
        mesh: &Mesh,
        view: &View,
        backface_cull: bool,
    ) -> Option<PickHit> {
        let projected = self.cache.project(mesh, view);
        pick_projected(cursor, mesh, projected, backface_cull)
    }
}

/// One-off render without a persistent [`Renderer`].
pub fn render<S: DrawSurface + ?Sized>(
    surface: &mut S,
    mesh: &Mesh,
    view: &View,
    shading: &ShadingParams,
    style: &RenderStyle,
) -> FrameStats {
    Renderer::new().render(surface, mesh, view, shading, style)
}

/// Repaint the highlighted region's visible faces additively.
fn paint_highlight<S: DrawSurface + ?Sized>(
    surface: &mut S,
    mesh: &Mesh,
    painted: &[PaintedFace],
    highlight: &Highlight,
) -> usize {
    let Some(id) = mesh.region_id(&highlight.region) else {
        return 0;
    };
    let alpha = highlight.alpha();
    let mut count = 0;
    surface.save();
    surface.set_blend_mode(BlendMode::Additive);
    for p in painted {
        if mesh.faces()[p.face.index as usize].region == Some(id) {
            surface.fill_polygon(
                &p.face.screen,
                highlight.color.with_alpha(alpha * p.color.a),
            );
            count += 1;
        }
    }
    surface.restore();
    count
}

/// Base color of a face: the first vertex's color hint, else its region's
/// color, else `default`.
fn face_color(mesh: &Mesh, face: &Face, default: Rgba) -> Rgba {
    let hint = mesh
        .vertices()
        .get(face.indices[0] as usize)
        .and_then(|v| v.color_hint);
    hint.or_else(|| face.region.and_then(|id| mesh.region(id)).map(|r| r.color))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::camera::{Camera, Viewport};
    use crate::mesh::primitives::generate_sphere;
    use crate::mesh::{MeshBuilder, Vertex};
    use crate::region::{classify_regions, RegionTable};

    fn view() -> View {
        View::new(
            Camera::orbiting(600.0, 600.0),
            Viewport::new(800.0, 600.0, 1.0, 5000.0),
        )
    }

    fn classified_sphere() -> Mesh {
        let mut mesh = generate_sphere(100.0, 16, 24).unwrap();
        let table = RegionTable::new()
            .with_rule("left", Rgba::new(1.0, 0.2, 0.2, 1.0), |p| p.x < 0.0)
            .with_rule("right", Rgba::new(0.2, 0.2, 1.0, 1.0), |p| p.x > 0.0);
        classify_regions(&mut mesh, &table).unwrap();
        mesh
    }

    fn polygons(surface: &RecordingSurface) -> Vec<(Vec<Vec2>, Rgba)> {
        surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Polygon { points, color } => {
                    Some((points.clone(), *color))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn paints_back_to_front() {
        let mesh = classified_sphere();
        let mut renderer = Renderer::new();
        let mut surface = RecordingSurface::new();
        let style = RenderStyle {
            show_boundaries: false,
            ..RenderStyle::default()
        };
        let stats = renderer.render(
            &mut surface,
            &mesh,
            &view(),
            &ShadingParams::default(),
            &style,
        );
        assert!(stats.drawn > 0);
        assert_eq!(surface.polygon_count(), stats.drawn);
        assert_eq!(
            stats.drawn + stats.hidden + stats.backfacing + stats.invalid
                + stats.degenerate,
            stats.faces
        );

        // Every painted triangle's depth is non-increasing in paint order.
        let projected = renderer.projected(&mesh, &view()).to_vec();
        let depth_of = |pts: &[Vec2]| -> f32 {
            let face = mesh
                .faces()
                .iter()
                .find(|f| {
                    f.indices
                        .iter()
                        .zip(pts)
                        .all(|(&i, p)| projected[i as usize].screen() == *p)
                })
                .unwrap();
            face.indices.iter().map(|&i| projected[i as usize].depth).sum::<f32>()
                / 3.0
        };
        let depths: Vec<f32> =
            polygons(&surface).iter().map(|(pts, _)| depth_of(pts)).collect();
        assert!(depths.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn render_reuses_projection_and_leaves_camera_alone() {
        let mesh = classified_sphere();
        let view = view();
        let before = view;
        let mut renderer = Renderer::new();
        let mut surface = RecordingSurface::new();
        for _ in 0..2 {
            let _ = renderer.render(
                &mut surface,
                &mesh,
                &view,
                &ShadingParams::default(),
                &RenderStyle::default(),
            );
        }
        let _ = renderer.pick(view.viewport.center(), &mesh, &view, true);
        assert_eq!(renderer.cache_stats(), (2, 1));
        assert_eq!(view, before);
    }

    #[test]
    fn region_colors_are_lit_and_unassigned_faces_use_default() {
        let mut b = MeshBuilder::new();
        let v0 = b.push_vertex(Vec3::new(-50.0, -50.0, 0.0));
        let v1 = b.push_vertex(Vec3::new(-50.0, 50.0, 0.0));
        let v2 = b.push_vertex(Vec3::new(50.0, -50.0, 0.0));
        b.push_triangle([v0, v1, v2]);
        let mesh = b.build().unwrap();
        assert_eq!(mesh.faces()[0].normal, Vec3::NEG_Z);

        let shading = ShadingParams {
            light_dir: Vec3::NEG_Z,
            ambient: 0.5,
            diffuse: 0.5,
            specular: 0.0,
            shininess: 1.0,
        };
        let style = RenderStyle {
            default_material: Rgba::new(0.4, 0.4, 0.4, 1.0),
            ..RenderStyle::default()
        };
        let mut surface = RecordingSurface::new();
        let stats = render(&mut surface, &mesh, &view(), &shading, &style);
        assert_eq!(stats.drawn, 1);
        let (_, color) = polygons(&surface)[0].clone();
        // Fully lit: 0.5 + 0.5 * 1.
        assert!((color.r - 0.4).abs() < 1e-6);
        assert_eq!(color.a, 1.0);
    }

    #[test]
    fn color_hint_beats_region_color() {
        let mut b = MeshBuilder::new();
        let hint = Rgba::new(0.0, 1.0, 0.0, 1.0);
        let v0 = b.push_vertex_with(Vertex {
            color_hint: Some(hint),
            ..Vertex::new(Vec3::new(-50.0, -50.0, 0.0))
        });
        let v1 = b.push_vertex(Vec3::new(-50.0, 50.0, 0.0));
        let v2 = b.push_vertex(Vec3::new(50.0, -50.0, 0.0));
        b.push_triangle([v0, v1, v2]);
        let mut mesh = b.build().unwrap();
        let table = RegionTable::new().with_rule("all", Rgba::BLACK, |_| true);
        classify_regions(&mut mesh, &table).unwrap();
        assert_eq!(face_color(&mesh, &mesh.faces()[0], Rgba::WHITE), hint);
    }

    #[test]
    fn far_faces_are_fogged() {
        let mesh = classified_sphere();
        let style = RenderStyle {
            backface_cull: false,
            show_boundaries: false,
            ..RenderStyle::default()
        };
        let mut surface = RecordingSurface::new();
        let _ = render(&mut surface, &mesh, &view(), &ShadingParams::default(), &style);
        let polys = polygons(&surface);
        let first = polys.first().unwrap().1;
        let last = polys.last().unwrap().1;
        assert!(first.a < last.a, "farthest face should be most transparent");
        assert!(first.a >= style.fog.floor - 1e-6);
    }

    #[test]
    fn highlight_pass_is_additive_and_scoped() {
        let mesh = classified_sphere();
        let style = RenderStyle {
            show_boundaries: false,
            ..RenderStyle::default()
        }
        .with_highlight(Some(Highlight {
            region: "left".into(),
            color: Rgba::new(1.0, 0.9, 0.2, 1.0),
            pulse_hz: 0.0,
            time: 0.0,
        }));
        let mut surface = RecordingSurface::new();
        let stats =
            render(&mut surface, &mesh, &view(), &ShadingParams::default(), &style);
        assert!(stats.highlighted > 0 && stats.highlighted < stats.drawn);
        assert_eq!(surface.polygon_count(), stats.drawn + stats.highlighted);

        let cmds = surface.commands();
        let blend_at = cmds
            .iter()
            .position(|c| *c == DrawCommand::Blend(BlendMode::Additive))
            .unwrap();
        assert_eq!(cmds[blend_at - 1], DrawCommand::Save);
        let restore_at = blend_at + 1 + stats.highlighted;
        assert_eq!(cmds[restore_at], DrawCommand::Restore);

        let unknown = style.clone().with_highlight(Some(Highlight {
            region: "nowhere".into(),
            ..style.highlight.clone().unwrap()
        }));
        let mut surface = RecordingSurface::new();
        let stats =
            render(&mut surface, &mesh, &view(), &ShadingParams::default(), &unknown);
        assert_eq!(stats.highlighted, 0);
    }

    #[test]
    fn pulse_oscillates() {
        let mut h = Highlight {
            region: "x".into(),
            color: Rgba::WHITE,
            pulse_hz: 1.0,
            time: 0.25,
        };
        assert!((h.intensity() - 1.0).abs() < 1e-5);
        h.time = 0.75;
        assert!(h.intensity().abs() < 1e-5);
    }

    #[test]
    fn overlays_draw_boundaries_wireframe_and_labels() {
        let mesh = classified_sphere();
        let style = RenderStyle {
            wireframe_every: 4,
            show_labels: true,
            ..RenderStyle::default()
        };
        // Rotate so the left/right seam faces the camera.
        let mut v = view();
        v.camera.rotation.y = 0.3;
        let mut surface = RecordingSurface::new();
        let stats = render(&mut surface, &mesh, &v, &ShadingParams::default(), &style);
        assert!(stats.boundary_edges > 0);
        assert!(stats.wireframe_lines > 0);
        assert!(stats.labels >= 1);
        assert!(surface.commands().iter().any(|c| matches!(
            c,
            DrawCommand::Text { text, .. } if text == "left" || text == "right"
        )));
    }

    #[test]
    fn degenerate_faces_are_skipped() {
        let mut b = MeshBuilder::new();
        for p in [
            Vec3::new(-40.0, -40.0, 0.0),
            Vec3::new(-40.0, 40.0, 0.0),
            Vec3::new(40.0, 40.0, 0.0),
        ] {
            let _ = b.push_vertex(p);
        }
        b.push_triangle([0, 1, 2]);
        b.push_triangle([0, 1, 1]);
        let mesh = b.build().unwrap();

        let mut surface = RecordingSurface::new();
        let style = RenderStyle {
            show_boundaries: false,
            ..RenderStyle::default()
        };
        let stats = render(&mut surface, &mesh, &view(), &ShadingParams::default(), &style);
        assert_eq!(stats.degenerate, 1);
        assert_eq!(stats.drawn, 1);
        let painted = polygons(&surface);
        assert_eq!(painted.len(), 1);
        let pts = &painted[0].0;
        assert!(pts[0] != pts[1] && pts[1] != pts[2] && pts[0] != pts[2]);
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "out of range"))]
    fn malformed_faces_fail_fast_in_debug_and_are_skipped_in_release() {
        let faces = vec![Face::new([0, 1, 2]), Face::new([0, 1, 7])];
        let vertices = [
            Vec3::new(-50.0, -50.0, 0.0),
            Vec3::new(-50.0, 50.0, 0.0),
            Vec3::new(50.0, -50.0, 0.0),
        ]
        .into_iter()
        .map(Vertex::new)
        .collect();
        let mesh = Mesh::new_unchecked(vertices, faces, 1.0);
        let mut surface = RecordingSurface::new();
        let stats = render(
            &mut surface,
            &mesh,
            &view(),
            &ShadingParams::default(),
            &RenderStyle::default(),
        );
        assert_eq!(stats.invalid, 1);
        assert_eq!(stats.drawn, 1);
    }
}
