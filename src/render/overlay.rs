//! Wireframe, boundary, and label overlays drawn after the face pass.

use glam::Vec2;

use super::surface::DrawSurface;
use super::visibility::{is_front_facing, VisibleFace};
use crate::camera::{ProjectedPoint, View};
use crate::mesh::Mesh;
use crate::util::color::Rgba;

/// Shared inputs for the overlay passes of one frame.
pub(super) struct Overlay<'a> {
    pub(super) mesh: &'a Mesh,
    pub(super) view: &'a View,
    pub(super) projected: &'a [ProjectedPoint],
    /// Depth of the mesh's bounding-box center; points nearer than this
    /// count as the near side.
    pub(super) front_depth: f32,
    /// Depth fog applied to overlay alpha.
    pub(super) fog: &'a dyn Fn(f32, f32) -> f32,
}

impl Overlay<'_> {
    fn near_side(&self, i: u32) -> Option<&ProjectedPoint> {
        self.projected
            .get(i as usize)
            .filter(|p| p.is_visible() && p.depth <= self.front_depth)
    }

    /// Stroke every `every`-th interior latitude ring of each grid, split
    /// wherever the ring passes behind the mesh. Returns polylines drawn.
    pub(super) fn wireframe<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        every: u32,
        color: Rgba,
    ) -> usize {
        let mut lines = 0;
        let mut run: Vec<Vec2> = Vec::new();
        let mut depth_sum = 0.0;

        let mut flush = |run: &mut Vec<Vec2>, depth_sum: &mut f32| {
            if run.len() >= 2 {
                let depth = *depth_sum / run.len() as f32;
                let alpha = (self.fog)(color.a, depth);
                surface.stroke_polyline(run, color.with_alpha(alpha), 1.0);
                lines += 1;
            }
            run.clear();
            *depth_sum = 0.0;
        };

        for grid in self.mesh.grids() {
            // Rings 0 and rows - 1 are poles.
            for row in (every..grid.rows.saturating_sub(1)).step_by(every as usize) {
                for i in grid.row(row) {
                    match self.near_side(i) {
                        Some(p) => {
                            run.push(p.screen());
                            depth_sum += p.depth;
                        }
                        None => flush(&mut run, &mut depth_sum),
                    }
                }
                flush(&mut run, &mut depth_sum);
            }
        }
        lines
    }

    /// Stroke boundary edges adjacent to at least one front-facing visible
    /// face. Returns edges drawn.
    pub(super) fn boundaries<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        visible: &[VisibleFace],
        color: Rgba,
        width: f32,
    ) -> usize {
        if self.mesh.boundaries().is_empty() {
            return 0;
        }
        let mut front = vec![false; self.mesh.faces().len()];
        for vf in visible {
            if is_front_facing(vf.signed_area) {
                front[vf.index as usize] = true;
            }
        }

        let mut drawn = 0;
        for edge in self.mesh.boundaries() {
            let [f1, f2] = edge.faces;
            let faces_front = front.get(f1 as usize).copied().unwrap_or(false)
                || front.get(f2 as usize).copied().unwrap_or(false);
            if !faces_front {
                continue;
            }
            let (Some(a), Some(b)) = (
                self.projected.get(edge.i1 as usize),
                self.projected.get(edge.i2 as usize),
            ) else {
                continue;
            };
            if !(a.is_visible() && b.is_visible()) {
                continue;
            }
            let alpha = (self.fog)(color.a, (a.depth + b.depth) * 0.5);
            surface.stroke_polyline(
                &[a.screen(), b.screen()],
                color.with_alpha(alpha),
                width,
            );
            drawn += 1;
        }
        drawn
    }

    /// Draw each region's name at its projected centroid when the centroid
    /// is on the near side. Returns labels drawn.
    pub(super) fn labels<S: DrawSurface + ?Sized>(
        &self,
        surface: &mut S,
        color: Rgba,
        size: f32,
    ) -> usize {
        let mut drawn = 0;
        for region in self.mesh.regions() {
            let Some(c) = region.centroid else {
                continue;
            };
            let p = self.view.project(c);
            if !p.is_visible() || p.depth > self.front_depth {
                continue;
            }
            surface.fill_text(&region.name, p.screen(), color, size);
            drawn += 1;
        }
        drawn
    }
}
