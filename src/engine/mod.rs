//! The engine object: options, mesh cache, per-view renderers, and the
//! view controller in one place.
//!
//! There is no global state. Hosts create an [`Engine`], load meshes into
//! its cache, bind them to named views, forward input through
//! [`Engine::handle_input`], and call [`Engine::render_frame`] once per
//! display refresh (usually through an [`AnimationLoop`]).

mod animation;

use std::sync::Arc;

pub use animation::{AnimationLoop, LoopHandle, RunToken};
use glam::Vec2;
use rustc_hash::FxHashMap;

use crate::error::SomaError;
use crate::input::{
    inset_rects, InputEvent, InputResponse, PipController, ViewKind,
};
use crate::mesh::{Mesh, MeshCache};
use crate::options::{ColorOptions, Options};
use crate::picking::{PickHit, RegionSelection};
use crate::region::set_region_color;
use crate::render::{
    DrawSurface, FrameStats, Highlight, Rect, RenderStyle, Renderer,
    ShadingParams,
};
use crate::util::color::Rgba;

/// Name of the full-surface view every engine starts with.
pub const MAIN_VIEW: &str = "main";

/// Statistics for one view's pass in [`Engine::render_frame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFrame {
    /// View name.
    pub view: String,
    /// What the renderer did.
    pub stats: FrameStats,
}

/// A pick resolved to the view that owns the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPick {
    /// View the cursor was over.
    pub view: String,
    /// Face hit.
    pub hit: PickHit,
    /// Region name of the hit face.
    pub region: Option<String>,
}

struct Binding {
    mesh: Arc<Mesh>,
    renderer: Renderer,
}

/// Owns everything needed to draw and interact with a set of views.
pub struct Engine {
    options: Options,
    shading: ShadingParams,
    style: RenderStyle,
    meshes: MeshCache,
    bindings: FxHashMap<String, Binding>,
    pip: PipController,
    insets: Vec<String>,
    selection: RegionSelection,
    hover_view: Option<String>,
    size: Vec2,
}

impl Engine {
    /// Engine for a `width` x `height` surface with only the main view.
    #[must_use]
    pub fn new(options: Options, width: f32, height: f32) -> Self {
        let mut pip = PipController::new(&options);
        pip.add_view(
            MAIN_VIEW,
            ViewKind::Main,
            Rect::new(0.0, 0.0, width, height),
        );
        Self {
            shading: ShadingParams::from_options(&options.lighting),
            style: RenderStyle::from_options(&options),
            options,
            meshes: MeshCache::new(),
            bindings: FxHashMap::default(),
            pip,
            insets: Vec::new(),
            selection: RegionSelection::new(),
            hover_view: None,
            size: Vec2::new(width, height),
        }
    }

    /// Active options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace the options. Region color overrides apply to meshes loaded
    /// afterwards.
    pub fn set_options(&mut self, options: Options) {
        self.shading = ShadingParams::from_options(&options.lighting);
        self.style = RenderStyle::from_options(&options);
        self.pip.configure(&options);
        self.options = options;
        self.relayout();
    }

    /// Shading parameters used for every view.
    #[must_use]
    pub fn shading(&self) -> &ShadingParams {
        &self.shading
    }

    /// Replace the shading parameters (e.g. a per-visualization light).
    pub fn set_shading(&mut self, shading: ShadingParams) {
        self.shading = shading;
    }

    /// The view controller.
    #[must_use]
    pub fn pip(&self) -> &PipController {
        &self.pip
    }

    /// Mutable view controller (auto-rotation, home rotations, resets).
    pub fn pip_mut(&mut self) -> &mut PipController {
        &mut self.pip
    }

    /// Hover and selection.
    #[must_use]
    pub fn selection(&self) -> &RegionSelection {
        &self.selection
    }

    /// Cached meshes.
    #[must_use]
    pub fn meshes(&self) -> &MeshCache {
        &self.meshes
    }

    /// Surface size in pixels.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Resize the surface; the main view fills it and insets re-anchor.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Vec2::new(width, height);
        self.relayout();
    }

    /// Add an inset view. Insets fill the configured corners in the order
    /// they are added.
    pub fn add_inset(&mut self, name: impl Into<String>) {
        let name = name.into();
        if !self.insets.contains(&name) {
            self.pip.add_view(name.clone(), ViewKind::Inset, Rect::default());
            self.insets.push(name);
        }
        self.relayout();
    }

    fn main_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.size.x, self.size.y)
    }

    fn relayout(&mut self) {
        let main = self.main_rect();
        let rects = inset_rects(main, &self.options.pip, self.insets.len());
        // Every name here was registered with the controller.
        let _ = self.pip.set_rect(MAIN_VIEW, main);
        for (name, rect) in self.insets.iter().zip(rects) {
            let _ = self.pip.set_rect(name, rect);
        }
    }

    /// Cached mesh for `key`, generating it on first use. Region color
    /// overrides from the options are applied to fresh meshes.
    pub fn load_mesh(
        &mut self,
        key: &str,
        generate: impl FnOnce() -> Result<Mesh, SomaError>,
    ) -> Result<Arc<Mesh>, SomaError> {
        let colors = &self.options.colors;
        self.meshes.get_or_insert_with(key, || {
            let mut mesh = generate()?;
            apply_region_overrides(&mut mesh, colors);
            Ok(mesh)
        })
    }

    /// Show the cached mesh `key` in `view`.
    pub fn bind_mesh(&mut self, view: &str, key: &str) -> Result<(), SomaError> {
        if self.pip.get_state(view).is_none() {
            return Err(SomaError::UnknownView(view.to_owned()));
        }
        let mesh = self.meshes.require(key)?;
        log::debug!("bound mesh {key} to view {view}");
        let _ = self.bindings.insert(
            view.to_owned(),
            Binding {
                mesh,
                renderer: Renderer::new(),
            },
        );
        Ok(())
    }

    /// Mesh shown in `view`.
    #[must_use]
    pub fn mesh_for(&self, view: &str) -> Option<&Arc<Mesh>> {
        self.bindings.get(view).map(|b| &b.mesh)
    }

    /// Route a host event to the views.
    ///
    /// Cursor motion updates the hovered region; a click (press and
    /// release without dragging) updates the selection. Returns whether
    /// anything visible changed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match self.pip.handle_event(event) {
            InputResponse::Clicked { toggle, .. } => {
                let hovered = self.hover(self.pip.cursor());
                self.selection.handle_click(toggle) || hovered
            }
            response => {
                let changed = response == InputResponse::Updated;
                let hovered = matches!(event, InputEvent::CursorMoved { .. })
                    && self.pip.active_view().is_none()
                    && self.hover(self.pip.cursor());
                changed || hovered
            }
        }
    }

    /// Update the hovered region from the face under `pos`. Returns
    /// whether it changed.
    pub fn hover(&mut self, pos: Vec2) -> bool {
        let pick = self.pick_at(pos);
        self.hover_view = pick.as_ref().map(|p| p.view.clone());
        let region = pick.as_ref().and_then(|p| p.region.as_deref());
        self.selection.set_hovered(region)
    }

    /// Pick in whichever view owns `pos`, using that view's camera.
    pub fn pick_at(&mut self, pos: Vec2) -> Option<ViewPick> {
        let name = self.pip.view_at(pos)?;
        let view = self.pip.view_for(name)?;
        let binding = self.bindings.get_mut(name)?;
        let hit = binding.renderer.pick(
            pos,
            &binding.mesh,
            &view,
            self.style.backface_cull,
        )?;
        Some(ViewPick {
            view: name.to_owned(),
            region: hit.region_name(&binding.mesh).map(str::to_owned),
            hit,
        })
    }

    /// Advance auto-rotation. Returns whether any view moved.
    pub fn update(&mut self) -> bool {
        self.pip.update()
    }

    /// Draw every view onto `surface`.
    ///
    /// Views paint in registration order (main first), each clipped to its
    /// own rectangle. Insets get a background, a frame, and a reset
    /// control. `time` drives the highlight pulse.
    pub fn render_frame<S: DrawSurface + ?Sized>(
        &mut self,
        surface: &mut S,
        time: f32,
    ) -> Vec<ViewFrame> {
        let colors = &self.options.colors;
        let frame_color = Rgba::from_rgb(colors.inset_frame);
        surface.fill_rect(self.main_rect(), Rgba::from_rgb(colors.background));

        let mut frames = Vec::with_capacity(self.bindings.len());
        for sub in self.pip.views() {
            let name = sub.name();
            let rect = sub.rect();
            let inset = sub.kind() == ViewKind::Inset;

            surface.save();
            surface.clip_rect(rect);
            if inset {
                surface.fill_rect(rect, Rgba::from_rgb(colors.inset_background));
            }
            if let (Some(binding), Some(view)) =
                (self.bindings.get_mut(name), self.pip.view_for(name))
            {
                let hovered = (self.hover_view.as_deref() == Some(name))
                    .then(|| self.selection.hovered())
                    .flatten();
                let region = hovered
                    .or_else(|| self.selection.selected().last().map(String::as_str))
                    .filter(|r| binding.mesh.region_id(r).is_some());
                let highlight = region.map(|region| Highlight {
                    region: region.to_owned(),
                    color: Rgba::from_rgb(colors.highlight),
                    pulse_hz: self.options.render.highlight_pulse_hz,
                    time,
                });
                let style = self.style.clone().with_highlight(highlight);
                let stats = binding.renderer.render(
                    surface,
                    &binding.mesh,
                    &view,
                    &self.shading,
                    &style,
                );
                frames.push(ViewFrame {
                    view: name.to_owned(),
                    stats,
                });
            }
            surface.restore();

            if inset {
                surface.stroke_rect(rect, frame_color, 1.0);
                let size = self.pip.reset_button_size();
                let button = sub.reset_button(size);
                surface.stroke_rect(button, frame_color, 1.0);
                surface.fill_text("\u{21ba}", button.center(), frame_color, size * 0.8);
                surface.fill_text(
                    name,
                    Vec2::new(rect.center().x, rect.y + rect.height - 10.0),
                    frame_color,
                    11.0,
                );
            }
        }
        frames
    }
}

/// Recolor regions named in `colors.region_overrides`.
fn apply_region_overrides(mesh: &mut Mesh, colors: &ColorOptions) {
    for (name, rgb) in &colors.region_overrides {
        if set_region_color(mesh, name, Rgba::from_rgb(*rgb)) {
            log::debug!("applied color override for region {name}");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use glam::Vec3;

    use super::*;
    use crate::input::MouseButton;
    use crate::mesh::primitives::generate_sphere;
    use crate::region::{classify_regions, RegionTable};
    use crate::render::{DrawCommand, RecordingSurface};

    fn sides() -> RegionTable {
        RegionTable::new()
            .with_rule("left", Rgba::new(0.2, 0.4, 0.9, 1.0), |p| p.x < -0.1)
            .with_rule("right", Rgba::new(0.9, 0.4, 0.2, 1.0), |p| p.x > 0.1)
    }

    fn engine_with(options: Options) -> Engine {
        let mut engine = Engine::new(options, 800.0, 600.0);
        engine.add_inset("helix");
        let _ = engine
            .load_mesh("sphere", || {
                let mut mesh = generate_sphere(100.0, 16, 24)?;
                classify_regions(&mut mesh, &sides())?;
                Ok(mesh)
            })
            .unwrap();
        engine.bind_mesh(MAIN_VIEW, "sphere").unwrap();
        engine.bind_mesh("helix", "sphere").unwrap();
        engine
    }

    fn engine() -> Engine {
        engine_with(Options::default())
    }

    fn helix_rect(engine: &Engine) -> Rect {
        engine.pip().views()[1].rect()
    }

    fn move_to(engine: &mut Engine, p: Vec2) -> bool {
        engine.handle_input(InputEvent::CursorMoved { x: p.x, y: p.y })
    }

    fn button(engine: &mut Engine, pressed: bool) -> bool {
        engine.handle_input(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed,
        })
    }

    #[test]
    fn insets_anchor_to_corners() {
        let engine = engine();
        let helix = helix_rect(&engine);
        assert_eq!(helix, Rect::new(568.0, 12.0, 220.0, 165.0));
        assert_eq!(engine.pip().view_at(helix.center()), Some("helix"));
    }

    #[test]
    fn each_view_picks_with_its_own_camera() {
        let mut engine = engine();
        engine
            .pip_mut()
            .set_home_rotation("helix", Vec3::new(0.0, PI, 0.0))
            .unwrap();

        let main = engine.pick_at(Vec2::new(380.0, 300.0)).unwrap();
        assert_eq!(main.view, MAIN_VIEW);
        assert_eq!(main.region.as_deref(), Some("left"));

        // Same screen offset in the half-turned inset lands on the other side.
        let helix = helix_rect(&engine).center() - Vec2::new(20.0, 0.0);
        let inset = engine.pick_at(helix).unwrap();
        assert_eq!(inset.view, "helix");
        assert_eq!(inset.region.as_deref(), Some("right"));
    }

    #[test]
    fn wheel_input_zooms_only_the_hovered_view() {
        let mut engine = engine();
        let center = helix_rect(&engine).center();
        let _ = move_to(&mut engine, center);
        assert!(engine.handle_input(InputEvent::Scroll { delta: 200.0 }));
        let helix = engine.pip().get_state("helix").unwrap().zoom;
        assert!((helix - 0.2f32.exp()).abs() < 1e-5);
        assert_eq!(engine.pip().get_state(MAIN_VIEW).unwrap().zoom, 1.0);
    }

    #[test]
    fn click_selects_hovered_region() {
        let mut engine = engine();
        assert!(move_to(&mut engine, Vec2::new(380.0, 300.0)));
        assert_eq!(engine.selection().hovered(), Some("left"));
        let _ = button(&mut engine, true);
        assert!(button(&mut engine, false));
        assert_eq!(engine.selection().selected(), ["left"]);

        // Clicking empty background clears it.
        let _ = move_to(&mut engine, Vec2::new(40.0, 560.0));
        assert_eq!(engine.selection().hovered(), None);
        let _ = button(&mut engine, true);
        assert!(button(&mut engine, false));
        assert!(engine.selection().selected().is_empty());
    }

    #[test]
    fn dragging_does_not_select() {
        let mut engine = engine();
        let _ = move_to(&mut engine, Vec2::new(380.0, 300.0));
        let _ = button(&mut engine, true);
        assert!(move_to(&mut engine, Vec2::new(420.0, 300.0)));
        let _ = button(&mut engine, false);
        assert!(engine.selection().selected().is_empty());
        let rot = engine.pip().get_state(MAIN_VIEW).unwrap().camera.rotation;
        assert!(rot.y > 0.0);
    }

    #[test]
    fn frame_clips_each_view_to_its_rect() {
        let mut engine = engine();
        let mut surface = RecordingSurface::new();
        let frames = engine.render_frame(&mut surface, 0.0);

        let names: Vec<&str> = frames.iter().map(|f| f.view.as_str()).collect();
        assert_eq!(names, [MAIN_VIEW, "helix"]);
        assert!(frames.iter().all(|f| f.stats.drawn > 0));

        let clips: Vec<Rect> = surface
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Clip(r) => Some(*r),
                _ => None,
            })
            .collect();
        assert_eq!(clips, [Rect::new(0.0, 0.0, 800.0, 600.0), helix_rect(&engine)]);

        // Every polygon falls between a clip and its restore.
        let mut depth = 0;
        for command in surface.commands() {
            match command {
                DrawCommand::Save => depth += 1,
                DrawCommand::Restore => depth -= 1,
                DrawCommand::Polygon { .. } => assert!(depth > 0),
                _ => {}
            }
        }
        assert_eq!(depth, 0);
    }

    #[test]
    fn hover_highlights_only_in_hovered_view() {
        let mut engine = engine();
        let _ = move_to(&mut engine, Vec2::new(380.0, 300.0));
        let frames = engine.render_frame(&mut RecordingSurface::new(), 0.25);
        assert!(frames[0].stats.highlighted > 0);
        assert_eq!(frames[1].stats.highlighted, 0);
    }

    #[test]
    fn bind_requires_known_view_and_mesh() {
        let mut engine = engine();
        assert!(matches!(
            engine.bind_mesh("dna", "sphere"),
            Err(SomaError::UnknownView(_))
        ));
        assert!(matches!(
            engine.bind_mesh(MAIN_VIEW, "protein:TP53"),
            Err(SomaError::UnknownMesh(_))
        ));
    }

    #[test]
    fn region_overrides_apply_on_load() {
        let mut options = Options::default();
        let _ = options
            .colors
            .region_overrides
            .insert("right".to_owned(), [0.0, 1.0, 0.0]);
        let engine = engine_with(options);
        let mesh = engine.mesh_for(MAIN_VIEW).unwrap();
        let right = mesh.region(mesh.region_id("right").unwrap()).unwrap();
        assert_eq!(right.color, Rgba::new(0.0, 1.0, 0.0, 1.0));
        let left = mesh.region(mesh.region_id("left").unwrap()).unwrap();
        assert_eq!(left.color, Rgba::new(0.2, 0.4, 0.9, 1.0));
    }

    #[test]
    fn resize_reanchors_insets() {
        let mut engine = engine();
        engine.resize(1000.0, 700.0);
        assert_eq!(helix_rect(&engine), Rect::new(768.0, 12.0, 220.0, 165.0));
        assert_eq!(
            engine.pip().views()[0].rect(),
            Rect::new(0.0, 0.0, 1000.0, 700.0)
        );
    }
}
