//! Browser front end: a [`DrawSurface`] over a canvas 2D context and a
//! `requestAnimationFrame` driver.
//!
//! The page forwards pointer, wheel, and modifier events to [`WebViewer`];
//! the viewer redraws every animation frame while started.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::demo;
use crate::engine::{AnimationLoop, Engine, LoopHandle};
use crate::input::{InputEvent, MouseButton};
use crate::options::Options;
use crate::render::{BlendMode, DrawSurface, Rect};
use crate::util::color::Rgba;

/// Canvas 2D context as a drawing surface.
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Wrap a 2D context.
    #[must_use]
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn trace(&self, points: &[Vec2]) {
        self.ctx.begin_path();
        let mut iter = points.iter();
        if let Some(first) = iter.next() {
            self.ctx.move_to(f64::from(first.x), f64::from(first.y));
        }
        for p in iter {
            self.ctx.line_to(f64::from(p.x), f64::from(p.y));
        }
    }
}

impl DrawSurface for CanvasSurface {
    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ctx.begin_path();
        self.ctx.rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
        self.ctx.clip();
    }

    fn set_blend_mode(&mut self, mode: BlendMode) {
        let op = match mode {
            BlendMode::Normal => "source-over",
            BlendMode::Additive => "lighter",
        };
        if self.ctx.set_global_composite_operation(op).is_err() {
            log::warn!("canvas rejected composite operation {op}");
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        self.trace(points);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill();
    }

    fn stroke_polyline(&mut self, points: &[Vec2], color: Rgba, width: f32) {
        if points.len() < 2 {
            return;
        }
        self.trace(points);
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(f64::from(width));
        self.ctx.stroke();
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.fill_rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba, width: f32) {
        self.ctx.set_stroke_style_str(&color.to_css());
        self.ctx.set_line_width(f64::from(width));
        self.ctx.stroke_rect(
            f64::from(rect.x),
            f64::from(rect.y),
            f64::from(rect.width),
            f64::from(rect.height),
        );
    }

    fn fill_text(&mut self, text: &str, at: Vec2, color: Rgba, size: f32) {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.set_font(&format!("{size}px sans-serif"));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let _ = self
            .ctx
            .fill_text(text, f64::from(at.x), f64::from(at.y));
    }
}

/// Install the panic hook and console logger. Safe to call repeatedly.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("console logger already installed");
    }
}

struct WebState {
    engine: Engine,
    surface: CanvasSurface,
    anim: AnimationLoop,
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn request_frame(callback: &Closure<dyn FnMut()>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let _ = window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}

/// The demo scene bound to a page canvas.
#[wasm_bindgen]
pub struct WebViewer {
    state: Rc<RefCell<WebState>>,
    handle: LoopHandle,
}

#[wasm_bindgen]
impl WebViewer {
    /// Attach to the canvas with DOM id `canvas_id`, optionally configured
    /// by a TOML preset string.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, preset: Option<String>) -> Result<WebViewer, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or("no such canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let options = match preset {
            Some(text) => Options::from_toml(&text)
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Options::default(),
        };
        let anim = AnimationLoop::new(options.render.target_fps);
        let mut engine =
            Engine::new(options, canvas.width() as f32, canvas.height() as f32);
        demo::populate(&mut engine).map_err(|e| JsValue::from_str(&e.to_string()))?;

        let handle = anim.handle();
        Ok(Self {
            state: Rc::new(RefCell::new(WebState {
                engine,
                surface: CanvasSurface::new(ctx),
                anim,
            })),
            handle,
        })
    }

    /// Begin redrawing every animation frame. No-op if already running.
    ///
    /// A frame chain from an earlier run still waiting on its next frame
    /// ends itself instead of running alongside this one.
    pub fn start(&self) -> Result<(), JsValue> {
        if !self.state.borrow_mut().anim.start() {
            return Ok(());
        }
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let next = Rc::clone(&callback);
        let state = Rc::clone(&self.state);
        let handle = self.handle.clone();
        let token = handle.token();
        *callback.borrow_mut() = Some(Closure::new(move || {
            if !handle.is_current(token) {
                // Drop the closure so the loop releases its state.
                let _ = next.borrow_mut().take();
                return;
            }
            {
                let WebState {
                    engine,
                    surface,
                    anim,
                } = &mut *state.borrow_mut();
                let _ = anim.tick(engine, surface);
            }
            if let Some(cb) = next.borrow().as_ref() {
                if let Err(e) = request_frame(cb) {
                    log::error!("requestAnimationFrame failed: {e:?}");
                    handle.stop();
                }
            }
        }));
        match callback.borrow().as_ref() {
            Some(cb) => request_frame(cb),
            None => Ok(()),
        }
    }

    /// Stop redrawing. Safe to call repeatedly.
    pub fn stop(&self) {
        let _ = self.state.borrow_mut().anim.stop();
    }

    /// Whether the frame loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Canvas was resized.
    pub fn resize(&self, width: f32, height: f32) {
        self.state.borrow_mut().engine.resize(width, height);
    }

    /// Pointer moved (canvas pixels).
    pub fn on_mouse_move(&self, x: f32, y: f32) -> bool {
        self.dispatch(InputEvent::CursorMoved { x, y })
    }

    /// Pointer button changed; `button` is `MouseEvent.button`.
    pub fn on_mouse_button(&self, button: i16, pressed: bool) -> bool {
        self.dispatch(InputEvent::MouseButton {
            button: MouseButton::from_dom(button),
            pressed,
        })
    }

    /// Wheel moved; `delta_y` is `WheelEvent.deltaY` (positive scrolls
    /// down, which zooms out).
    pub fn on_wheel(&self, delta_y: f32) -> bool {
        self.dispatch(InputEvent::Scroll { delta: -delta_y })
    }

    /// Shift key state changed.
    pub fn on_shift(&self, shift: bool) -> bool {
        self.dispatch(InputEvent::ModifiersChanged { shift })
    }

    /// Reset the named view's camera.
    pub fn reset_view(&self, name: &str) -> Result<(), JsValue> {
        self.state
            .borrow_mut()
            .engine
            .pip_mut()
            .reset_pip(name)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Region currently under the cursor.
    #[must_use]
    pub fn hovered_region(&self) -> Option<String> {
        self.state
            .borrow()
            .engine
            .selection()
            .hovered()
            .map(str::to_owned)
    }

    fn dispatch(&self, event: InputEvent) -> bool {
        self.state.borrow_mut().engine.handle_input(event)
    }
}
