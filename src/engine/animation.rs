//! Cancellable per-frame loop driving an [`Engine`].

use std::cell::Cell;
use std::rc::Rc;

use super::{Engine, ViewFrame};
use crate::render::DrawSurface;
use crate::util::frame_timing::FrameTiming;

/// Identifies one run of an [`AnimationLoop`], from a `start` to the next
/// `stop`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken(u64);

/// Shared stop switch for an [`AnimationLoop`].
///
/// A host callback takes a [`RunToken`] when its chain is scheduled and
/// checks [`is_current`](Self::is_current) before scheduling the next frame,
/// so a chain left over from an earlier run ends even if the loop has been
/// restarted in the meantime.
#[derive(Debug, Clone, Default)]
pub struct LoopHandle {
    running: Rc<Cell<bool>>,
    epoch: Rc<Cell<u64>>,
}

impl LoopHandle {
    /// Whether the loop is in a run.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Stop scheduling frames. Safe to call repeatedly.
    pub fn stop(&self) {
        self.running.set(false);
    }

    /// Token for the current run.
    #[must_use]
    pub fn token(&self) -> RunToken {
        RunToken(self.epoch.get())
    }

    /// Whether `token` belongs to the run in progress.
    #[must_use]
    pub fn is_current(&self, token: RunToken) -> bool {
        self.is_running() && self.epoch.get() == token.0
    }

    fn begin_run(&self) {
        self.epoch.set(self.epoch.get().wrapping_add(1));
        self.running.set(true);
    }
}

/// Frame loop with explicit start/stop, frame limiting, and timing.
#[derive(Debug)]
pub struct AnimationLoop {
    handle: LoopHandle,
    timing: FrameTiming,
    frames: u64,
}

impl AnimationLoop {
    /// Stopped loop capped at `target_fps` (0 = unlimited).
    #[must_use]
    pub fn new(target_fps: u32) -> Self {
        Self {
            handle: LoopHandle::default(),
            timing: FrameTiming::new(target_fps),
            frames: 0,
        }
    }

    /// A handle sharing this loop's stop switch.
    #[must_use]
    pub fn handle(&self) -> LoopHandle {
        self.handle.clone()
    }

    /// Start running. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        if self.handle.is_running() {
            return false;
        }
        self.handle.begin_run();
        log::debug!("animation loop started");
        true
    }

    /// Stop running. Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.handle.is_running() {
            return false;
        }
        self.handle.stop();
        log::debug!("animation loop stopped after {} frames", self.frames);
        true
    }

    /// Whether the loop is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.is_running()
    }

    /// Frames rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.timing.fps()
    }

    /// Run one frame if the loop is running and the frame budget allows:
    /// advance auto-rotation, then render every view.
    ///
    /// Input handled before this call is fully applied to the frame.
    pub fn tick<S: DrawSurface + ?Sized>(
        &mut self,
        engine: &mut Engine,
        surface: &mut S,
    ) -> Option<Vec<ViewFrame>> {
        if !self.is_running() || !self.timing.should_render() {
            return None;
        }
        let _ = engine.update();
        let frames = engine.render_frame(surface, self.timing.elapsed());
        let _ = self.timing.end_frame();
        self.frames += 1;
        Some(frames)
    }
}
