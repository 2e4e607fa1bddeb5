use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::DepthFog;
use crate::util::easing::EasingFunction;

/// Overlay toggles and fog for the software renderer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Rendering", inline)]
#[serde(default)]
pub struct RenderOptions {
    /// Normalized depth where fog starts.
    #[schemars(title = "Fog Start", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub fog_near: f32,
    /// Normalized depth where fog is complete.
    #[schemars(title = "Fog End", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub fog_far: f32,
    /// Fraction of opacity kept by fully fogged faces.
    #[schemars(title = "Fog Floor", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub fog_floor: f32,
    /// Fog falloff curve.
    #[schemars(title = "Fog Curve")]
    pub fog_curve: EasingFunction,
    /// Skip faces turned away from the viewer.
    #[schemars(title = "Backface Culling")]
    pub backface_cull: bool,
    /// Draw every Nth latitude ring as a wireframe overlay (0 = off).
    #[schemars(title = "Wireframe Every", range(min = 0, max = 16))]
    pub wireframe_every: u32,
    /// Wireframe opacity before fog.
    #[schemars(title = "Wireframe Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub wireframe_alpha: f32,
    /// Draw outlines between regions.
    #[schemars(title = "Region Outlines")]
    pub show_boundaries: bool,
    /// Outline stroke width in pixels.
    #[schemars(title = "Outline Width", range(min = 0.5, max = 6.0), extend("step" = 0.25))]
    pub boundary_width: f32,
    /// Draw region names at their centroids.
    #[schemars(title = "Region Labels")]
    pub show_labels: bool,
    /// Label font size in pixels.
    #[schemars(skip)]
    pub label_size: f32,
    /// Highlight pulse frequency.
    #[schemars(title = "Highlight Pulse (Hz)", range(min = 0.0, max = 4.0), extend("step" = 0.1))]
    pub highlight_pulse_hz: f32,
    /// Frame-rate cap for the animation loop.
    #[schemars(skip)]
    pub target_fps: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fog_near: 0.2,
            fog_far: 0.8,
            fog_floor: 0.25,
            fog_curve: EasingFunction::SmoothStep,
            backface_cull: true,
            wireframe_every: 0,
            wireframe_alpha: 0.25,
            show_boundaries: true,
            boundary_width: 1.5,
            show_labels: false,
            label_size: 12.0,
            highlight_pulse_hz: 1.2,
            target_fps: 60,
        }
    }
}

impl RenderOptions {
    /// Fog parameters for these options.
    #[must_use]
    pub fn depth_fog(&self) -> DepthFog {
        DepthFog {
            near: self.fog_near,
            far: self.fog_far,
            floor: self.fog_floor,
            curve: self.fog_curve,
        }
    }
}
