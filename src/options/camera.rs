use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Viewport};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Projection and interaction parameters shared by every view.
pub struct CameraOptions {
    /// Perspective strength (`scale = fov / (fov + depth)`).
    #[schemars(title = "Perspective", range(min = 100.0, max = 3000.0), extend("step" = 10.0))]
    pub fov: f32,
    /// Initial distance from the camera to the origin.
    #[schemars(title = "Distance", range(min = 100.0, max = 3000.0), extend("step" = 10.0))]
    pub distance: f32,
    /// Near clipping depth.
    #[schemars(skip)]
    pub near: f32,
    /// Far clipping depth.
    #[schemars(skip)]
    pub far: f32,
    /// Radians of rotation per dragged pixel.
    #[schemars(title = "Rotate Speed", range(min = 0.001, max = 0.05), extend("step" = 0.001))]
    pub rotate_speed: f32,
    /// Pan pixels per dragged pixel.
    #[schemars(title = "Pan Speed", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub pan_speed: f32,
    /// Zoom exponent per wheel unit.
    #[schemars(title = "Zoom Speed", range(min = 0.0001, max = 0.01), extend("step" = 0.0001))]
    pub zoom_speed: f32,
    /// Smallest allowed zoom.
    #[schemars(skip)]
    pub min_zoom: f32,
    /// Largest allowed zoom.
    #[schemars(skip)]
    pub max_zoom: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fov: 600.0,
            distance: 600.0,
            near: 1.0,
            far: 5000.0,
            rotate_speed: 0.01,
            pan_speed: 1.0,
            zoom_speed: 0.001,
            min_zoom: 0.1,
            max_zoom: 5.0,
        }
    }
}

impl CameraOptions {
    /// Fresh camera orbiting the origin at [`distance`](Self::distance).
    #[must_use]
    pub fn initial_camera(&self) -> Camera {
        Camera::orbiting(self.distance, self.fov)
    }

    /// Viewport of the given size using these clip distances.
    #[must_use]
    pub fn viewport(&self, width: f32, height: f32) -> Viewport {
        Viewport::new(width, height, self.near, self.far)
    }

    /// Clamp a zoom factor to `[min_zoom, max_zoom]`.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom.max(self.min_zoom))
    }
}
