use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Corner of the main view an inset is anchored to.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    /// Top-left.
    TopLeft,
    /// Top-right.
    TopRight,
    /// Bottom-left.
    BottomLeft,
    /// Bottom-right.
    BottomRight,
}

/// Picture-in-picture inset layout and behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Insets", inline)]
#[serde(default)]
pub struct PipOptions {
    /// Inset width in pixels.
    #[schemars(title = "Width", range(min = 80.0, max = 600.0), extend("step" = 10.0))]
    pub width: f32,
    /// Inset height in pixels.
    #[schemars(title = "Height", range(min = 60.0, max = 600.0), extend("step" = 10.0))]
    pub height: f32,
    /// Gap between insets and the main view's edges.
    #[schemars(title = "Gap", range(min = 0.0, max = 64.0), extend("step" = 1.0))]
    pub gap: f32,
    /// Corners filled by insets, in registration order.
    #[schemars(skip)]
    pub corners: Vec<Corner>,
    /// Side of the square reset button in each inset's top-right corner.
    #[schemars(skip)]
    pub reset_button_size: f32,
    /// Radians added to an auto-rotating inset's Y rotation per tick.
    #[schemars(title = "Auto-Rotate Speed", range(min = 0.0, max = 0.1), extend("step" = 0.001))]
    pub auto_rotate_speed: f32,
}

impl Default for PipOptions {
    fn default() -> Self {
        Self {
            width: 220.0,
            height: 165.0,
            gap: 12.0,
            corners: vec![
                Corner::TopRight,
                Corner::BottomRight,
                Corner::TopLeft,
                Corner::BottomLeft,
            ],
            reset_button_size: 18.0,
            auto_rotate_speed: 0.01,
        }
    }
}
