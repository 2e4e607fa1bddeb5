use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-face lighting terms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
pub struct LightingOptions {
    /// Constant light applied to every face.
    #[schemars(title = "Ambient", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub ambient: f32,
    /// Lambert weight.
    #[schemars(title = "Diffuse", range(min = 0.0, max = 1.5), extend("step" = 0.01))]
    pub diffuse: f32,
    /// Highlight weight.
    #[schemars(title = "Specular", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub specular: f32,
    /// Highlight exponent.
    #[schemars(title = "Shininess", range(min = 1.0, max = 128.0), extend("step" = 1.0))]
    pub shininess: f32,
    /// World-space direction toward the light (normalized at use).
    #[schemars(skip)]
    pub light_dir: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: 0.35,
            diffuse: 0.65,
            specular: 0.25,
            shininess: 16.0,
            light_dir: [0.4, -0.6, -0.7],
        }
    }
}
