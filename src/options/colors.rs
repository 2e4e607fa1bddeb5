use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::util::color::Rgba;

/// Palette for the renderer and view chrome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorOptions {
    /// Surface clear color.
    pub background: [f32; 3],
    /// Material for faces without a region.
    pub default_material: [f32; 3],
    /// Region outline color.
    pub boundary: [f32; 3],
    /// Region label color.
    pub label: [f32; 3],
    /// Pulsing highlight color.
    pub highlight: [f32; 3],
    /// Inset background.
    pub inset_background: [f32; 3],
    /// Inset frame and reset-button color.
    pub inset_frame: [f32; 3],
    /// Per-region colors replacing a region table's defaults.
    pub region_overrides: HashMap<String, [f32; 3]>,
}

impl Default for ColorOptions {
    fn default() -> Self {
        Self {
            background: [0.06, 0.07, 0.1],
            default_material: [0.72, 0.72, 0.75],
            boundary: [0.12, 0.1, 0.14],
            label: [0.95, 0.95, 0.95],
            highlight: [1.0, 0.85, 0.3],
            inset_background: [0.1, 0.11, 0.15],
            inset_frame: [0.75, 0.78, 0.85],
            region_overrides: HashMap::new(),
        }
    }
}

impl ColorOptions {
    /// Override color for a region, if one is configured.
    #[must_use]
    pub fn region_color(&self, name: &str) -> Option<Rgba> {
        self.region_overrides.get(name).copied().map(Rgba::from_rgb)
    }
}
