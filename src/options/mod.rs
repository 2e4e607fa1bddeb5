//! Centralized renderer and interaction options with TOML preset support.
//!
//! Lighting, camera, rendering, inset layout, and colors are consolidated
//! here. Options serialize to/from TOML so visualizations can ship presets.

mod camera;
mod colors;
mod lighting;
mod pip;
mod render;

use std::path::Path;

pub use camera::CameraOptions;
pub use colors::ColorOptions;
pub use lighting::LightingOptions;
pub use pip::{Corner, PipOptions};
pub use render::RenderOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SomaError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[lighting]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Lighting parameters.
    pub lighting: LightingOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Fog and overlay toggles.
    pub render: RenderOptions,
    /// Inset layout and auto-rotation.
    pub pip: PipOptions,
    /// Color palette options.
    #[schemars(skip)]
    pub colors: ColorOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(text: &str) -> Result<Self, SomaError> {
        toml::from_str(text).map_err(|e| SomaError::OptionsParse(e.to_string()))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml(&self) -> Result<String, SomaError> {
        toml::to_string_pretty(self)
            .map_err(|e| SomaError::OptionsParse(e.to_string()))
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, SomaError> {
        let content = std::fs::read_to_string(path).map_err(SomaError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("loaded options preset {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), SomaError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(SomaError::Io)?;
        }
        std::fs::write(path, content).map_err(SomaError::Io)?;
        log::info!("saved options preset {}", path.display());
        Ok(())
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = opts.to_toml().unwrap();
        let parsed = Options::from_toml(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[lighting]
shininess = 40.0

[render]
fog_curve = "linear"

[colors.region_overrides]
frontal = [1.0, 0.0, 0.0]
"#;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.lighting.shininess, 40.0);
        // Everything else should be default
        assert_eq!(opts.lighting.ambient, 0.35);
        assert_eq!(opts.camera.max_zoom, 5.0);
        assert_eq!(opts.render.fog_curve, crate::util::easing::EasingFunction::Linear);
        assert_eq!(
            opts.colors.region_color("frontal"),
            Some(crate::util::color::Rgba::new(1.0, 0.0, 0.0, 1.0))
        );
        assert_eq!(opts.colors.region_color("parietal"), None);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        assert!(matches!(
            Options::from_toml("[camera]\nfov = \"wide\""),
            Err(SomaError::OptionsParse(_))
        ));
    }

    #[test]
    fn zoom_clamp_uses_configured_bounds() {
        let camera = CameraOptions::default();
        assert_eq!(camera.clamp_zoom(0.01), 0.1);
        assert_eq!(camera.clamp_zoom(9.0), 5.0);
        assert_eq!(camera.clamp_zoom(1.5), 1.5);
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("somaview-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.render.show_labels = true;
        opts.save(&dir.join("labels.toml")).unwrap();
        Options::default().save(&dir.join("default.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        assert_eq!(Options::list_presets(&dir), ["default", "labels"]);
        let loaded = Options::load(&dir.join("labels.toml")).unwrap();
        assert!(loaded.render.show_labels);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let missing = std::env::temp_dir().join("somaview-no-such-preset.toml");
        assert!(matches!(Options::load(&missing), Err(SomaError::Io(_))));
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("lighting"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("render"));
        assert!(props.contains_key("pip"));
        assert!(!props.contains_key("colors"));

        let lighting = &props["lighting"]["properties"];
        assert!(lighting.get("ambient").is_some());
        assert!(lighting.get("light_dir").is_none());
        let camera = &props["camera"]["properties"];
        assert!(camera.get("rotate_speed").is_some());
        assert!(camera.get("near").is_none());
    }
}
