//! Centralized engine options with TOML preset support.
//!
//! All tweakable settings (formation geometry, animation rates, gesture
//! thresholds, gallery layout, camera limits, effect timings, themes) are
//! consolidated here. Options serialize to/from TOML for presets.

mod animation;
mod camera;
mod effects;
mod formation;
mod gallery;
mod gesture;
mod theme;

use std::path::Path;

pub use animation::AnimationOptions;
pub use camera::CameraOptions;
pub use effects::EffectsOptions;
pub use formation::FormationOptions;
pub use gallery::GalleryOptions;
pub use gesture::GestureOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use theme::{ThemeConfig, ThemeOptions};

use crate::error::GroveError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[gesture]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Entity counts and layout geometry.
    pub formation: FormationOptions,
    /// Damping and blend rates.
    pub animation: AnimationOptions,
    /// Gesture pipeline thresholds.
    pub gesture: GestureOptions,
    /// Photo gallery ring layout.
    pub gallery: GalleryOptions,
    /// Orbit camera parameters.
    pub camera: CameraOptions,
    /// One-shot effect timings.
    pub effects: EffectsOptions,
    /// Theme cycle.
    #[schemars(skip)]
    pub themes: ThemeOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GroveError::Io`] if the file cannot be read and
    /// [`GroveError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, GroveError> {
        let content = std::fs::read_to_string(path).map_err(GroveError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`GroveError::OptionsParse`] on malformed input.
    pub fn from_toml(content: &str) -> Result<Self, GroveError> {
        toml::from_str(content)
            .map_err(|e| GroveError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`GroveError`] if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<(), GroveError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| GroveError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(GroveError::Io)?;
        }
        std::fs::write(path, content).map_err(GroveError::Io)
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
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[gesture]
gallery_cooldown_ms = 1500
debug_status = true
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.gesture.gallery_cooldown_ms, 1500);
        assert!(opts.gesture.debug_status);
        // Everything else should be default
        assert_eq!(opts.gesture.inference_interval_ms, 100);
        assert_eq!(opts.gesture.min_confidence, 0.5);
        assert_eq!(opts.formation.foliage_count, 3500);
        assert_eq!(opts.themes.len(), 3);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[gesture]\nmin_confidence = \"high\"")
            .unwrap_err();
        assert!(matches!(err, GroveError::OptionsParse(_)));
    }

    #[test]
    fn theme_table_wraps() {
        let themes = ThemeOptions::default();
        assert_eq!(themes.get(0).name, "Classic");
        assert_eq!(themes.get(1).name, "Frozen");
        assert_eq!(themes.get(2).name, "Cyber");
        assert_eq!(themes.get(3).name, "Classic");

        let empty = ThemeOptions { themes: Vec::new() };
        assert_eq!(empty.len(), 1);
        assert_eq!(empty.get(5).name, "Classic");
    }

    #[test]
    fn save_then_load_and_list() {
        let dir = std::env::temp_dir()
            .join(format!("grove-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.formation.seed = Some(7);
        opts.save(&dir.join("calm.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let loaded = Options::load(&dir.join("calm.toml")).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(Options::list_presets(&dir), vec!["calm".to_owned()]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("formation"));
        assert!(props.contains_key("animation"));
        assert!(props.contains_key("gesture"));
        assert!(props.contains_key("gallery"));
        assert!(props.contains_key("camera"));
        assert!(props.contains_key("effects"));

        // Skipped sections should be absent
        assert!(!props.contains_key("themes"));

        let gesture = &props["gesture"]["properties"];
        assert!(gesture.get("gallery_cooldown_ms").is_some());
        assert!(gesture.get("max_hands").is_none());
    }
}
