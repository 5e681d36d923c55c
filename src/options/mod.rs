//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera, tour, display, key bindings) are
//! consolidated here. Options serialize to/from TOML so an exhibit can ship
//! a preset next to its asset.

mod camera;
mod display;
mod keybindings;
mod tour;

use std::path::Path;

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use tour::TourOptions;

use crate::error::VitrineError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[tour]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Annotation focus and tour parameters.
    pub tour: TourOptions,
    /// Marker, measurement and model presentation.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
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
    /// Returns [`VitrineError::Io`] if the file cannot be read and
    /// [`VitrineError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        let content = std::fs::read_to_string(path).map_err(VitrineError::Io)?;
        toml::from_str(&content)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem write fails.
    pub fn save(&self, path: &Path) -> Result<(), VitrineError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| VitrineError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(VitrineError::Io)?;
        }
        std::fs::write(path, content).map_err(VitrineError::Io)
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
    use crate::input::KeyAction;

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
[tour]
flight_duration_ms = 250
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.tour.flight_duration_ms, 250);
        assert_eq!(opts.tour.focus_offset, [2.0, 2.0, 2.0]);
        assert_eq!(opts.display.measurement_precision, 3);
    }

    #[test]
    fn keybinding_lookup() {
        let opts = Options::default();
        assert_eq!(
            opts.keybindings.lookup("ArrowRight"),
            Some(KeyAction::TourNext)
        );
        assert_eq!(opts.keybindings.lookup("Escape"), Some(KeyAction::Cancel));
        assert_eq!(opts.keybindings.lookup("KeyZ"), None);
    }

    #[test]
    fn keybinding_override_from_toml_keeps_reverse_map() {
        let toml_str = r#"
[keybindings.bindings]
take_screenshot = "KeyS"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(
            opts.keybindings.lookup("KeyS"),
            Some(KeyAction::TakeScreenshot)
        );
        assert_eq!(opts.keybindings.lookup("KeyP"), None);
        assert_eq!(
            opts.keybindings.lookup("KeyR"),
            Some(KeyAction::ToggleAutoRotate)
        );
    }

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!(
            "vitrine-options-{name}-{}",
            std::process::id()
        ))
    }

    #[test]
    fn save_then_load_keeps_edits() {
        let dir = scratch_dir("save");
        let path = dir.join("nested").join("gallery.toml");
        let mut opts = Options::default();
        opts.tour.flight_duration_ms = 400;
        opts.display.measurement_precision = 1;
        opts.keybindings.bind(KeyAction::TakeScreenshot, "KeyS");

        opts.save(&path).unwrap();
        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(
            loaded.keybindings.lookup("KeyS"),
            Some(KeyAction::TakeScreenshot)
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn presets_are_sorted_toml_stems() {
        let dir = scratch_dir("presets");
        Options::default().save(&dir.join("night.toml")).unwrap();
        Options::default().save(&dir.join("gallery.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "not a preset").unwrap();

        assert_eq!(Options::list_presets(&dir), ["gallery", "night"]);
        assert!(Options::list_presets(&dir.join("missing")).is_empty());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn distance_formatting_uses_precision() {
        let display = DisplayOptions::default();
        assert_eq!(display.format_distance(5.0), "5.000");
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("camera"));
        assert!(props.contains_key("tour"));
        assert!(props.contains_key("display"));
        assert!(!props.contains_key("keybindings"));

        let display = &props["display"]["properties"];
        assert!(display.get("marker_radius").is_some());
        assert!(display.get("background_color").is_none());
    }
}
