//! Chart options with TOML preset support.
//!
//! Every tweakable setting (timing, viewport sizes, bar metrics, number
//! formatting) is consolidated here. Options serialize to/from TOML so
//! presets can be kept next to the data they style.

mod animation;
mod bars;
mod bubble;
mod pie;

use std::path::Path;

pub use animation::AnimationOptions;
pub use bars::BarsOptions;
pub use bubble::BubbleOptions;
pub use pie::PieOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;
use crate::util::format::DecimalFormat;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[pie]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Easing and color seeding.
    pub animation: AnimationOptions,
    /// Bubble chart parameters.
    pub bubble: BubbleOptions,
    /// Pie chart parameters.
    pub pie: PieOptions,
    /// Segmented bar chart parameters.
    pub bars: BarsOptions,
    /// Number formatting for tooltips and tick labels.
    pub format: DecimalFormat,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, ChartError> {
        let content = std::fs::read_to_string(path).map_err(ChartError::Io)?;
        let options = toml::from_str(&content)
            .map_err(|e| ChartError::OptionsParse(e.to_string()))?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), ChartError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ChartError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ChartError::Io)?;
        }
        std::fs::write(path, content).map_err(ChartError::Io)?;
        log::info!("saved options to {}", path.display());
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
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[pie]
inner_spacing = 40.0

[animation]
easing = "linear"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.pie.inner_spacing, 40.0);
        assert_eq!(opts.animation.easing, EasingFunction::Linear);
        // Everything else should be default
        assert_eq!(opts.pie.outer_spacing, 1.0);
        assert_eq!(opts.bubble.width, 500.0);
        assert_eq!(opts.bars.duration_ms, 2500);
        assert_eq!(opts.format.decimal_separator, '.');
    }

    #[test]
    fn save_load_and_list_presets() {
        let dir = std::env::temp_dir()
            .join(format!("motion-charts-presets-{}", std::process::id()));
        let mut opts = Options::default();
        opts.bars.width = 640.0;
        opts.save(&dir.join("narrow.toml")).unwrap();
        std::fs::write(dir.join("notes.txt"), "x").unwrap();
        let loaded = Options::load(&dir.join("narrow.toml")).unwrap();
        assert_eq!(loaded.bars.width, 640.0);
        assert_eq!(Options::list_presets(&dir), vec!["narrow".to_owned()]);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn bad_toml_is_an_options_error() {
        let dir = std::env::temp_dir()
            .join(format!("motion-charts-bad-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "[pie\nwidth = ").unwrap();
        assert!(matches!(
            Options::load(&path),
            Err(ChartError::OptionsParse(_))
        ));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        for section in ["animation", "bubble", "pie", "bars", "format"] {
            assert!(props.contains_key(section), "missing {section}");
        }

        // Exposed fields are present, skipped ones are not
        let bars = &props["bars"]["properties"];
        assert!(bars.get("bar_height").is_some());
        assert!(bars.get("label_char_width").is_none());
        let animation = &props["animation"]["properties"];
        assert!(animation.get("color_seed").is_none());
    }
}
