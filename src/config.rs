//! TOML configuration for gradient colors and output format
//!
//! ```toml
//! [gradient]
//! preset = "subway"        # optional, fills unset keys below
//! highlight = "#ff4136"
//! start = "#1f77b4"
//! end = "#ffffff"
//! saturation_cap = 0.9
//!
//! [output]
//! format = "rgb"
//! ```
//!
//! Every key is optional. Unset keys fall back to the preset, then to the
//! built-in default preset.

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::color::ColorFormat;
use crate::colorize::RankedGradient;
use crate::presets::{default_gradient_preset, get_gradient_preset, GradientPreset};
use crate::{RankhueError, Result};

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RankhueConfig {
    pub gradient: GradientConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct GradientConfig {
    pub preset: Option<String>,
    pub highlight: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub saturation_cap: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: ColorFormat,
}

impl RankhueConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml_edit::de::from_str(source)
            .map_err(|e| RankhueError::ConfigError(format!("Invalid configuration: {}", e)))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            RankhueError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&source)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    fn preset(&self) -> Result<&'static GradientPreset> {
        match &self.gradient.preset {
            Some(name) => get_gradient_preset(name).ok_or_else(|| {
                RankhueError::ConfigError(format!("Unknown gradient preset '{}'", name))
            }),
            None => Ok(default_gradient_preset()),
        }
    }

    /// Resolve the configured colors into a validated gradient.
    pub fn gradient(&self) -> Result<RankedGradient> {
        let preset = self.preset()?;
        let g = &self.gradient;
        RankedGradient::from_css(
            g.highlight.as_deref().unwrap_or(preset.highlight),
            g.start.as_deref().unwrap_or(preset.start),
            g.end.as_deref().unwrap_or(preset.end),
        )?
        .with_saturation_cap(g.saturation_cap.unwrap_or(preset.saturation_cap))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_default_preset() {
        let config = RankhueConfig::from_toml_str("").unwrap();
        assert_eq!(config, RankhueConfig::default());
        let gradient = config.gradient().unwrap();
        assert_eq!(gradient, default_gradient_preset().build().unwrap());
        assert_eq!(config.output.format, ColorFormat::Hex);
    }

    #[test]
    fn test_overrides_and_format() {
        let config = RankhueConfig::from_toml_str(
            r#"
            [gradient]
            highlight = "crimson"
            saturation_cap = 0.8

            [output]
            format = "rgb"
            "#,
        )
        .unwrap();
        let gradient = config.gradient().unwrap();
        assert_eq!(gradient.highlight(), Rgb::new(220, 20, 60));
        assert_eq!(gradient.start(), Rgb::new(31, 119, 180));
        assert_eq!(gradient.saturation_cap(), 0.8);
        assert_eq!(config.output.format, ColorFormat::Rgb);
    }

    #[test]
    fn test_preset_fills_unset_keys() {
        let config = RankhueConfig::from_toml_str(
            r#"
            [gradient]
            preset = "subway"
            end = "white"
            "#,
        )
        .unwrap();
        let gradient = config.gradient().unwrap();
        assert_eq!(gradient.start(), Rgb::new(0, 0, 255));
        assert_eq!(gradient.end(), Rgb::new(255, 255, 255));
        assert_eq!(gradient.saturation_cap(), 1.0);
    }

    #[test]
    fn test_unknown_preset() {
        let config = RankhueConfig::from_toml_str("[gradient]\npreset = \"nope\"\n").unwrap();
        assert!(matches!(config.gradient(), Err(RankhueError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_values_are_reported() {
        assert!(RankhueConfig::from_toml_str("[output]\nformat = \"cmyk\"\n").is_err());
        assert!(RankhueConfig::from_toml_str("[gradient]\nshade = 1\n").is_err());

        let config = RankhueConfig::from_toml_str("[gradient]\nstart = \"bluish\"\n").unwrap();
        assert!(matches!(
            config.gradient(),
            Err(RankhueError::InvalidColorSpec { .. })
        ));

        let config = RankhueConfig::from_toml_str("[gradient]\nsaturation_cap = 2.0\n").unwrap();
        assert!(matches!(
            config.gradient(),
            Err(RankhueError::InvalidSaturationCap(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[gradient]\nstart = \"navy\"").unwrap();
        let config = RankhueConfig::from_file(file.path()).unwrap();
        assert_eq!(config.gradient().unwrap().start(), Rgb::new(0, 0, 128));

        let missing = RankhueConfig::from_file(Path::new("/nonexistent/rankhue.toml"));
        assert!(matches!(missing, Err(RankhueError::ConfigError(_))));
    }
}
