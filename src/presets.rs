//! Named highlight/gradient presets
//!
//! Provides lookup functions to expand a preset name to explicit endpoint colors.

use crate::colorize::RankedGradient;
use crate::Result;

// =============================================================================
// Gradient Presets
// =============================================================================

/// Endpoint colors and saturation cap for a ranked gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientPreset {
    pub name: &'static str,
    pub highlight: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub saturation_cap: f64,
}

impl GradientPreset {
    pub fn build(&self) -> Result<RankedGradient> {
        RankedGradient::from_css(self.highlight, self.start, self.end)?
            .with_saturation_cap(self.saturation_cap)
    }
}

/// Red highlight over a Category10 blue fading toward white (country MBTI bars)
pub const MBTI: GradientPreset = GradientPreset {
    name: "mbti",
    highlight: "#ff4136",
    start: "#1f77b4",
    end: "#ffffff",
    saturation_cap: 0.9,
};

/// Pure blue fading to a pale lavender, reaching the endpoint (station top-10 bars)
pub const SUBWAY: GradientPreset = GradientPreset {
    name: "subway",
    highlight: "red",
    start: "rgb(0, 0, 255)",
    end: "rgb(230, 230, 255)",
    saturation_cap: 1.0,
};

/// Red highlight over ColorBrewer Blues endpoints
pub const BLUES: GradientPreset = GradientPreset {
    name: "blues",
    highlight: "#e41a1c",
    start: "#08519c",
    end: "#f7fbff",
    saturation_cap: 0.85,
};

pub const GRADIENT_PRESETS: &[GradientPreset] = &[MBTI, SUBWAY, BLUES];

// =============================================================================
// Extremes Presets
// =============================================================================

/// Colors for the max / min / other policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtremesPreset {
    pub max: &'static str,
    pub min: &'static str,
    pub other: &'static str,
}

/// max = red, min = blue, everything else yellow (district message counts)
pub const REGION_EXTREMES: ExtremesPreset = ExtremesPreset {
    max: "red",
    min: "blue",
    other: "yellow",
};

// =============================================================================
// Lookup Functions
// =============================================================================

/// Look up a gradient preset by name (case insensitive).
pub fn get_gradient_preset(name: &str) -> Option<&'static GradientPreset> {
    let name = name.to_lowercase();
    GRADIENT_PRESETS.iter().find(|p| p.name == name)
}

/// The preset used when nothing else is configured.
pub fn default_gradient_preset() -> &'static GradientPreset {
    &MBTI
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_get_gradient_preset() {
        assert!(get_gradient_preset("mbti").is_some());
        assert!(get_gradient_preset("SUBWAY").is_some()); // case insensitive
        assert!(get_gradient_preset("unknown").is_none());
    }

    #[test]
    fn test_all_presets_build() {
        for preset in GRADIENT_PRESETS {
            assert!(preset.build().is_ok(), "preset {} failed", preset.name);
        }
    }

    #[test]
    fn test_default_preset_colors() {
        let gradient = default_gradient_preset().build().unwrap();
        assert_eq!(gradient.highlight(), Rgb::new(255, 65, 54));
        assert_eq!(gradient.start(), Rgb::new(31, 119, 180));
        assert_eq!(gradient.end(), Rgb::new(255, 255, 255));
        assert_eq!(gradient.saturation_cap(), 0.9);
    }

    #[test]
    fn test_region_extremes_parse() {
        for spec in [REGION_EXTREMES.max, REGION_EXTREMES.min, REGION_EXTREMES.other] {
            assert!(Rgb::parse(spec).is_ok());
        }
    }
}
