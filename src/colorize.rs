//! Rank-based highlight and gradient color assignment
//!
//! One label is drawn in a fixed highlight color; every other label gets a
//! color interpolated between two endpoints according to its rank among the
//! non-highlighted labels. Colors depend on rank position only, so equal
//! values still receive distinct colors.
//!
//! # Modes
//!
//! - `extremum-highlight`: the maximum value is highlighted (first occurrence on ties)
//! - `predicate-highlight`: the first label matching a [`LabelMatcher`] is
//!   highlighted, regardless of its value
//!
//! # Example
//!
//! ```rust
//! use rankhue::{HighlightMode, LabelMatcher, RankedGradient, Series};
//!
//! let gradient = RankedGradient::from_css("red", "blue", "white").unwrap();
//! let series = Series::from_pairs([("Korea", 3.0), ("Japan", 9.0), ("China", 1.0)]).unwrap();
//!
//! let mode = HighlightMode::Predicate(LabelMatcher::exact("Korea"));
//! let colors = gradient.assign(&series, &mode).unwrap();
//! assert_eq!(colors.hex("Korea").as_deref(), Some("#ff0000"));
//! assert_eq!(colors.hex("Japan").as_deref(), Some("#0000ff"));
//! ```

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use crate::color::{ColorFormat, Rgb};
use crate::matcher::LabelMatcher;
use crate::series::Series;
use crate::{RankhueError, Result};

/// Largest interpolation fraction used unless configured otherwise.
/// Keeps the weakest bar visibly tinted instead of pure `end`.
pub const DEFAULT_SATURATION_CAP: f64 = 0.9;

// =============================================================================
// Highlight Mode
// =============================================================================

/// How the highlighted label is selected
#[derive(Debug, Clone, Default)]
pub enum HighlightMode {
    /// Highest value wins, ties go to the first occurrence
    #[default]
    Extremum,
    /// First label in input order that satisfies the matcher
    Predicate(LabelMatcher),
}

impl HighlightMode {
    /// Mode name as used in logs and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            HighlightMode::Extremum => "extremum-highlight",
            HighlightMode::Predicate(_) => "predicate-highlight",
        }
    }

    /// Index into `series.entries()` of the highlighted label, if any.
    fn select(&self, series: &Series, rank_order: &[usize]) -> Option<usize> {
        match self {
            HighlightMode::Extremum => rank_order.first().copied(),
            HighlightMode::Predicate(matcher) => series
                .entries()
                .iter()
                .position(|e| matcher.matches(&e.label)),
        }
    }
}

impl fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HighlightMode::Extremum => write!(f, "{}", self.name()),
            HighlightMode::Predicate(m) => write!(f, "{}({})", self.name(), m),
        }
    }
}

// =============================================================================
// Ranked Gradient
// =============================================================================

/// Highlight color, gradient endpoints and saturation cap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedGradient {
    highlight: Rgb,
    start: Rgb,
    end: Rgb,
    saturation_cap: f64,
}

impl RankedGradient {
    /// Create a gradient with the default saturation cap.
    ///
    /// # Arguments
    /// * `highlight` - Color of the highlighted label
    /// * `start` - Color of the highest-ranked non-highlighted label
    /// * `end` - Color approached by the lowest ranks
    pub fn new(highlight: Rgb, start: Rgb, end: Rgb) -> Self {
        Self {
            highlight,
            start,
            end,
            saturation_cap: DEFAULT_SATURATION_CAP,
        }
    }

    /// Build from CSS color strings (named, hex, `rgb()`, ...).
    pub fn from_css(highlight: &str, start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(
            Rgb::parse(highlight)?,
            Rgb::parse(start)?,
            Rgb::parse(end)?,
        ))
    }

    /// Set the largest interpolation fraction. `1.0` lets the last rank reach `end`.
    pub fn with_saturation_cap(mut self, cap: f64) -> Result<Self> {
        if !cap.is_finite() || !(0.0..=1.0).contains(&cap) {
            return Err(RankhueError::InvalidSaturationCap(cap));
        }
        self.saturation_cap = cap;
        Ok(self)
    }

    /// Color given to the highlighted label
    pub fn highlight(&self) -> Rgb {
        self.highlight
    }

    /// Gradient color at `t = 0`
    pub fn start(&self) -> Rgb {
        self.start
    }

    /// Gradient color at `t = 1`
    pub fn end(&self) -> Rgb {
        self.end
    }

    pub fn saturation_cap(&self) -> f64 {
        self.saturation_cap
    }

    /// Interpolation fraction for `rank` (0-based) among `others` gradient entries.
    ///
    /// `t = rank / max(1, others - 1) * cap`, so the first entry sits on
    /// `start` and the last on `cap`.
    pub fn fraction(&self, rank: usize, others: usize) -> f64 {
        let divisor = others.saturating_sub(1).max(1);
        rank as f64 / divisor as f64 * self.saturation_cap
    }

    /// Color for `rank` (0-based) among `others` gradient entries.
    ///
    /// While `t < 1` the result never equals `end`: when rounding lands on
    /// `end`, the channel farthest from `start` steps one unit back.
    ///
    /// # Example
    /// ```
    /// use rankhue::{RankedGradient, Rgb};
    ///
    /// let g = RankedGradient::from_css("red", "#fafafa", "#ffffff").unwrap();
    /// assert_eq!(g.gradient_color(1, 2), Rgb::new(254, 255, 255));
    /// ```
    pub fn gradient_color(&self, rank: usize, others: usize) -> Rgb {
        let t = self.fraction(rank, others);
        let color = self.start.lerp(&self.end, t);
        if t < 1.0 && color == self.end && self.start != self.end {
            step_toward(color, self.start)
        } else {
            color
        }
    }

    /// Assign a color to every label of `series`.
    pub fn assign(&self, series: &Series, mode: &HighlightMode) -> Result<ColorAssignment> {
        let order = series.rank_order();
        let highlighted = mode.select(series, &order);

        match highlighted {
            Some(idx) => debug!(
                mode = mode.name(),
                label = %series.entries()[idx].label,
                "selected highlight"
            ),
            None => warn!(mode = %mode, "no label matched; coloring all labels by gradient"),
        }

        let others = series.len() - usize::from(highlighted.is_some());
        let mut gradient_rank = 0;
        let entries = order
            .iter()
            .map(|&idx| {
                let entry = &series.entries()[idx];
                let is_highlight = highlighted == Some(idx);
                let color = if is_highlight {
                    self.highlight
                } else {
                    let c = self.gradient_color(gradient_rank, others);
                    gradient_rank += 1;
                    c
                };
                AssignedColor {
                    label: entry.label.clone(),
                    value: entry.value,
                    index: idx,
                    color,
                    highlighted: is_highlight,
                }
            })
            .collect();

        debug!(labels = series.len(), others, "assigned ranked gradient");
        Ok(ColorAssignment { entries })
    }
}

/// Move the channel with the widest `target` distance one unit toward `target`.
///
/// Narrower channels reach `end` at lower ranks than the widest one, so only
/// the widest moves. Ties go to the first channel.
fn step_toward(color: Rgb, target: Rgb) -> Rgb {
    let mut channels = color.channels();
    let targets = target.channels();
    let widest = (0..3)
        .max_by_key(|&i| (channels[i].abs_diff(targets[i]), std::cmp::Reverse(i)))
        .unwrap_or(0);
    let (c, t) = (channels[widest], targets[widest]);
    channels[widest] = if c > t { c - 1 } else if c < t { c + 1 } else { c };
    Rgb::from(channels)
}

impl Default for RankedGradient {
    fn default() -> Self {
        // #ff4136 / #1f77b4 / white
        Self::new(
            Rgb::new(0xff, 0x41, 0x36),
            Rgb::new(0x1f, 0x77, 0xb4),
            Rgb::new(0xff, 0xff, 0xff),
        )
    }
}

/// Convenience wrapper: parse CSS colors and assign in one call.
pub fn assign_colors(
    series: &Series,
    highlight_color: &str,
    gradient_start: &str,
    gradient_end: &str,
    mode: &HighlightMode,
) -> Result<ColorAssignment> {
    RankedGradient::from_css(highlight_color, gradient_start, gradient_end)?.assign(series, mode)
}

/// Three-color policy: first maximum, first minimum, everything else.
///
/// A single-entry series (or one where the minimum is the maximum entry)
/// only gets the max color.
pub fn assign_extremes(series: &Series, max: Rgb, min: Rgb, other: Rgb) -> ColorAssignment {
    let order = series.rank_order();
    let max_idx = order[0];
    let min_idx = series
        .entries()
        .iter()
        .enumerate()
        .fold(0, |best, (i, e)| {
            if e.value < series.entries()[best].value {
                i
            } else {
                best
            }
        });

    let entries = order
        .iter()
        .map(|&idx| {
            let entry = &series.entries()[idx];
            let color = if idx == max_idx {
                max
            } else if idx == min_idx {
                min
            } else {
                other
            };
            AssignedColor {
                label: entry.label.clone(),
                value: entry.value,
                index: idx,
                color,
                highlighted: idx == max_idx,
            }
        })
        .collect();

    ColorAssignment { entries }
}

// =============================================================================
// Color Assignment
// =============================================================================

/// One label with its assigned color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssignedColor {
    pub label: String,
    pub value: f64,
    /// Position of the label in the input series
    pub index: usize,
    pub color: Rgb,
    pub highlighted: bool,
}

/// Label -> color mapping, stored in rank order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorAssignment {
    entries: Vec<AssignedColor>,
}

impl ColorAssignment {
    /// Number of assigned labels, equal to the input series length
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in rank order
    pub fn entries(&self) -> &[AssignedColor] {
        &self.entries
    }

    /// Color assigned to `label`
    pub fn get(&self, label: &str) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.color)
    }

    pub fn hex(&self, label: &str) -> Option<String> {
        self.get(label).map(|c| c.to_hex())
    }

    pub fn highlighted(&self) -> Option<&AssignedColor> {
        self.entries.iter().find(|e| e.highlighted)
    }

    /// Labels in rank order
    pub fn domain(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.label.clone()).collect()
    }

    /// Labels in the order of the input series
    pub fn input_order(&self) -> Vec<String> {
        let mut entries: Vec<&AssignedColor> = self.entries.iter().collect();
        entries.sort_by_key(|e| e.index);
        entries.into_iter().map(|e| e.label.clone()).collect()
    }

    /// Colors in rank order, formatted for a renderer
    pub fn range(&self, format: ColorFormat) -> Vec<String> {
        self.entries.iter().map(|e| e.color.format(format)).collect()
    }

    /// `(label, color)` pairs in rank order
    pub fn formatted(&self, format: ColorFormat) -> Vec<(String, String)> {
        self.entries
            .iter()
            .map(|e| (e.label.clone(), e.color.format(format)))
            .collect()
    }
}
