//! Output writers for rankhue
//!
//! Writers turn a colored series into a renderer-specific chart document.
//!
//! # Example
//!
//! ```rust,ignore
//! use rankhue::writer::{BarChart, Writer, VegaLiteWriter};
//!
//! let chart = BarChart::new(colors).with_title("Korea - MBTI");
//! let json = VegaLiteWriter::new().write(&chart)?;
//! ```

use crate::color::ColorFormat;
use crate::colorize::ColorAssignment;
use crate::Result;

#[cfg(feature = "vegalite")]
pub mod vegalite;

#[cfg(feature = "vegalite")]
pub use vegalite::VegaLiteWriter;

/// A bar chart: one bar per assigned label, in rank order unless
/// `input_order` is set
#[derive(Debug, Clone)]
pub struct BarChart {
    pub colors: ColorAssignment,
    pub title: Option<String>,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub format: ColorFormat,
    /// Print each value above its bar
    pub show_values: bool,
    /// Lay bars out in input series order instead of by rank
    pub input_order: bool,
}

impl BarChart {
    pub fn new(colors: ColorAssignment) -> Self {
        Self {
            colors,
            title: None,
            x_title: None,
            y_title: None,
            format: ColorFormat::Hex,
            show_values: true,
            input_order: false,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_axis_titles(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x_title = Some(x.into());
        self.y_title = Some(y.into());
        self
    }

    pub fn with_format(mut self, format: ColorFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_values(mut self, show: bool) -> Self {
        self.show_values = show;
        self
    }

    /// Keep the input order on the x axis. Colors still follow rank.
    pub fn with_input_order(mut self, keep: bool) -> Self {
        self.input_order = keep;
        self
    }

    /// Bar labels in display order
    pub fn bar_order(&self) -> Vec<String> {
        if self.input_order {
            self.colors.input_order()
        } else {
            self.colors.domain()
        }
    }
}

/// Trait for chart writers
pub trait Writer {
    /// Output type produced by this writer
    type Output;

    /// Render a chart
    ///
    /// # Errors
    ///
    /// Returns `RankhueError::WriterError` if the chart cannot be rendered.
    fn write(&self, chart: &BarChart) -> Result<Self::Output>;
}
