/*!
# rankhue

Rank-based color assignment for small bar charts and region maps.

Given a labeled numeric series, rankhue picks one highlighted label (the
maximum, or the label matching a predicate) and spreads the rest over a
two-color gradient ordered by rank, not by value magnitude.

## Example

```rust
use rankhue::{assign_colors, HighlightMode, Series};

let series = Series::from_pairs([("A", 10.0), ("B", 5.0), ("C", 5.0)]).unwrap();
let colors = assign_colors(&series, "red", "blue", "white", &HighlightMode::Extremum).unwrap();
assert_eq!(colors.hex("A").as_deref(), Some("#ff0000"));
```

## Architecture

- [`series`] - validated label/value series and ranking
- [`color`] - RGB triples, CSS parsing, interpolation
- [`colorize`] - the highlight + gradient policy
- [`matcher`] - label predicates for predicate-highlight mode
- [`presets`] - endpoint presets used by the bundled pages
- [`reader`] - CSV loading, caching and series extraction
- [`writer`] - chart output (Vega-Lite)
- [`config`] - TOML configuration
*/

pub mod color;
pub mod colorize;
pub mod config;
pub mod matcher;
pub mod presets;
pub mod reader;
pub mod series;
pub mod writer;

pub use color::{ColorFormat, Rgb};
pub use colorize::{
    assign_colors, assign_extremes, ColorAssignment, HighlightMode, RankedGradient,
    DEFAULT_SATURATION_CAP,
};
pub use config::RankhueConfig;
pub use matcher::LabelMatcher;
pub use series::Series;

// Re-export polars types so callers don't need a direct dependency
pub use polars::prelude::DataFrame;

/// Crate version, shown by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum RankhueError {
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    #[error("Invalid color '{spec}': {reason}")]
    InvalidColorSpec { spec: String, reason: String },

    #[error("Invalid saturation cap {0}: expected a value in [0, 1]")]
    InvalidSaturationCap(f64),

    #[error("Reader error: {0}")]
    ReaderError(String),

    #[error("Writer error: {0}")]
    WriterError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Field discovery failed: {0}")]
    FieldDiscovery(String),
}

pub type Result<T> = std::result::Result<T, RankhueError>;

impl From<polars::prelude::PolarsError> for RankhueError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        RankhueError::ReaderError(err.to_string())
    }
}
