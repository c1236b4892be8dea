//! Data loading for rankhue
//!
//! The reader module turns tabular sources into Polars DataFrames and
//! extracts labeled series from them for coloring.
//!
//! # Architecture
//!
//! All readers implement the `Reader` trait, which provides:
//! - Source identifier -> DataFrame loading
//!
//! On top of that:
//! - `CachedReader` memoizes loaded frames per source with manual invalidation
//! - `frame` helpers discover fields, filter rows and build a `Series`
//! - `TokenTally` counts delimited category tokens into a zero-filled `Series`
//!
//! # Example
//!
//! ```rust,ignore
//! use rankhue::reader::{CachedReader, CsvReader, series_from_frame};
//!
//! let mut reader = CachedReader::new(CsvReader::new());
//! let df = reader.load("countries.csv")?;
//! let series = series_from_frame(df, "MBTI", "Value")?;
//! ```

use std::collections::HashMap;

use tracing::debug;

use crate::{DataFrame, Result};

pub mod csv;
pub mod frame;
pub mod tally;

pub use csv::CsvReader;
pub use frame::{discover_field, filter_eq, series_from_frame, series_from_row, sum_columns};
pub use tally::TokenTally;

// ============================================================================
// Reader Trait
// ============================================================================

/// Trait for data source readers
///
/// Readers load a source (usually a file path) and return a Polars DataFrame.
pub trait Reader {
    /// Load `source` into a DataFrame
    ///
    /// # Errors
    ///
    /// Returns `RankhueError::ReaderError` if the source cannot be opened or parsed.
    fn read(&self, source: &str) -> Result<DataFrame>;
}

// ============================================================================
// CachedReader
// ============================================================================

/// Explicit per-source cache around another reader.
///
/// Repeated `load` calls for the same source return the cached frame until
/// `invalidate` or `clear` is called.
pub struct CachedReader<R> {
    inner: R,
    frames: HashMap<String, DataFrame>,
}

impl<R: Reader> CachedReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            frames: HashMap::new(),
        }
    }

    pub fn load(&mut self, source: &str) -> Result<&DataFrame> {
        if self.frames.contains_key(source) {
            debug!(source, "dataset cache hit");
        } else {
            debug!(source, "dataset cache miss");
            let df = self.inner.read(source)?;
            self.frames.insert(source.to_string(), df);
        }
        Ok(&self.frames[source])
    }

    /// Drop one source from the cache. Returns whether it was cached.
    pub fn invalidate(&mut self, source: &str) -> bool {
        self.frames.remove(source).is_some()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }

    pub fn is_cached(&self, source: &str) -> bool {
        self.frames.contains_key(source)
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RankhueError;
    use polars::prelude::*;
    use std::cell::Cell;

    /// Counts how often the wrapped source is actually read
    struct CountingReader {
        reads: Cell<usize>,
    }

    impl Reader for CountingReader {
        fn read(&self, source: &str) -> crate::Result<DataFrame> {
            self.reads.set(self.reads.get() + 1);
            if source == "missing" {
                return Err(RankhueError::ReaderError("no such source".to_string()));
            }
            Ok(df!("label" => ["a", "b"], "value" => [1.0, 2.0])?)
        }
    }

    fn counting() -> CachedReader<CountingReader> {
        CachedReader::new(CountingReader {
            reads: Cell::new(0),
        })
    }

    #[test]
    fn test_cache_hit_skips_read() {
        let mut reader = counting();
        assert_eq!(reader.load("data.csv").unwrap().height(), 2);
        assert_eq!(reader.load("data.csv").unwrap().height(), 2);
        assert_eq!(reader.inner().reads.get(), 1);
        assert!(reader.is_cached("data.csv"));
    }

    #[test]
    fn test_invalidate_forces_reload() {
        let mut reader = counting();
        reader.load("data.csv").unwrap();
        assert!(reader.invalidate("data.csv"));
        assert!(!reader.invalidate("data.csv"));
        reader.load("data.csv").unwrap();
        assert_eq!(reader.inner().reads.get(), 2);
    }

    #[test]
    fn test_sources_are_cached_independently() {
        let mut reader = counting();
        reader.load("a.csv").unwrap();
        reader.load("b.csv").unwrap();
        reader.clear();
        assert!(!reader.is_cached("a.csv"));
        assert!(!reader.is_cached("b.csv"));
    }

    #[test]
    fn test_errors_are_not_cached() {
        let mut reader = counting();
        assert!(reader.load("missing").is_err());
        assert!(!reader.is_cached("missing"));
        assert!(reader.load("missing").is_err());
        assert_eq!(reader.inner().reads.get(), 2);
    }
}
