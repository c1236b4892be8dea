//! Labeled numeric series and rank ordering

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::{RankhueError, Result};

/// A single `(label, value)` pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub label: String,
    pub value: f64,
}

/// Ordered sequence of uniquely labeled, finite values.
///
/// Construction validates the series, so every `Series` is non-empty,
/// has finite values and has no duplicate labels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    entries: Vec<Entry>,
}

impl Series {
    /// Validate and wrap `entries`, keeping their order.
    ///
    /// # Errors
    /// `InvalidSeries` if `entries` is empty, holds a non-finite value, or
    /// repeats a label.
    pub fn new(entries: Vec<Entry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(RankhueError::InvalidSeries(
                "series must contain at least one entry".to_string(),
            ));
        }

        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !entry.value.is_finite() {
                return Err(RankhueError::InvalidSeries(format!(
                    "value for '{}' is not finite ({})",
                    entry.label, entry.value
                )));
            }
            if !seen.insert(entry.label.as_str()) {
                return Err(RankhueError::InvalidSeries(format!(
                    "duplicate label '{}'",
                    entry.label
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Build a series from `(label, value)` pairs.
    ///
    /// # Example
    /// ```
    /// use rankhue::Series;
    ///
    /// let series = Series::from_pairs([("ENFP", 0.2), ("INFJ", 0.5)]).unwrap();
    /// assert_eq!(series.get("INFJ"), Some(0.5));
    /// ```
    pub fn from_pairs<I, L>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, f64)>,
        L: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(label, value)| Entry {
                label: label.into(),
                value,
            })
            .collect();
        Self::new(entries)
    }

    /// Number of entries (at least one)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in input order
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Value for `label`, if present
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.value)
    }

    /// Indices into `entries()` ordered by descending value.
    ///
    /// The sort is stable, so equal values keep their input order.
    pub fn rank_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| descending(self.entries[a].value, self.entries[b].value));
        order
    }

    /// A copy of this series sorted by descending value.
    pub fn ranked(&self) -> Series {
        let entries = self
            .rank_order()
            .into_iter()
            .map(|i| self.entries[i].clone())
            .collect();
        Series { entries }
    }

    /// Keep the `n` highest-ranked entries, in rank order.
    ///
    /// `n = 0` is rejected since the result would be empty.
    pub fn top_n(&self, n: usize) -> Result<Series> {
        if n == 0 {
            return Err(RankhueError::InvalidSeries(
                "top-n requires n >= 1".to_string(),
            ));
        }
        let mut ranked = self.ranked();
        ranked.entries.truncate(n);
        Ok(ranked)
    }
}

fn descending(a: f64, b: f64) -> Ordering {
    // values are finite; -0.0 and 0.0 compare equal
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}
