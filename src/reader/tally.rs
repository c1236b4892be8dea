//! Category counts from delimited text columns
//!
//! Each row of a text column holds one or more category names separated by
//! a delimiter (for example `"해운대구, 수영구"`). Tokens are normalized,
//! matched against a fixed category list (or an alias), counted, and
//! returned as a zero-filled series in category order.

use std::collections::HashMap;

use polars::prelude::DataType;
use tracing::debug;

use crate::series::Series;
use crate::{DataFrame, RankhueError, Result};

/// Busan's sixteen districts and counties
pub const BUSAN_DISTRICTS: &[&str] = &[
    "중구", "서구", "동구", "영도구", "부산진구", "동래구", "남구", "북구",
    "해운대구", "사하구", "금정구", "강서구", "연제구", "수영구", "사상구", "기장군",
];

/// Counts delimited category tokens per category
#[derive(Debug, Clone)]
pub struct TokenTally {
    categories: Vec<String>,
    delimiter: char,
    strip: Vec<String>,
    aliases: HashMap<String, String>,
}

impl TokenTally {
    pub fn new<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            delimiter: ',',
            strip: Vec::new(),
            aliases: HashMap::new(),
        }
    }

    /// District tally for Busan emergency text messages
    pub fn busan_districts() -> Self {
        Self::new(BUSAN_DISTRICTS.iter().copied())
            .with_strip("부산광역시")
            .with_alias("기장", "기장군")
    }

    /// Split cells on `delimiter` instead of `,`.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Remove `text` from every token before matching.
    pub fn with_strip(mut self, text: impl Into<String>) -> Self {
        self.strip.push(text.into());
        self
    }

    /// Count `alias` tokens as `category`.
    pub fn with_alias(mut self, alias: impl Into<String>, category: impl Into<String>) -> Self {
        self.aliases.insert(alias.into(), category.into());
        self
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Drop all whitespace (including U+3000) and the configured strip texts.
    pub fn normalize(&self, token: &str) -> String {
        let mut s: String = token.chars().filter(|c| !c.is_whitespace()).collect();
        for strip in &self.strip {
            s = s.replace(strip.as_str(), "");
        }
        s
    }

    /// The category a token counts toward, if any.
    pub fn classify(&self, token: &str) -> Option<&str> {
        let normalized = self.normalize(token);
        if normalized.is_empty() {
            return None;
        }
        if let Some(category) = self.categories.iter().find(|c| **c == normalized) {
            return Some(category.as_str());
        }
        self.aliases.get(&normalized).map(|c| c.as_str())
    }

    /// Count classified tokens in raw cells.
    ///
    /// Returns the per-category counts and the number of non-empty tokens
    /// that matched nothing. Tokens left empty after normalization are not
    /// counted as ignored.
    fn count_tokens<'a, I>(&self, cells: I) -> (HashMap<&str, usize>, usize)
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut ignored = 0usize;

        for cell in cells.into_iter().flatten() {
            for token in cell.split(self.delimiter) {
                if self.normalize(token).is_empty() {
                    continue;
                }
                match self.classify(token) {
                    Some(category) => *counts.entry(category).or_insert(0) += 1,
                    None => ignored += 1,
                }
            }
        }
        (counts, ignored)
    }

    /// Tally raw cell values. `None` cells are skipped.
    pub fn tally<'a, I>(&self, cells: I) -> Result<Series>
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let (counts, ignored) = self.count_tokens(cells);
        debug!(categories = self.categories.len(), ignored, "tallied tokens");

        // Aliases may point outside the category list; those are dropped here
        Series::from_pairs(self.categories.iter().map(|c| {
            let n = counts.get(c.as_str()).copied().unwrap_or(0);
            (c.clone(), n as f64)
        }))
    }

    pub fn tally_column(&self, df: &DataFrame, column: &str) -> Result<Series> {
        let col = df.column(column).map_err(|_| {
            RankhueError::ReaderError(format!("Column '{}' not found", column))
        })?;
        let values = col.as_materialized_series().cast(&DataType::String)?;
        let ca = values.str()?;
        self.tally(ca.into_iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    #[test]
    fn test_normalize() {
        let tally = TokenTally::busan_districts();
        assert_eq!(tally.normalize(" 부산광역시 해운대구 "), "해운대구");
        assert_eq!(tally.normalize("수영\u{3000}구"), "수영구");
    }

    #[test]
    fn test_classify() {
        let tally = TokenTally::busan_districts();
        assert_eq!(tally.classify("해운대구"), Some("해운대구"));
        assert_eq!(tally.classify("기장"), Some("기장군"));
        assert_eq!(tally.classify("부산광역시"), None);
        assert_eq!(tally.classify("서울특별시"), None);
    }

    #[test]
    fn test_tally_zero_fills_in_category_order() {
        let tally = TokenTally::busan_districts();
        let series = tally
            .tally([
                Some("해운대구, 수영구"),
                Some("부산광역시 해운대구"),
                None,
                Some("기장,,"),
            ])
            .unwrap();

        assert_eq!(series.len(), BUSAN_DISTRICTS.len());
        assert_eq!(series.entries()[0].label, "중구");
        assert_eq!(series.get("해운대구"), Some(2.0));
        assert_eq!(series.get("수영구"), Some(1.0));
        assert_eq!(series.get("기장군"), Some(1.0));
        assert_eq!(series.get("중구"), Some(0.0));
    }

    #[test]
    fn test_stripped_to_empty_tokens_are_not_ignored() {
        let tally = TokenTally::busan_districts();
        let (counts, ignored) =
            tally.count_tokens([Some("부산광역시, 해운대구"), Some(" , 서울특별시"), Some("부산광역시")]);
        assert_eq!(counts.get("해운대구"), Some(&1));
        assert_eq!(ignored, 1);
    }

    #[test]
    fn test_custom_delimiter() {
        let tally = TokenTally::new(["A", "B"]).with_delimiter('|');
        let series = tally.tally([Some("A|B|A"), Some("C")]).unwrap();
        assert_eq!(series.get("A"), Some(2.0));
        assert_eq!(series.get("B"), Some(1.0));
    }

    #[test]
    fn test_empty_categories_fail() {
        let tally = TokenTally::new(Vec::<String>::new());
        assert!(matches!(
            tally.tally([Some("x")]),
            Err(RankhueError::InvalidSeries(_))
        ));
    }

    #[test]
    fn test_tally_column() {
        let df = df!("대상지역" => [Some("중구,동구"), None, Some("동구")]).unwrap();
        let series = TokenTally::busan_districts()
            .tally_column(&df, "대상지역")
            .unwrap();
        assert_eq!(series.get("동구"), Some(2.0));
        assert_eq!(series.get("중구"), Some(1.0));

        assert!(TokenTally::busan_districts()
            .tally_column(&df, "missing")
            .is_err());
    }
}
