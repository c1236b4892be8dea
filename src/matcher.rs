//! Label predicates used by predicate-highlight mode
//!
//! Matchers are written as `exact:<label>`, `contains:<text>` or
//! `regex:<pattern>`. A string without a recognised prefix is an exact match.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::{RankhueError, Result};

#[derive(Debug, Clone)]
pub enum LabelMatcher {
    Exact(String),
    Contains(String),
    Pattern(Regex),
}

impl LabelMatcher {
    pub fn exact(label: impl Into<String>) -> Self {
        LabelMatcher::Exact(label.into())
    }

    pub fn contains(text: impl Into<String>) -> Self {
        LabelMatcher::Contains(text.into())
    }

    pub fn pattern(pattern: &str) -> Result<Self> {
        Regex::new(pattern).map(LabelMatcher::Pattern).map_err(|e| {
            RankhueError::ConfigError(format!("Invalid label pattern '{}': {}", pattern, e))
        })
    }

    pub fn matches(&self, label: &str) -> bool {
        match self {
            LabelMatcher::Exact(expected) => label == expected,
            LabelMatcher::Contains(text) => label.contains(text.as_str()),
            LabelMatcher::Pattern(re) => re.is_match(label),
        }
    }
}

impl FromStr for LabelMatcher {
    type Err = RankhueError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(rest) = s.strip_prefix("exact:") {
            Ok(LabelMatcher::exact(rest))
        } else if let Some(rest) = s.strip_prefix("contains:") {
            Ok(LabelMatcher::contains(rest))
        } else if let Some(rest) = s.strip_prefix("regex:") {
            LabelMatcher::pattern(rest)
        } else {
            Ok(LabelMatcher::exact(s))
        }
    }
}

impl fmt::Display for LabelMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelMatcher::Exact(s) => write!(f, "exact:{}", s),
            LabelMatcher::Contains(s) => write!(f, "contains:{}", s),
            LabelMatcher::Pattern(re) => write!(f, "regex:{}", re.as_str()),
        }
    }
}
