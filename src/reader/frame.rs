//! DataFrame helpers: field discovery, row filters and series extraction

use polars::prelude::{BooleanChunked, DataType, NamedFrom};
use tracing::debug;

use crate::series::{Entry, Series};
use crate::{DataFrame, RankhueError, Result};

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect()
}

fn string_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(column)
        .map_err(|_| missing_column(df, column))?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

fn float_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(column)
        .map_err(|_| missing_column(df, column))?
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(|e| {
            RankhueError::ReaderError(format!("Column '{}' is not numeric: {}", column, e))
        })?;
    Ok(series.f64()?.into_iter().collect())
}

fn missing_column(df: &DataFrame, column: &str) -> RankhueError {
    RankhueError::ReaderError(format!(
        "Column '{}' not found (available: {})",
        column,
        column_names(df).join(", ")
    ))
}

/// Find the single column whose name contains `needle`.
///
/// Fails when no column or more than one column matches.
pub fn discover_field(df: &DataFrame, needle: &str) -> Result<String> {
    let names = column_names(df);
    let candidates: Vec<&String> = names.iter().filter(|n| n.contains(needle)).collect();

    match candidates.as_slice() {
        [] => Err(RankhueError::FieldDiscovery(format!(
            "no column name contains '{}' (available: {})",
            needle,
            names.join(", ")
        ))),
        [only] => {
            debug!(needle, field = %only, "discovered field");
            Ok((*only).clone())
        }
        many => Err(RankhueError::FieldDiscovery(format!(
            "column name '{}' is ambiguous: {}",
            needle,
            many.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
        ))),
    }
}

/// Build a series from a label column and a numeric value column.
///
/// Null labels or values are rejected.
pub fn series_from_frame(df: &DataFrame, label_column: &str, value_column: &str) -> Result<Series> {
    let labels = string_values(df, label_column)?;
    let values = float_values(df, value_column)?;

    let entries = labels
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(row, pair)| match pair {
            (Some(label), Some(value)) => Ok(Entry { label, value }),
            (None, _) => Err(RankhueError::InvalidSeries(format!(
                "null label in column '{}' at row {}",
                label_column, row
            ))),
            (_, None) => Err(RankhueError::InvalidSeries(format!(
                "null value in column '{}' at row {}",
                value_column, row
            ))),
        })
        .collect::<Result<Vec<_>>>()?;

    Series::new(entries)
}

/// Build a series from one row of a wide table.
///
/// The row is selected by `key_column == key`; every other column becomes a
/// label, in column order, with that row's value.
pub fn series_from_row(df: &DataFrame, key_column: &str, key: &str) -> Result<Series> {
    let row = filter_eq(df, key_column, key)?;
    match row.height() {
        0 => {
            return Err(RankhueError::InvalidSeries(format!(
                "no row where '{}' = '{}'",
                key_column, key
            )))
        }
        1 => {}
        n => {
            return Err(RankhueError::InvalidSeries(format!(
                "{} rows where '{}' = '{}', expected one",
                n, key_column, key
            )))
        }
    }

    let entries = column_names(&row)
        .into_iter()
        .filter(|name| name != key_column)
        .map(|name| {
            let value = float_values(&row, &name)?[0].ok_or_else(|| {
                RankhueError::InvalidSeries(format!("null value in column '{}'", name))
            })?;
            Ok(Entry { label: name, value })
        })
        .collect::<Result<Vec<_>>>()?;

    Series::new(entries)
}

/// Keep rows whose `column`, rendered as a string, equals `value`.
pub fn filter_eq(df: &DataFrame, column: &str, value: &str) -> Result<DataFrame> {
    let mask: BooleanChunked = string_values(df, column)?
        .iter()
        .map(|v| Some(v.as_deref() == Some(value)))
        .collect();
    let filtered = df.filter(&mask)?;
    debug!(column, value, rows = filtered.height(), "filtered rows");
    Ok(filtered)
}

/// Append a Float64 column `name` holding the row-wise sum of `columns`.
pub fn sum_columns(df: &DataFrame, columns: &[&str], name: &str) -> Result<DataFrame> {
    if columns.is_empty() {
        return Err(RankhueError::ReaderError(
            "sum_columns requires at least one column".to_string(),
        ));
    }

    let mut totals = vec![0.0f64; df.height()];
    for column in columns {
        for (row, value) in float_values(df, column)?.into_iter().enumerate() {
            let value = value.ok_or_else(|| {
                RankhueError::ReaderError(format!(
                    "null value in column '{}' at row {}",
                    column, row
                ))
            })?;
            totals[row] += value;
        }
    }

    let mut out = df.clone();
    out.with_column(polars::prelude::Series::new(name.into(), totals))?;
    Ok(out)
}
