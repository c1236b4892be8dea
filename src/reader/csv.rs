//! CSV reader backed by the Polars CSV parser

use std::io::Cursor;
use std::path::Path;

use polars::prelude::{CsvParseOptions, CsvReadOptions, SerReader};
use tracing::debug;

use super::Reader;
use crate::{DataFrame, RankhueError, Result};

/// Reads UTF-8 CSV files with a header row
#[derive(Debug, Clone)]
pub struct CsvReader {
    separator: u8,
    infer_schema_length: Option<usize>,
}

impl CsvReader {
    pub fn new() -> Self {
        Self {
            separator: b',',
            infer_schema_length: Some(100),
        }
    }

    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    /// Rows scanned for type inference; `None` scans the whole file.
    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }

    fn options(&self) -> CsvReadOptions {
        CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .with_parse_options(CsvParseOptions::default().with_separator(self.separator))
    }

    /// Parse CSV text already held in memory.
    pub fn read_str(&self, content: &str) -> Result<DataFrame> {
        let cursor = Cursor::new(content.as_bytes().to_vec());
        self.options()
            .into_reader_with_file_handle(cursor)
            .finish()
            .map_err(|e| RankhueError::ReaderError(format!("Failed to parse CSV: {}", e)))
    }
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new()
    }
}

impl Reader for CsvReader {
    fn read(&self, source: &str) -> Result<DataFrame> {
        let path = Path::new(source);
        if !path.exists() {
            return Err(RankhueError::ReaderError(format!(
                "CSV file not found: {}",
                source
            )));
        }

        let df = self
            .options()
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .map_err(|e| RankhueError::ReaderError(format!("Failed to read {}: {}", source, e)))?;

        debug!(source, rows = df.height(), columns = df.width(), "loaded CSV");
        Ok(df)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Country,INFJ,ENFP").unwrap();
        writeln!(file, "Korea,0.12,0.08").unwrap();
        writeln!(file, "Japan,0.10,0.09").unwrap();
        file.flush().unwrap();

        let df = CsvReader::new()
            .read(file.path().to_str().unwrap())
            .unwrap();
        assert_eq!(df.shape(), (2, 3));
    }

    #[test]
    fn test_read_missing_file() {
        let err = CsvReader::new().read("/nonexistent/data.csv").unwrap_err();
        assert!(matches!(err, RankhueError::ReaderError(_)));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_read_str_with_separator() {
        let df = CsvReader::new()
            .with_separator(b';')
            .read_str("역명;승차총승객수\n서울역;100\n시청;80\n")
            .unwrap();
        assert_eq!(df.shape(), (2, 2));
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(names, vec!["역명", "승차총승객수"]);
    }
}
