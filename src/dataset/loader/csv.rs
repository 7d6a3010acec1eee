//! CSV file loader.
//!
//! The header row names the columns and every other record becomes a row.
//! Cells that parse as numbers become [`Value::Number`], the rest stay
//! categories. Fields that are not valid UTF-8 are decoded as Latin-1, the
//! encoding player exports usually ship in.

use crate::core::error::{CartError, Result};
use crate::core::types::{Row, Value};
use crate::dataset::Dataset;
use csv::{ByteRecord, ReaderBuilder};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;

/// CSV-specific configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvConfig {
    /// Field delimiter
    pub delimiter: char,
    /// Quote character
    pub quote_char: char,
    /// Has header row; without one, columns are named `col_0`, `col_1`, ...
    pub has_header: bool,
    /// Drop records with the wrong cell count instead of failing
    pub skip_ragged: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        CsvConfig {
            delimiter: ',',
            quote_char: '"',
            has_header: true,
            skip_ragged: true,
        }
    }
}

/// CSV data loader
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    config: CsvConfig,
}

impl CsvLoader {
    /// Create a new CSV loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Create CSV loader with custom configuration
    pub fn with_config(config: CsvConfig) -> Self {
        CsvLoader { config }
    }

    /// Set delimiter character
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set whether file has header
    pub fn with_header(mut self, has_header: bool) -> Self {
        self.config.has_header = has_header;
        self
    }

    /// Set whether ragged records are skipped
    pub fn with_skip_ragged(mut self, skip_ragged: bool) -> Self {
        self.config.skip_ragged = skip_ragged;
        self
    }

    /// Load CSV file
    pub fn load_csv<P: AsRef<Path>>(&self, path: P) -> Result<Dataset> {
        let path = path.as_ref();
        info!("Loading CSV file: {}", path.display());
        let file = std::fs::File::open(path)?;
        self.load_from_reader(file)
    }

    /// Load CSV data from any reader
    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Dataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(ascii_byte("delimiter", self.config.delimiter)?)
            .quote(ascii_byte("quote_char", self.config.quote_char)?)
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = reader.byte_records();
        let mut attributes: Option<Vec<String>> = None;
        if self.config.has_header {
            match records.next() {
                Some(header) => attributes = Some(decode_record(&header?)),
                None => return Err(CartError::empty_input("CSV file has no header row")),
            }
        }

        let mut rows: Vec<Row> = Vec::new();
        for (line_num, result) in records.enumerate() {
            let record = result?;
            let cells = decode_record(&record);
            let width = attributes
                .get_or_insert_with(|| (0..cells.len()).map(|i| format!("col_{}", i)).collect())
                .len();

            if cells.len() != width {
                let line = line_num + 1 + usize::from(self.config.has_header);
                if self.config.skip_ragged {
                    warn!(
                        "Skipping record at line {}: expected {} cells, got {}",
                        line,
                        width,
                        cells.len()
                    );
                    continue;
                }
                return Err(CartError::dimension_mismatch(
                    format!("{} cells", width),
                    format!("{} cells at line {}", cells.len(), line),
                ));
            }

            rows.push(cells.iter().map(|cell| Value::parse_cell(cell)).collect());
        }

        if rows.is_empty() {
            return Err(CartError::empty_input("CSV file contains no data rows"));
        }

        let attributes = attributes.unwrap_or_default();
        info!("Loaded {} rows with {} columns", rows.len(), attributes.len());
        Dataset::new(attributes, rows)
    }
}

fn ascii_byte(parameter: &str, c: char) -> Result<u8> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(CartError::invalid_parameter(
            parameter,
            c.to_string(),
            "must be a single ASCII character",
        ))
    }
}

fn decode_record(record: &ByteRecord) -> Vec<String> {
    record.iter().map(decode_field).collect()
}

fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Loads a CSV file with the default configuration.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    CsvLoader::new().load_csv(path)
}
