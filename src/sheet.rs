use anyhow::{Context, Result};
use csv::{Reader, StringRecord, Writer};
use std::fs::File;
use std::path::Path;

/// An ordered tabular sheet: one header row plus zero or more data rows.
///
/// Both the per-run input batch and the cumulative master sheet are carried
/// in this shape. Cells are addressed by header name; rows shorter than the
/// header are padded on load so every row has full width.
#[derive(Debug, Clone)]
pub struct Sheet {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Read a sheet from a CSV file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(&path).with_context(|| {
            format!("Failed to open sheet file: {}", path.as_ref().display())
        })?;
        let mut reader = Reader::from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            if row.len() < headers.len() {
                row.resize(headers.len(), String::new());
            }
            rows.push(row);
        }

        Ok(Self { headers, rows })
    }

    /// Write the sheet to a CSV file, overwriting any existing content.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(&path).with_context(|| {
            format!("Failed to create sheet file: {}", path.as_ref().display())
        })?;
        let mut writer = Writer::from_writer(file);

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        writer.flush()?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Header row as a `StringRecord`, for serde-driven row mapping.
    pub fn header_record(&self) -> StringRecord {
        StringRecord::from(self.headers.clone())
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Vec<String>] {
        &mut self.rows
    }

    /// Number of data rows (the header does not count).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell value by row index and header name.
    pub fn value(&self, row: usize, column: &str) -> Option<&str> {
        let index = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(index)).map(|s| s.as_str())
    }

    /// Append a data row, padding or truncating it to header width.
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }
}
