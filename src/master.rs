use crate::sheet::Sheet;
use crate::stages::address::HOST_SEPARATOR;
use crate::stages::schema::EXPECTED_COLUMNS;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use log::info;
use std::collections::HashSet;
use std::path::Path;

pub const DATE_COLUMN: &str = "date";
pub const TIME_COLUMN: &str = "time";
pub const DATE_FORMAT: &str = "%d-%m-%y";
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// The cumulative record of every row that ever passed validation, stamped
/// with the date and time of the run that (re-)wrote it.
///
/// Append-only: rows are never edited or removed, only added and re-stamped.
/// The backing file is read once at run start and rewritten in full at run
/// end; nothing in between touches it.
pub struct MasterRecord {
    sheet: Sheet,
}

impl MasterRecord {
    /// Expected columns plus the stamp columns, in persisted order.
    fn headers() -> Vec<String> {
        EXPECTED_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain([DATE_COLUMN.to_string(), TIME_COLUMN.to_string()])
            .collect()
    }

    pub fn empty() -> Self {
        Self {
            sheet: Sheet::new(Self::headers()),
        }
    }

    /// Load the master sheet if it exists; an absent file is an empty master,
    /// not an error (first run creates it).
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            info!(
                "Master sheet '{}' not found; starting a new one",
                path.as_ref().display()
            );
            return Ok(Self::empty());
        }

        let sheet = Sheet::from_path(&path).context("Failed to read master sheet")?;
        Ok(Self { sheet })
    }

    pub fn len(&self) -> usize {
        self.sheet.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sheet.is_empty()
    }

    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// Every address token accumulated so far, for cross-run duplicate
    /// detection.
    pub fn host_set(&self) -> HashSet<String> {
        let mut hosts = HashSet::new();
        for row_index in 0..self.sheet.len() {
            let cell = self.sheet.value(row_index, "hosts").unwrap_or("");
            for host in cell.split(HOST_SEPARATOR) {
                if !host.is_empty() {
                    hosts.insert(host.to_string());
                }
            }
        }
        hosts
    }

    /// Append the validated batch and stamp with the run's timestamp.
    ///
    /// By default every row, old and new, receives this run's date and time,
    /// reproducing the historical behavior downstream consumers rely on.
    /// With `stamp_new_only` the prior rows keep their original stamps.
    pub fn accumulate(&mut self, batch: &Sheet, now: &DateTime<Local>, stamp_new_only: bool) {
        let first_new_row = self.sheet.len();

        for batch_row in 0..batch.len() {
            let row: Vec<String> = self
                .sheet
                .headers()
                .iter()
                .map(|header| batch.value(batch_row, header).unwrap_or("").to_string())
                .collect();
            self.sheet.push_row(row);
        }

        let stamp_from = if stamp_new_only { first_new_row } else { 0 };
        self.stamp_rows(stamp_from, now);
    }

    fn stamp_rows(&mut self, from_row: usize, now: &DateTime<Local>) {
        let date = now.format(DATE_FORMAT).to_string();
        let time = now.format(TIME_FORMAT).to_string();

        let date_index = self.sheet.column_index(DATE_COLUMN);
        let time_index = self.sheet.column_index(TIME_COLUMN);

        for row in self.sheet.rows_mut().iter_mut().skip(from_row) {
            if let Some(index) = date_index {
                if let Some(cell) = row.get_mut(index) {
                    *cell = date.clone();
                }
            }
            if let Some(index) = time_index {
                if let Some(cell) = row.get_mut(index) {
                    *cell = time.clone();
                }
            }
        }
    }

    /// Rewrite the master sheet in full.
    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.sheet
            .write_to(path)
            .context("Failed to write master sheet")
    }
}
