use crate::error::ValidationError;
use crate::master::MasterRecord;
use crate::render;
use crate::sheet::Sheet;
use crate::stages::address::HOST_SEPARATOR;
use crate::stages::{AddressValidator, MandatoryFieldChecker, RowNormalizer, SchemaValidator, Stage};
use anyhow::{Context, Result};
use chrono::Local;
use log::debug;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// The ordered validation stages for one batch.
///
/// Stage order is fixed: normalize, schema, mandatory fields, addresses.
/// The first failing stage aborts the run; no external write has happened
/// by then.
pub struct Pipeline {
    stages: Vec<Box<dyn Stage>>,
}

impl Pipeline {
    /// The standard stage sequence, with cross-run duplicate detection
    /// seeded from the given master hosts.
    pub fn standard(master_hosts: HashSet<String>) -> Self {
        Self {
            stages: vec![
                Box::new(RowNormalizer),
                Box::new(SchemaValidator),
                Box::new(MandatoryFieldChecker),
                Box::new(AddressValidator::with_master_hosts(master_hosts)),
            ],
        }
    }

    pub fn run(&self, sheet: &mut Sheet) -> Result<(), ValidationError> {
        for stage in &self.stages {
            debug!("Running validation stage '{}'", stage.name());
            stage.run(sheet)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RunStats {
    pub rows_validated: usize,
    pub hosts_checked: usize,
    pub master_rows_before: usize,
    pub master_rows_after: usize,
}

pub struct GenerateOptions {
    pub input: String,
    pub output: String,
    pub master: String,
    pub stamp_new_only: bool,
}

fn count_host_tokens(sheet: &Sheet) -> usize {
    (0..sheet.len())
        .map(|row| {
            sheet
                .value(row, "hosts")
                .unwrap_or("")
                .split(HOST_SEPARATOR)
                .filter(|host| !host.is_empty())
                .count()
        })
        .sum()
}

/// Run one full generation: load, validate, render, accumulate, persist.
///
/// Both external writes (the rendered document and the master rewrite)
/// happen only after every validation stage has passed, so a failed run
/// leaves the filesystem untouched.
pub fn generate(options: &GenerateOptions) -> Result<RunStats> {
    if !Path::new(&options.input).exists() {
        return Err(ValidationError::InputNotFound(options.input.clone()).into());
    }

    let mut batch = Sheet::from_path(&options.input)?;
    let mut master = MasterRecord::load_or_empty(&options.master)?;

    let pipeline = Pipeline::standard(master.host_set());
    pipeline.run(&mut batch)?;

    let document = render::render_document(&batch)?;
    fs::write(&options.output, document).with_context(|| {
        format!("Failed to write monitor configuration to {}", options.output)
    })?;

    let master_rows_before = master.len();
    let now = Local::now();
    master.accumulate(&batch, &now, options.stamp_new_only);
    master.write_to(&options.master)?;

    Ok(RunStats {
        rows_validated: batch.len(),
        hosts_checked: count_host_tokens(&batch),
        master_rows_before,
        master_rows_after: master.len(),
    })
}
