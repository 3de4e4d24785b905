//! End-to-end tests for the generation pipeline, run against real files in
//! temporary directories.

use chrono::Local;
use heartbeatgen::stages::schema::EXPECTED_COLUMNS;
use heartbeatgen::{generate, GenerateOptions, Sheet, ValidationError};
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// Write an input sheet where each `(id, hosts)` pair becomes one row with
/// the mandatory cells populated and everything else empty.
fn write_input(dir: &TempDir, name: &str, rows: &[(&str, &str)]) -> String {
    let path = dir.path().join(name);
    let headers: Vec<String> = EXPECTED_COLUMNS.iter().map(|c| c.to_string()).collect();
    let mut sheet = Sheet::new(headers);

    for (id, hosts) in rows {
        let row: Vec<String> = EXPECTED_COLUMNS
            .iter()
            .map(|column| match *column {
                "type" => "icmp".to_string(),
                "id" => id.to_string(),
                "name" => format!("Monitor {}", id),
                "hosts" => hosts.to_string(),
                _ => String::new(),
            })
            .collect();
        sheet.push_row(row);
    }

    sheet.write_to(&path).unwrap();
    path.to_string_lossy().into_owned()
}

fn options(dir: &TempDir, input: String) -> GenerateOptions {
    GenerateOptions {
        input,
        output: dir.path().join("heartbeat.yml").to_string_lossy().into_owned(),
        master: dir
            .path()
            .join("heartbeat_master.csv")
            .to_string_lossy()
            .into_owned(),
        stamp_new_only: false,
    }
}

fn today() -> String {
    Local::now().format("%d-%m-%y").to_string()
}

#[test]
fn fresh_run_renders_document_and_creates_stamped_master() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "input.csv", &[("edge-fw", "10.0.0.1")]);
    let opts = options(&dir, input);

    let stats = generate(&opts).unwrap();

    assert_eq!(stats.rows_validated, 1);
    assert_eq!(stats.hosts_checked, 1);
    assert_eq!(stats.master_rows_before, 0);
    assert_eq!(stats.master_rows_after, 1);

    let document = std::fs::read_to_string(&opts.output).unwrap();
    assert!(document.contains("heartbeat.monitors:"));
    assert!(document.contains("- type: icmp"));
    assert!(document.contains("\"edge-fw\""));
    assert!(document.contains("\"Monitor edge-fw\""));
    assert!(document.contains("[\"10.0.0.1\"]"));

    let master = Sheet::from_path(&opts.master).unwrap();
    assert_eq!(master.len(), 1);
    assert_eq!(master.value(0, "hosts"), Some("10.0.0.1"));
    assert_eq!(master.value(0, "date"), Some(today().as_str()));
    assert_eq!(master.value(0, "time").map(str::len), Some(8));
}

#[test]
fn second_run_accumulates_and_restamps_every_row() {
    let dir = tempdir().unwrap();
    let first = write_input(&dir, "first.csv", &[("a", "10.0.0.1")]);
    let mut opts = options(&dir, first);
    generate(&opts).unwrap();

    // Age the existing stamp so the rewrite is observable.
    let mut master = Sheet::from_path(&opts.master).unwrap();
    let date_index = master.column_index("date").unwrap();
    master.rows_mut()[0][date_index] = "01-01-20".to_string();
    master.write_to(&opts.master).unwrap();

    opts.input = write_input(&dir, "second.csv", &[("b", "10.0.0.2"), ("c", "10.0.0.3")]);
    let stats = generate(&opts).unwrap();

    assert_eq!(stats.master_rows_before, 1);
    assert_eq!(stats.master_rows_after, 3);

    let master = Sheet::from_path(&opts.master).unwrap();
    assert_eq!(master.len(), 3);
    for row in 0..master.len() {
        assert_eq!(master.value(row, "date"), Some(today().as_str()));
    }
}

#[test]
fn stamp_new_only_preserves_prior_stamps() {
    let dir = tempdir().unwrap();
    let first = write_input(&dir, "first.csv", &[("a", "10.0.0.1")]);
    let mut opts = options(&dir, first);
    generate(&opts).unwrap();

    let mut master = Sheet::from_path(&opts.master).unwrap();
    let date_index = master.column_index("date").unwrap();
    master.rows_mut()[0][date_index] = "01-01-20".to_string();
    master.write_to(&opts.master).unwrap();

    opts.input = write_input(&dir, "second.csv", &[("b", "10.0.0.2")]);
    opts.stamp_new_only = true;
    generate(&opts).unwrap();

    let master = Sheet::from_path(&opts.master).unwrap();
    assert_eq!(master.len(), 2);
    assert_eq!(master.value(0, "date"), Some("01-01-20"));
    assert_eq!(master.value(1, "date"), Some(today().as_str()));
}

#[test]
fn host_already_in_master_aborts_without_writes() {
    let dir = tempdir().unwrap();
    let first = write_input(&dir, "first.csv", &[("a", "192.168.1.1")]);
    let mut opts = options(&dir, first);
    generate(&opts).unwrap();

    opts.input = write_input(&dir, "second.csv", &[("b", "192.168.1.1")]);
    opts.output = dir.path().join("second.yml").to_string_lossy().into_owned();
    let error = generate(&opts).unwrap_err();

    assert_eq!(
        error.downcast_ref::<ValidationError>(),
        Some(&ValidationError::DuplicateInMaster {
            host: "192.168.1.1".to_string(),
        })
    );

    assert!(!Path::new(&opts.output).exists());
    let master = Sheet::from_path(&opts.master).unwrap();
    assert_eq!(master.len(), 1);
}

#[test]
fn schema_failure_leaves_filesystem_untouched() {
    let dir = tempdir().unwrap();

    // An input missing every expected column but the first four.
    let path = dir.path().join("input.csv");
    let mut sheet = Sheet::new(vec![
        "type".to_string(),
        "id".to_string(),
        "name".to_string(),
        "hosts".to_string(),
    ]);
    sheet.push_row(vec![
        "icmp".to_string(),
        "a".to_string(),
        "Monitor a".to_string(),
        "10.0.0.1".to_string(),
    ]);
    sheet.write_to(&path).unwrap();

    let opts = options(&dir, path.to_string_lossy().into_owned());
    let error = generate(&opts).unwrap_err();

    assert_eq!(
        error.downcast_ref::<ValidationError>(),
        Some(&ValidationError::MissingColumn("ipv4".to_string()))
    );
    assert!(!Path::new(&opts.output).exists());
    assert!(!Path::new(&opts.master).exists());
}

#[test]
fn missing_input_file_is_reported() {
    let dir = tempdir().unwrap();
    let opts = options(
        &dir,
        dir.path().join("no-such.csv").to_string_lossy().into_owned(),
    );

    let error = generate(&opts).unwrap_err();

    assert!(matches!(
        error.downcast_ref::<ValidationError>(),
        Some(ValidationError::InputNotFound(_))
    ));
}

#[test]
fn mandatory_failure_reports_field_not_rows() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "input.csv", &[("a", "10.0.0.1"), ("", "10.0.0.2")]);
    let opts = options(&dir, input);

    let error = generate(&opts).unwrap_err();

    assert_eq!(
        error.downcast_ref::<ValidationError>(),
        Some(&ValidationError::EmptyMandatoryField("id"))
    );
}
