//! Integration tests for the curation pipeline.

use std::fs;

use curate_engine::{curate_file, curate_table, run_on_table};
use curate_model::{CanonicalSchema, CurationConfig, FileTypeLabel, Table};

fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::with_rows(
        columns.iter().map(|c| (*c).to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| (*c).to_string()).collect())
            .collect(),
    )
}

fn medication_columns() -> Vec<&'static str> {
    vec![
        "Patient_ID",
        "Age",
        "Gender",
        "Race",
        "Ciprofloxin",
        "Start_Date",
        "End_Date",
        "Ciprofloxin_Eng",
        "Start_DateEng",
        "End_DateEng",
        "First_Transplant_Date",
    ]
}

#[test]
fn patients_row_with_empty_patient_id_is_kept() {
    // Row validity depends on the identifier columns alone: with
    // identifiers {age, gender, race}, an empty patient_id is irrelevant.
    let mut config = CurationConfig::builtin();
    let patients = CanonicalSchema::new(
        FileTypeLabel::Patients,
        &["patient_id", "age", "gender", "race"],
        &["age", "gender", "race"],
    )
    .with_repeatable(&["start_date", "end_date"]);
    config.schemas[0] = patients;

    let input = table(
        &["patient_id", "age", "gender", "race"],
        &[&["", "40", "M", "White"]],
    );
    let (curated, log) = curate_table(input, &config);
    let curated = curated.expect("curated table");
    assert_eq!(curated.row_count(), 1);
    assert!(log.join().contains("removed 0 invalid rows"));
}

#[test]
fn medication_straddling_the_transplant_date_is_suppressed() {
    let input = table(
        &medication_columns(),
        &[&[
            "p1",
            "40",
            "M",
            "White",
            "1",
            "6/1/2020",
            "6/15/2020",
            "0",
            "",
            "",
            "6/10/2020",
        ]],
    );
    let (curated, log) = curate_table(input, &CurationConfig::builtin());
    let curated = curated.expect("curated table");

    assert_eq!(
        curated.columns,
        vec![
            "patient_id",
            "age",
            "gender",
            "race",
            "ciprofloxin",
            "first_transplant_date"
        ]
    );
    // 9 days before and 5 days after the transplant: both inside the
    // window, and the eng indicator is 0, so the merge stays 0.
    assert_eq!(curated.cell(0, 4), Some("0"));
    insta::assert_snapshot!(
        log.join(),
        @"classified as patients; canonicalized columns; removed 0 invalid rows; reconciled medications; scrubbed 0 values"
    );
}

#[test]
fn medication_outside_the_window_survives_the_merge() {
    let input = table(
        &medication_columns(),
        &[&[
            "p1",
            "40",
            "M",
            "White",
            "1",
            "5/1/2020",
            "6/15/2020",
            "0",
            "",
            "",
            "6/10/2020",
        ]],
    );
    let (curated, _) = curate_table(input, &CurationConfig::builtin());
    let curated = curated.expect("curated table");
    let position = curated.column_position("ciprofloxin").unwrap();
    assert_eq!(curated.cell(0, position), Some("1"));
}

#[test]
fn unknown_tables_short_circuit() {
    let input = table(&["col_a", "col_b"], &[&["x", "y"], &["some", "text"]]);
    let (curated, log) = curate_table(input, &CurationConfig::builtin());
    assert!(curated.is_none());
    assert_eq!(log.join(), "classification unknown");
}

#[test]
fn missing_reference_date_degrades_to_a_token() {
    let input = table(
        &["patient_id", "age", "gender", "race", "ciprofloxin"],
        &[&["p1", "40", "M", "White", "1"]],
    );
    let (curated, log) = curate_table(input, &CurationConfig::builtin());
    let curated = curated.expect("pipeline continues past the reconciler");

    // The reconciler failed recoverably: its columns are untouched.
    assert!(curated.column_position("ciprofloxin").is_some());
    assert!(
        log.join()
            .contains("medication reconciliation failed: reference date column")
    );
}

#[test]
fn non_patients_tables_skip_reconciliation() {
    let input = table(
        &["taxonomy_id", "genus", "species"],
        &[&["811", "Collinsella", "aerofaciens"]],
    );
    let (curated, log) = curate_table(input, &CurationConfig::builtin());
    assert!(curated.is_some());
    assert!(log.join().contains("medication reconciliation skipped"));
}

#[test]
fn row_removal_is_reported_per_run() {
    let input = table(
        &["patient_id", "age", "gender", "race"],
        &[
            &["p1", "40", "M", "White"],
            &["", "", "", ""],
            &["", " ", "", ""],
        ],
    );
    let run = run_on_table(input, &CurationConfig::builtin());
    assert!(run.success);
    assert_eq!(run.rows_in, 3);
    assert_eq!(run.rows_removed, 2);
    assert_eq!(run.file_type, Some(FileTypeLabel::Patients));
}

#[test]
fn curating_a_file_commits_in_place_with_a_backup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patients.csv");
    let original = "Patient_ID,Age,Gender,Race,Ciprofloxin,Start_Date,End_Date,\
                    Ciprofloxin_Eng,Start_DateEng,End_DateEng,First_Transplant_Date\n\
                    p1,40,M,White,1,6/1/2020,6/15/2020,0,,,6/10/2020\n";
    fs::write(&path, original).unwrap();

    let (result, log) = curate_file(&path, &CurationConfig::builtin());
    assert!(result.is_none(), "path input persists instead of returning");
    let status = log.join();
    assert!(status.starts_with("loaded; classified as patients"));
    assert!(status.ends_with("saved"));

    let backup = dir.path().join("patients_orig.csv");
    assert_eq!(fs::read_to_string(&backup).unwrap(), original);

    let (curated, _) = curate_ingest::read_table(&path).unwrap();
    assert_eq!(
        curated.columns,
        vec![
            "patient_id",
            "age",
            "gender",
            "race",
            "ciprofloxin",
            "first_transplant_date"
        ]
    );
    assert_eq!(curated.cell(0, 4), Some("0"));
}

#[test]
fn unreadable_files_report_a_read_failure() {
    let (result, log) = curate_file(
        std::path::Path::new("/nonexistent/patients.csv"),
        &CurationConfig::builtin(),
    );
    assert!(result.is_none());
    assert!(log.join().starts_with("read failed:"));
    assert!(log.has_failure());
}

#[test]
fn blocked_temp_file_yields_a_save_error_and_keeps_the_original() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patients.csv");
    let original = "Patient_ID,Age,Gender,Race\np1,40,M,White\n";
    fs::write(&path, original).unwrap();
    // A directory squatting on the temp name makes the commit write fail.
    fs::create_dir(dir.path().join("patients.csv.tmp")).unwrap();

    let (result, log) = curate_file(&path, &CurationConfig::builtin());
    assert!(result.is_none());
    assert!(log.join().contains("save failed:"));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}

#[test]
fn scrubbing_runs_after_row_removal() {
    // The NA cells become canonical missing markers, but the row was
    // already kept: sentinel-driven emptiness never re-invalidates it.
    let input = table(
        &["patient_id", "age", "gender", "race"],
        &[&["p1", "NA", "n/a", "White"]],
    );
    let (curated, log) = curate_table(input, &CurationConfig::builtin());
    let curated = curated.expect("curated table");
    assert_eq!(curated.row_count(), 1);
    assert_eq!(curated.rows[0], vec!["p1", "", "", "White"]);
    assert!(log.join().contains("removed 0 invalid rows"));
    assert!(log.join().contains("scrubbed 2 values"));
}
