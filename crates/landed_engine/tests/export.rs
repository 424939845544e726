use std::fs;

use chrono::FixedOffset;
use landed_core::Listing;
use landed_engine::{write_csv_export, ExportError, ExportOptions, CSV_HEADER};
use tempfile::TempDir;

fn options() -> ExportOptions {
    ExportOptions {
        utc_offset: FixedOffset::east_opt(0),
        ..ExportOptions::default()
    }
}

fn listing(title: &str) -> Listing {
    Listing {
        id: "1".into(),
        title: title.into(),
        company: "Acme".into(),
        location: "Leeds".into(),
        salary_max: Some(45_000.0),
        url: "https://example.com/1".into(),
        created: "2024-01-02T09:00:00Z".into(),
        category: "IT Jobs".into(),
        ..Listing::default()
    }
}

#[test]
fn writes_named_file_in_missing_directory() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("exports");

    let summary = write_csv_export(&dir, &[listing("Dev")], &options()).unwrap();
    assert_eq!(summary.row_count, 1);
    assert_eq!(summary.output_path, dir.join("getlanded_jobs.csv"));
    assert_eq!(
        fs::read_to_string(&summary.output_path).unwrap(),
        format!(
            "{CSV_HEADER}\n\"Dev\",\"Acme\",\"Leeds\",N/A,45000,\"IT Jobs\",02/01/2024,https://example.com/1"
        )
    );
}

#[test]
fn second_export_replaces_the_first() {
    let temp = TempDir::new().unwrap();
    write_csv_export(temp.path(), &[listing("First")], &options()).unwrap();
    let summary = write_csv_export(temp.path(), &[], &options()).unwrap();

    assert_eq!(summary.row_count, 0);
    assert_eq!(fs::read_to_string(&summary.output_path).unwrap(), CSV_HEADER);
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn file_in_place_of_directory_is_rejected() {
    let temp = TempDir::new().unwrap();
    let not_a_dir = temp.path().join("not_a_dir");
    fs::write(&not_a_dir, "x").unwrap();

    let err = write_csv_export(&not_a_dir, &[listing("Dev")], &options()).unwrap_err();
    assert!(matches!(err, ExportError::OutputDir(_)));
    assert!(!temp.path().join("getlanded_jobs.csv").exists());
}
