use std::fs;

use naf_core::Dataset;
use naf_ingest::{DataFormat, IngestError, load_dataset, output_path, save_frame};
use polars::df;
use tempfile::TempDir;

#[test]
fn csv_codes_keep_leading_zeros() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("input.csv");
    fs::write(
        &path,
        "liasse_numero,libelle,nace2025\n001,elevage ovin,0145Y\n002,,\n",
    )
    .expect("write csv");

    let dataset = load_dataset(&path).expect("load");
    assert_eq!(dataset.height(), 2);
    assert_eq!(dataset.value("liasse_numero", 0).as_deref(), Some("001"));
    assert_eq!(dataset.value("nace2025", 0).as_deref(), Some("0145Y"));
    assert_eq!(dataset.value("libelle", 1), None);
}

#[test]
fn parquet_non_string_columns_are_read_as_text() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("input.parquet");
    let mut frame = df! {
        "liasse_numero" => ["J1", "J2"],
        "activ_surf_et" => [1i64, 0],
    }
    .expect("df");
    save_frame(&mut frame, &path, DataFormat::Parquet).expect("save");

    let dataset = load_dataset(&path).expect("load");
    assert_eq!(dataset.value("activ_surf_et", 0).as_deref(), Some("1"));
}

#[test]
fn saved_csv_can_be_reloaded() {
    let dir = TempDir::new().expect("tempdir");
    let frame = df! {
        "liasse_numero" => ["J1"],
        "nace2025" => ["4933G"],
    }
    .expect("df");
    let dataset = Dataset::new(frame).expect("dataset");
    let path = output_path(&dir.path().join("out"), "data_with_naf", "_regex", DataFormat::Csv);
    assert!(path.ends_with("out/data_with_naf_regex.csv"));

    save_frame(&mut dataset.into_frame(), &path, DataFormat::Csv).expect("save");
    let reloaded = load_dataset(&path).expect("reload");
    assert_eq!(reloaded.value("nace2025", 0).as_deref(), Some("4933G"));
}

#[test]
fn missing_input_is_reported() {
    let dir = TempDir::new().expect("tempdir");
    let err = load_dataset(&dir.path().join("absent.csv")).expect_err("missing");
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
