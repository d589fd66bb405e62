// tests/integration/export_flow_test.rs

use alert_data_generator::usecase::export_dataset::{
    export_dataset, to_csv_string, to_xlsx_bytes, write_json, ExportFormat,
};
use alert_data_generator::usecase::summarize_dataset::COLUMNS;
use alert_data_generator::{CategoricalWeights, DatasetAssembler, Status};

fn dataset(n: i64) -> alert_data_generator::Dataset {
    DatasetAssembler::new(CategoricalWeights::builtin())
        .unwrap()
        .with_seed(31)
        .generate(n, None)
        .unwrap()
}

#[test]
fn csv_has_header_and_blank_resolution_for_unresolved() {
    let dataset = dataset(400);
    let csv = to_csv_string(&dataset).unwrap();

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), COLUMNS.to_vec());

    let resolution_col = headers.iter().position(|h| h == "resolution_time_minutes").unwrap();
    let status_col = headers.iter().position(|h| h == "status").unwrap();

    let mut rows = 0;
    for row in reader.records() {
        let row = row.unwrap();
        let resolved = &row[status_col] == Status::Resolved.label();
        assert_eq!(row[resolution_col].is_empty(), !resolved, "row {:?}", row);
        rows += 1;
    }
    assert_eq!(rows, 400);
}

#[test]
fn json_uses_utc_timestamps_and_null_resolution() {
    let dataset = dataset(50);
    let mut buf = Vec::new();
    write_json(&dataset, &mut buf).unwrap();

    let parsed: Vec<serde_json::Value> = serde_json::from_slice(&buf).unwrap();
    assert_eq!(parsed.len(), 50);
    for (value, record) in parsed.iter().zip(dataset.iter()) {
        assert_eq!(value["id"], record.id.as_str());
        assert!(value["timestamp"].as_str().unwrap().ends_with('Z'));
        assert_eq!(value["resolution_time_minutes"].is_null(), !record.is_resolved());
    }
}

#[test]
fn xlsx_is_a_zip_container() {
    let bytes = to_xlsx_bytes(&dataset(20)).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn export_dataset_writes_one_file_per_format() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dataset(120);

    let written = export_dataset(
        &dataset,
        &[ExportFormat::Csv, ExportFormat::Json, ExportFormat::Xlsx],
        dir.path(),
    )
    .unwrap();

    assert_eq!(written.len(), 3);
    for (path, format) in written.iter().zip([ExportFormat::Csv, ExportFormat::Json, ExportFormat::Xlsx]) {
        assert!(path.exists(), "{} missing", path.display());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some(format.extension()));
        let name = path.file_name().unwrap().to_string_lossy();
        assert!(name.starts_with("alert_data_"), "{name}");
        assert!(std::fs::metadata(path).unwrap().len() > 0);
    }

    let csv = std::fs::read_to_string(&written[0]).unwrap();
    assert_eq!(csv.lines().count(), 121);
}

#[test]
fn export_creates_missing_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("out").join("alerts");

    let written = export_dataset(&dataset(10), &[ExportFormat::Csv], &nested).unwrap();
    assert!(nested.is_dir());
    assert_eq!(written.len(), 1);
}
