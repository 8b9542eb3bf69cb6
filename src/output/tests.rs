//! Tests for output module

use super::*;
use crate::records::{Club, Player, StatEntry, TableEntry};
use crate::types::{OutputFormat, StatMap};
use arrow::array::Array;
use arrow::datatypes::DataType;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

fn players() -> Vec<Player> {
    vec![
        Player {
            id: "12".to_string(),
            name: "Bukayo Saka".to_string(),
            position: Some("M".to_string()),
            club: Some("Arsenal".to_string()),
            club_id: Some("1".to_string()),
            nationality: None,
        },
        Player {
            id: "14".to_string(),
            name: "Mohamed Salah".to_string(),
            position: Some("F".to_string()),
            club: Some("Liverpool".to_string()),
            club_id: Some("10".to_string()),
            nationality: None,
        },
    ]
}

// ============================================================================
// Schema Inference Tests
// ============================================================================

#[test]
fn test_infer_schema_empty() {
    let schema = infer_schema(&[]);
    assert!(schema.fields().is_empty());
}

#[test]
fn test_infer_schema_keeps_first_seen_order() {
    let records = vec![
        json!({"player": "A", "goals": 3, "assists": null}),
        json!({"player": "B", "goals": 2.5, "assists": 4, "xg": 1.2}),
    ];

    let schema = infer_schema(&records);
    let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
    assert_eq!(names, vec!["player", "goals", "assists", "xg"]);

    assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
    assert_eq!(schema.field(1).data_type(), &DataType::Float64);
    assert_eq!(schema.field(2).data_type(), &DataType::Int64);
}

#[test]
fn test_infer_schema_mixed_types_fall_back_to_string() {
    let records = vec![json!({"value": 1}), json!({"value": "one"})];
    let schema = infer_schema(&records);
    assert_eq!(schema.field(0).data_type(), &DataType::Utf8);
}

// ============================================================================
// Record Table Tests
// ============================================================================

#[test]
fn test_records_to_table_matches_records() {
    let records = players();
    let batch = records_to_table(&records, Some("719")).unwrap();

    assert_eq!(batch.num_rows(), records.len());
    let names: Vec<_> = batch
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    assert_eq!(
        names,
        vec!["id", "name", "position", "club", "club_id", "nationality"]
    );
    assert_eq!(table_season_id(&batch).as_deref(), Some("719"));
}

#[test]
fn test_all_null_column_keeps_declared_type() {
    let batch = records_to_table(&players(), None).unwrap();
    let field = batch.schema().field_with_name("nationality").unwrap().clone();
    assert_eq!(field.data_type(), &DataType::Utf8);
    assert_eq!(batch.column(5).null_count(), 2);
    assert!(table_season_id(&batch).is_none());
}

#[test]
fn test_records_to_table_empty() {
    let batch = records_to_table::<Club>(&[], Some("777")).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 2);
}

#[test]
fn test_table_round_trips_to_same_json() {
    let records = vec![TableEntry {
        position: 1,
        club: "Liverpool".to_string(),
        played: 38,
        won: 25,
        drawn: 9,
        lost: 4,
        goals_for: 86,
        goals_against: 41,
        goal_difference: 45,
        points: 84,
    }];

    let batch = records_to_table(&records, None).unwrap();
    let rows = arrow_to_json(&batch).unwrap();
    assert_eq!(rows, vec![serde_json::to_value(&records[0]).unwrap()]);
}

#[test]
fn test_json_to_arrow_with_nulls() {
    let records = vec![json!({"id": 1, "name": null}), json!({"id": 2, "name": "B"})];
    let batch = json_to_arrow(&records, None).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.column(1).null_count(), 1);
}

// ============================================================================
// Output Shape Tests
// ============================================================================

#[test]
fn test_output_shapes_have_same_rows() {
    let records = Output::render(players(), OutputFormat::Records, Some("719")).unwrap();
    let table = Output::render(players(), OutputFormat::Table, Some("719")).unwrap();

    assert_eq!(records.len(), table.len());
    assert_eq!(records.to_json().unwrap(), table.to_json().unwrap());
    assert!(records.clone().into_table().is_none());
    assert_eq!(records.into_records().unwrap().len(), 2);
    assert!(table.into_table().is_some());
}

#[test]
fn test_stats_output_table_sorted() {
    let mut stats = StatMap::new();
    stats.insert("wins".to_string(), 20.0);
    stats.insert("goals".to_string(), 70.0);

    let output = StatsOutput::render(stats.clone(), OutputFormat::Table, Some("719")).unwrap();
    let StatsOutput::Table(batch) = &output else {
        panic!("Expected table");
    };
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(
        output.to_json().unwrap(),
        json!([{"stat": "goals", "value": 70.0}, {"stat": "wins", "value": 20.0}])
    );

    let map = StatsOutput::render(stats, OutputFormat::Records, None).unwrap();
    assert_eq!(map.to_json().unwrap(), json!({"goals": 70.0, "wins": 20.0}));
}

#[test]
fn test_pretty_format() {
    let rows = vec![StatEntry {
        stat: "goals".to_string(),
        value: 70.0,
    }];
    let batch = records_to_table(&rows, None).unwrap();
    let text = pretty_format(&batch).unwrap();
    assert!(text.contains("stat"));
    assert!(text.contains("goals"));
}

// ============================================================================
// Parquet Writer Tests
// ============================================================================

#[test]
fn test_parquet_writer_config_default() {
    let config = ParquetWriterConfig::new();
    assert_eq!(config.compression(), parquet::basic::Compression::SNAPPY);
    let zstd = ParquetWriterConfig::new().zstd();
    assert!(matches!(
        zstd.compression(),
        parquet::basic::Compression::ZSTD(_)
    ));
}

#[test]
fn test_write_table_to_parquet_keeps_metadata() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("players.parquet");

    let batch = records_to_table(&players(), Some("719")).unwrap();
    let rows = write_table_to_parquet(&path, &batch, None).unwrap();
    assert_eq!(rows, 2);

    let file = std::fs::File::open(&path).unwrap();
    let builder =
        parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
    assert_eq!(
        builder.schema().metadata().get(SEASON_ID_METADATA),
        Some(&"719".to_string())
    );
}

#[test]
fn test_write_table_to_parquet_with_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gzip.parquet");

    let batch = json_to_arrow(&[json!({"id": 1})], None).unwrap();
    let config = ParquetWriterConfig::new()
        .with_compression(parquet::basic::Compression::GZIP(Default::default()));
    assert_eq!(write_table_to_parquet(&path, &batch, Some(&config)).unwrap(), 1);
}

#[test]
fn test_write_table_to_missing_dir_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.parquet");

    let batch = json_to_arrow(&[json!({"id": 1})], None).unwrap();
    assert!(write_table_to_parquet(&path, &batch, None).is_err());
}
