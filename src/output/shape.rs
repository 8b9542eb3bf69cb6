//! Output shapes returned by the client

use super::table::{arrow_to_json, records_to_table, TableRecord};
use crate::error::Result;
use crate::records::StatEntry;
use crate::types::{JsonValue, OutputFormat, StatMap};
use arrow::record_batch::RecordBatch;
use serde::Serialize;

/// A listing, as records or as a table
#[derive(Debug, Clone)]
pub enum Output<T> {
    /// Plain typed records
    Records(Vec<T>),
    /// Arrow table with one column per record field
    Table(RecordBatch),
}

impl<T: TableRecord> Output<T> {
    /// Shape `records` per `format`
    pub fn render(records: Vec<T>, format: OutputFormat, season_id: Option<&str>) -> Result<Self> {
        match format {
            OutputFormat::Records => Ok(Self::Records(records)),
            OutputFormat::Table => Ok(Self::Table(records_to_table(&records, season_id)?)),
        }
    }
}

impl<T: Serialize> Output<T> {
    /// Number of rows
    pub fn len(&self) -> usize {
        match self {
            Self::Records(records) => records.len(),
            Self::Table(batch) => batch.num_rows(),
        }
    }

    /// Whether there are no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The records, if this is the record shape
    pub fn into_records(self) -> Option<Vec<T>> {
        match self {
            Self::Records(records) => Some(records),
            Self::Table(_) => None,
        }
    }

    /// The table, if this is the tabular shape
    pub fn into_table(self) -> Option<RecordBatch> {
        match self {
            Self::Records(_) => None,
            Self::Table(batch) => Some(batch),
        }
    }

    /// Rows as a JSON array
    pub fn to_json(&self) -> Result<JsonValue> {
        match self {
            Self::Records(records) => Ok(serde_json::to_value(records)?),
            Self::Table(batch) => Ok(JsonValue::Array(arrow_to_json(batch)?)),
        }
    }
}

/// Club statistics: one value, the full map, or a stat/value table
#[derive(Debug, Clone)]
pub enum StatsOutput {
    Value(f64),
    Map(StatMap),
    Table(RecordBatch),
}

impl StatsOutput {
    /// Shape a stat map per `format`; tables are sorted by stat name
    pub fn render(stats: StatMap, format: OutputFormat, season_id: Option<&str>) -> Result<Self> {
        match format {
            OutputFormat::Records => Ok(Self::Map(stats)),
            OutputFormat::Table => Ok(Self::Table(records_to_table(
                &StatEntry::from_map(&stats),
                season_id,
            )?)),
        }
    }

    /// JSON rendering
    pub fn to_json(&self) -> Result<JsonValue> {
        match self {
            Self::Value(value) => Ok(serde_json::to_value(value)?),
            Self::Map(stats) => Ok(serde_json::to_value(stats)?),
            Self::Table(batch) => Ok(JsonValue::Array(arrow_to_json(batch)?)),
        }
    }
}

/// Render a table as aligned text
pub fn pretty_format(batch: &RecordBatch) -> Result<String> {
    let table = arrow::util::pretty::pretty_format_batches(std::slice::from_ref(batch))?;
    Ok(table.to_string())
}
