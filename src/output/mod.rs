//! Output module
//!
//! Handles the two shapes a listing can be returned in and the Arrow and
//! Parquet plumbing behind the tabular one.
//!
//! # Overview
//!
//! This module provides utilities for:
//! - Rendering typed records as plain records or an Arrow RecordBatch
//! - Converting JSON rows to Arrow and back
//! - Pretty-printing and writing Parquet files

mod shape;
mod table;
mod writer;

pub use shape::{pretty_format, Output, StatsOutput};
pub use table::{
    arrow_to_json, infer_schema, json_to_arrow, records_to_table, table_season_id,
    with_season_metadata, TableRecord, SEASON_ID_METADATA,
};
pub use writer::{write_table_to_parquet, ParquetWriterConfig};

#[cfg(test)]
mod tests;
