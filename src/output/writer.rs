//! Parquet file writer
//!
//! Writes a rendered table to a Parquet file, keeping its schema metadata.

use crate::error::{Error, Result};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::{Compression, ZstdLevel};
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// Configuration for Parquet writer
#[derive(Debug, Clone)]
pub struct ParquetWriterConfig {
    compression: Compression,
    row_group_size: usize,
}

impl Default for ParquetWriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::SNAPPY,
            row_group_size: 1024 * 1024,
        }
    }
}

impl ParquetWriterConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set compression
    #[must_use]
    pub fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Use ZSTD compression
    #[must_use]
    pub fn zstd(mut self) -> Self {
        self.compression = Compression::ZSTD(ZstdLevel::default());
        self
    }

    /// Configured compression
    pub fn compression(&self) -> Compression {
        self.compression
    }

    fn build_properties(&self) -> WriterProperties {
        WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build()
    }
}

/// Write a table to a Parquet file, returning the number of rows written
pub fn write_table_to_parquet(
    path: impl AsRef<Path>,
    batch: &RecordBatch,
    config: Option<&ParquetWriterConfig>,
) -> Result<usize> {
    let default_config = ParquetWriterConfig::default();
    let config = config.unwrap_or(&default_config);
    let path = path.as_ref();

    let file = File::create(path)
        .map_err(|e| Error::output(format!("Failed to create {}: {e}", path.display())))?;

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(config.build_properties()))?;
    writer.write(batch)?;
    writer.close()?;

    debug!("Wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(batch.num_rows())
}
