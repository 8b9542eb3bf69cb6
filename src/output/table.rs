//! Record to Arrow conversion
//!
//! Typed records are serialized to JSON objects and then laid out into
//! columns. Record types declare their schema so that a column keeps its type
//! even when every value in it is null. Dynamic rows use an inferred schema
//! whose column order follows first appearance.

use crate::error::{Error, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, NullArray, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Schema metadata key carrying the season a table was fetched for
pub const SEASON_ID_METADATA: &str = "season_id";

/// A record with a fixed tabular layout
pub trait TableRecord: Serialize {
    /// Columns in serialized field order
    fn fields() -> Vec<Field>;

    /// Schema built from [`TableRecord::fields`]
    fn schema() -> Schema {
        Schema::new(Self::fields())
    }
}

/// Render typed records as a table, tagging it with `season_id`
pub fn records_to_table<T: TableRecord>(
    records: &[T],
    season_id: Option<&str>,
) -> Result<RecordBatch> {
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let schema = with_season_metadata(T::schema(), season_id);
    json_to_arrow(&values, Some(&schema))
}

/// Attach season metadata to a schema
pub fn with_season_metadata(schema: Schema, season_id: Option<&str>) -> Schema {
    match season_id {
        Some(id) => {
            let mut metadata = schema.metadata().clone();
            metadata.insert(SEASON_ID_METADATA.to_string(), id.to_string());
            schema.with_metadata(metadata)
        }
        None => schema,
    }
}

/// Season id a table was tagged with
pub fn table_season_id(batch: &RecordBatch) -> Option<String> {
    batch.schema().metadata().get(SEASON_ID_METADATA).cloned()
}

/// Infer an Arrow schema from a set of JSON records
///
/// Columns appear in the order their keys are first seen. All fields are
/// nullable.
pub fn infer_schema(records: &[Value]) -> Schema {
    let mut order: Vec<String> = Vec::new();
    let mut field_types: HashMap<String, DataType> = HashMap::new();

    for record in records {
        if let Value::Object(obj) = record {
            for (key, value) in obj {
                let inferred_type = infer_type(value);
                match field_types.get_mut(key) {
                    Some(existing) => *existing = merge_types(existing, &inferred_type),
                    None => {
                        order.push(key.clone());
                        field_types.insert(key.clone(), inferred_type);
                    }
                }
            }
        }
    }

    let fields: Vec<Field> = order
        .into_iter()
        .map(|name| {
            let dtype = field_types.remove(&name).unwrap_or(DataType::Null);
            Field::new(name, dtype, true)
        })
        .collect();

    Schema::new(fields)
}

/// Convert JSON records to an Arrow RecordBatch
///
/// Uses the provided schema or infers one from the data.
pub fn json_to_arrow(records: &[Value], schema: Option<&Schema>) -> Result<RecordBatch> {
    let schema = match schema {
        Some(schema) => schema.clone(),
        None => infer_schema(records),
    };

    if records.is_empty() {
        return Ok(RecordBatch::new_empty(Arc::new(schema)));
    }

    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len());

    for field in schema.fields() {
        let values: Vec<Option<&Value>> = records
            .iter()
            .map(|record| match record {
                Value::Object(obj) => obj.get(field.name()),
                _ => None,
            })
            .collect();

        columns.push(build_array(&values, field.data_type()));
    }

    RecordBatch::try_new(Arc::new(schema), columns)
        .map_err(|e| Error::output(format!("Failed to create RecordBatch: {e}")))
}

/// Infer Arrow DataType from a JSON value
fn infer_type(value: &Value) -> DataType {
    match value {
        Value::Null => DataType::Null,
        Value::Bool(_) => DataType::Boolean,
        Value::Number(n) => {
            if n.is_i64() {
                DataType::Int64
            } else {
                DataType::Float64
            }
        }
        // Nested values are rendered as their JSON text
        Value::String(_) | Value::Array(_) | Value::Object(_) => DataType::Utf8,
    }
}

/// Merge two data types into a compatible type
fn merge_types(type1: &DataType, type2: &DataType) -> DataType {
    match (type1, type2) {
        (a, b) if a == b => a.clone(),

        // Null can merge with anything
        (DataType::Null, other) | (other, DataType::Null) => other.clone(),

        // Numbers can merge (prefer Float64 for mixed)
        (DataType::Int64, DataType::Float64) | (DataType::Float64, DataType::Int64) => {
            DataType::Float64
        }

        _ => DataType::Utf8,
    }
}

/// Build an Arrow array from JSON values
fn build_array(values: &[Option<&Value>], data_type: &DataType) -> ArrayRef {
    match data_type {
        DataType::Null => Arc::new(NullArray::new(values.len())),

        DataType::Boolean => {
            let arr: BooleanArray = values.iter().map(|v| v.and_then(Value::as_bool)).collect();
            Arc::new(arr)
        }

        DataType::Int64 => {
            let arr: Int64Array = values.iter().map(|v| v.and_then(Value::as_i64)).collect();
            Arc::new(arr)
        }

        DataType::Float64 => {
            let arr: Float64Array = values.iter().map(|v| v.and_then(Value::as_f64)).collect();
            Arc::new(arr)
        }

        _ => {
            let arr: StringArray = values
                .iter()
                .map(|v| {
                    v.and_then(|v| match v {
                        Value::Null => None,
                        Value::String(s) => Some(s.clone()),
                        _ => Some(v.to_string()),
                    })
                })
                .collect();
            Arc::new(arr)
        }
    }
}

/// Convert an Arrow RecordBatch to JSON records
///
/// Returns a vector of JSON objects, one per row in the batch.
pub fn arrow_to_json(batch: &RecordBatch) -> Result<Vec<Value>> {
    let schema = batch.schema();
    let num_rows = batch.num_rows();
    let mut records = Vec::with_capacity(num_rows);

    for row_idx in 0..num_rows {
        let mut record = serde_json::Map::new();

        for (col_idx, field) in schema.fields().iter().enumerate() {
            let column = batch.column(col_idx);
            let value = array_value_to_json(column.as_ref(), row_idx)?;
            record.insert(field.name().clone(), value);
        }

        records.push(Value::Object(record));
    }

    Ok(records)
}

/// Convert a single array element to JSON
fn array_value_to_json(array: &dyn arrow::array::Array, row: usize) -> Result<Value> {
    use arrow::array::Array;

    if array.is_null(row) {
        return Ok(Value::Null);
    }

    match array.data_type() {
        DataType::Null => Ok(Value::Null),

        DataType::Boolean => {
            let arr = downcast::<BooleanArray>(array)?;
            Ok(Value::Bool(arr.value(row)))
        }

        DataType::Int64 => {
            let arr = downcast::<Int64Array>(array)?;
            Ok(Value::Number(arr.value(row).into()))
        }

        DataType::Float64 => {
            let arr = downcast::<Float64Array>(array)?;
            Ok(serde_json::Number::from_f64(arr.value(row)).map_or(Value::Null, Value::Number))
        }

        DataType::Utf8 => {
            let arr = downcast::<StringArray>(array)?;
            Ok(Value::String(arr.value(row).to_string()))
        }

        _ => {
            let text = arrow::util::display::array_value_to_string(array, row)?;
            Ok(Value::String(text))
        }
    }
}

fn downcast<T: 'static>(array: &dyn arrow::array::Array) -> Result<&T> {
    array.as_any().downcast_ref::<T>().ok_or_else(|| {
        Error::output(format!(
            "Failed to downcast {} column to {}",
            array.data_type(),
            std::any::type_name::<T>()
        ))
    })
}
