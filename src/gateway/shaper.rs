//! Converts engine result sets into JSON row objects

use rusqlite::types::Value as SqlValue;
use serde_json::{Map, Number, Value};

use crate::store::TabularResult;

/// One result row: column name to value, in column order
pub type Row = Map<String, Value>;

/// Shape the first result set into rows.
///
/// Later result sets from multi-statement input are ignored.
pub fn shape(result: &TabularResult) -> Vec<Row> {
    let Some(set) = result.first() else {
        return Vec::new();
    };

    set.rows
        .iter()
        .map(|values| {
            set.columns
                .iter()
                .zip(values)
                .map(|(column, value)| (column.clone(), to_json(value)))
                .collect()
        })
        .collect()
}

/// Engine scalar to JSON. Blobs become arrays of byte values; non-finite
/// reals have no JSON form and become null.
fn to_json(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(i) => Value::from(*i),
        SqlValue::Real(f) => Number::from_f64(*f).map_or(Value::Null, Value::Number),
        SqlValue::Text(s) => Value::String(s.clone()),
        SqlValue::Blob(bytes) => Value::Array(bytes.iter().map(|b| Value::from(*b)).collect()),
    }
}
