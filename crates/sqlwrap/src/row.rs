//! Row mapping traits and utilities

use crate::error::{SqlWrapError, SqlWrapResult};
use crate::value::Value;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::sync::Arc;

/// A result row, addressable by position and by column name.
///
/// Column names are shared between all rows of one result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<Value>,
}

impl Row {
    pub(crate) fn new(columns: Arc<[String]>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    /// Column names in result order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Values in result order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Get a value by position or column name.
    pub fn get<I: RowIndex>(&self, index: I) -> Option<&Value> {
        index.position(self).map(|i| &self.values[i])
    }

    /// Get a typed value by position or column name.
    pub fn try_get<I: RowIndex, T: FromValue>(&self, index: I) -> SqlWrapResult<T> {
        let label = index.label();
        let pos = index
            .position(self)
            .ok_or_else(|| SqlWrapError::decode(label.clone(), "no such column"))?;
        T::from_value(&self.values[pos]).map_err(|message| SqlWrapError::decode(label, message))
    }

    /// Iterate `(column, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (column, value) in self.iter() {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Something that can locate a column in a [`Row`].
pub trait RowIndex {
    fn position(&self, row: &Row) -> Option<usize>;
    fn label(&self) -> String;
}

impl RowIndex for usize {
    fn position(&self, row: &Row) -> Option<usize> {
        (*self < row.values.len()).then_some(*self)
    }

    fn label(&self) -> String {
        format!("#{self}")
    }
}

impl RowIndex for &str {
    fn position(&self, row: &Row) -> Option<usize> {
        row.columns.iter().position(|c| c == self)
    }

    fn label(&self) -> String {
        (*self).to_string()
    }
}

/// Conversion from a single [`Value`] into a Rust type.
///
/// The error is a human-readable message; [`Row::try_get`] attaches the column.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, String>;
}

fn mismatch(expected: &str, value: &Value) -> String {
    format!("expected {expected}, found {}", value.type_name())
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, String> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> Result<Self, String> {
        value.as_i64().ok_or_else(|| mismatch("INTEGER", value))
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, String> {
        let v = i64::from_value(value)?;
        i32::try_from(v).map_err(|_| format!("integer {v} out of range for i32"))
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, String> {
        i64::from_value(value).map(|v| v != 0)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, String> {
        value.as_f64().ok_or_else(|| mismatch("REAL", value))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, String> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch("TEXT", value))
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: &Value) -> Result<Self, String> {
        value
            .as_blob()
            .map(<[u8]>::to_vec)
            .ok_or_else(|| mismatch("BLOB", value))
    }
}

impl FromValue for chrono::NaiveDate {
    fn from_value(value: &Value) -> Result<Self, String> {
        let text = String::from_value(value)?;
        chrono::NaiveDate::parse_from_str(&text, "%Y-%m-%d").map_err(|e| e.to_string())
    }
}

impl FromValue for chrono::NaiveDateTime {
    fn from_value(value: &Value) -> Result<Self, String> {
        let text = String::from_value(value)?;
        chrono::NaiveDateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S%.f")
            .map_err(|e| e.to_string())
    }
}

impl FromValue for uuid::Uuid {
    fn from_value(value: &Value) -> Result<Self, String> {
        let text = String::from_value(value)?;
        uuid::Uuid::parse_str(&text).map_err(|e| e.to_string())
    }
}

impl FromValue for serde_json::Value {
    fn from_value(value: &Value) -> Result<Self, String> {
        let text = String::from_value(value)?;
        serde_json::from_str(&text).map_err(|e| e.to_string())
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, String> {
        if value.is_null() {
            Ok(None)
        } else {
            T::from_value(value).map(Some)
        }
    }
}

/// Trait for converting a database row into a Rust struct.
///
/// # Example
///
/// ```
/// use sqlwrap::{FromRow, Row, SqlWrapResult};
///
/// struct Person {
///     id: i64,
///     name: Option<String>,
/// }
///
/// impl FromRow for Person {
///     fn from_row(row: &Row) -> SqlWrapResult<Self> {
///         Ok(Self {
///             id: row.try_get("id")?,
///             name: row.try_get("name")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    /// Convert a database row into Self
    fn from_row(row: &Row) -> SqlWrapResult<Self>;
}

impl FromRow for Row {
    fn from_row(row: &Row) -> SqlWrapResult<Self> {
        Ok(row.clone())
    }
}
