//! The in-memory table a trip file is loaded into.
//!
//! A [`DataSet`] pairs a [`Schema`] (ordered, typed [`Field`]s) with row-major [`Value`]
//! cells. Every row has exactly one cell per field.

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Column type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Whole numbers (hours, birth years).
    Int64,
    /// Measurements such as trip duration in seconds.
    Float64,
    /// Free text (stations, user types, derived names).
    Utf8,
    /// Naive local timestamp (`Start Time`, `End Time`).
    DateTime,
}

/// One column of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Header text as it appears in the source file.
    pub name: String,
    pub data_type: DataType,
    /// Ingestion fails when a required column is missing from the file.
    pub required: bool,
}

impl Field {
    /// A column that must be present.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            required: true,
        }
    }

    /// A column that is typed when present but may be absent (e.g. `Gender` in Washington).
    pub fn optional(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            required: false,
            ..Self::new(name, data_type)
        }
    }
}

/// Column layout of a [`DataSet`], in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub fields: Vec<Field>,
}

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Column names, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Position of the column called `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// The column called `name`.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.index_of(name).map(|i| &self.fields[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// One cell.
///
/// Serializes untagged, so a row renders as plain JSON scalars and `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Empty cell in the source, or a derived value with no input.
    Null,
    Int64(i64),
    Float64(f64),
    Utf8(String),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Text payload, if this is a [`Value::Utf8`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Utf8(s) => Some(s),
            _ => None,
        }
    }

    /// Timestamp payload, if this is a [`Value::DateTime`].
    pub fn as_datetime(&self) -> Option<&NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("<null>"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Utf8(s) => f.write_str(s),
            Self::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

static NULL: Value = Value::Null;

/// A loaded (and possibly derived and filtered) trip table.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSet {
    pub schema: Schema,
    /// `rows[r][c]` is the cell of row `r` in column `schema.fields[c]`.
    pub rows: Vec<Vec<Value>>,
}

impl DataSet {
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Self {
        Self { schema, rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of the column called `name`, top to bottom, or `None` if there is no such column.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value> + use<'a>> {
        let idx = self.schema.index_of(name)?;
        Some(self.rows.iter().map(move |row| row.get(idx).unwrap_or(&NULL)))
    }

    /// Copy of this table with only the rows `keep` accepts.
    pub fn filter_rows<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&[Value]) -> bool,
    {
        Self {
            schema: self.schema.clone(),
            rows: self.rows.iter().filter(|row| keep(row.as_slice())).cloned().collect(),
        }
    }

    /// Add a column computed from each row, or recompute it if `field.name` already exists.
    pub fn with_column<F>(mut self, field: Field, mut compute: F) -> Self
    where
        F: FnMut(&[Value]) -> Value,
    {
        let existing = self.schema.index_of(&field.name);
        for row in &mut self.rows {
            let cell = compute(row.as_slice());
            match existing {
                Some(idx) => row[idx] = cell,
                None => row.push(cell),
            }
        }
        match existing {
            Some(idx) => self.schema.fields[idx] = field,
            None => self.schema.fields.push(field),
        }
        self
    }
}
