//! Reading trip CSV files into a [`DataSet`].

use std::path::Path;

use chrono::NaiveDateTime;

use crate::error::{ExplorerError, ExplorerResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Timestamp layouts accepted for [`DataType::DateTime`] columns, tried in order.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Read the CSV file at `path`.
///
/// - The first record is the header row.
/// - Every header becomes a column, in file order.
/// - Headers named in `hints` are parsed as the hinted type; all others are [`DataType::Utf8`].
/// - Required hint fields missing from the headers fail with
///   [`ExplorerError::SchemaMismatch`]; optional ones are simply absent from the result.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, hints: &Schema) -> ExplorerResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, hints)
}

/// Same as [`ingest_csv_from_path`], for an already-open reader with headers enabled.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    hints: &Schema,
) -> ExplorerResult<DataSet> {
    let headers = rdr.headers()?.clone();

    if let Some(missing) = hints
        .fields
        .iter()
        .find(|f| f.required && !headers.iter().any(|h| h == f.name))
    {
        return Err(ExplorerError::SchemaMismatch {
            message: format!(
                "missing required column '{field}'. headers={:?}",
                headers.iter().collect::<Vec<_>>(),
                field = missing.name
            ),
        });
    }

    let schema = Schema::new(
        headers
            .iter()
            .map(|h| match hints.field(h) {
                Some(hint) => hint.clone(),
                None => Field::optional(h, DataType::Utf8),
            })
            .collect(),
    );

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // File line number: row 1 is the header.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (csv_idx, field) in schema.fields.iter().enumerate() {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, field.data_type, raw)?);
        }
        rows.push(row);
    }

    log::debug!("ingested {} csv rows with {} columns", rows.len(), schema.fields.len());
    Ok(DataSet::new(schema, rows))
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: DataType,
    raw: &str,
) -> ExplorerResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    let parse_error = |message: String| ExplorerError::ParseError {
        row,
        column: column.to_owned(),
        raw: raw.to_owned(),
        message,
    };

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed
            .parse::<i64>()
            .map(Value::Int64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::Float64 => trimmed
            .parse::<f64>()
            .map(Value::Float64)
            .map_err(|e| parse_error(e.to_string())),
        DataType::DateTime => parse_datetime(trimmed).map(Value::DateTime).map_err(parse_error),
    }
}

/// Parse a timestamp using the first matching entry of [`DATETIME_FORMATS`].
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| format!("expected timestamp like 2017-01-01 09:07:57, got '{s}'"))
}
