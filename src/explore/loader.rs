//! Dataset loading, column derivation and month/day filtering.

use std::path::PathBuf;

use chrono::Timelike;

use crate::config::ExplorerConfig;
use crate::error::{ExplorerError, ExplorerResult};
use crate::ingestion::{ingest_from_path, IngestionOptions, LoadObserver};
use crate::processing::{derive, filter_eq, try_convert_column};
use crate::resolver::{ALL_DAYS, ALL_MONTHS};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Trip start timestamp (source column).
pub const START_TIME: &str = "Start Time";
/// Trip end timestamp (source column).
pub const END_TIME: &str = "End Time";
/// Trip length in seconds (source column).
pub const TRIP_DURATION: &str = "Trip Duration";
/// Origin station (source column).
pub const START_STATION: &str = "Start Station";
/// Destination station (source column).
pub const END_STATION: &str = "End Station";
/// Subscriber/customer classification (source column).
pub const USER_TYPE: &str = "User Type";
/// Rider gender (source column, not in every city).
pub const GENDER: &str = "Gender";
/// Rider birth year (source column, not in every city).
pub const BIRTH_YEAR: &str = "Birth Year";

/// English month name of the start time (derived).
pub const MONTH_OF_YEAR: &str = "Month of Year";
/// English weekday name of the start time (derived).
pub const DAY_OF_WEEK: &str = "Day of Week";
/// Hour of day (0-23) of the start time (derived).
pub const START_HOUR: &str = "Start Hour";
/// `"<start station> - <end station>"` (derived).
pub const START_END_STATION: &str = "Start and End Station";

/// Static mapping from canonical city key to its CSV file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRegistry {
    files: Vec<(String, String)>,
}

impl Default for DatasetRegistry {
    fn default() -> Self {
        Self::new([
            ("Chicago", "chicago.csv"),
            ("New York City", "new_york_city.csv"),
            ("Washington", "washington.csv"),
        ])
    }
}

impl DatasetRegistry {
    /// Build a registry from `(key, file name)` pairs.
    pub fn new<K: Into<String>, F: Into<String>>(files: impl IntoIterator<Item = (K, F)>) -> Self {
        Self {
            files: files.into_iter().map(|(k, f)| (k.into(), f.into())).collect(),
        }
    }

    /// File name registered for `key`.
    pub fn file_name(&self, key: &str) -> Option<&str> {
        self.files
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, f)| f.as_str())
    }

    /// Full path of the file for `key` inside the configured data directory.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::UnknownDataset`] for a key that was never registered.
    pub fn path_for(&self, config: &ExplorerConfig, key: &str) -> ExplorerResult<PathBuf> {
        let file = self.file_name(key).ok_or_else(|| ExplorerError::UnknownDataset {
            key: key.to_owned(),
        })?;
        Ok(config.data_dir.join(file))
    }
}

/// Column types applied while reading a trip file. Unlisted columns stay text.
pub fn trip_schema_hints() -> Schema {
    Schema::new(vec![
        Field::new(START_TIME, DataType::DateTime),
        Field::new(END_TIME, DataType::DateTime),
        Field::optional(TRIP_DURATION, DataType::Float64),
        // Sources store years as floats ("1992.0"); coerced to Int64 after load.
        Field::optional(BIRTH_YEAR, DataType::Float64),
    ])
}

/// Load the dataset registered for `dataset_key` and add the derived columns.
///
/// # Errors
///
/// - [`ExplorerError::UnknownDataset`] if the key is not registered (a caller bug).
/// - [`ExplorerError::Io`] / [`ExplorerError::Csv`] if the file cannot be read.
/// - [`ExplorerError::SchemaMismatch`] / [`ExplorerError::ParseError`] for malformed content.
pub fn load(
    config: &ExplorerConfig,
    registry: &DatasetRegistry,
    dataset_key: &str,
    observer: Option<&dyn LoadObserver>,
) -> ExplorerResult<DataSet> {
    let path = registry.path_for(config, dataset_key)?;
    log::debug!("loading {dataset_key} from {}", path.display());

    let options = IngestionOptions {
        observer,
        ..Default::default()
    };
    let raw = ingest_from_path(dataset_key, &path, &trip_schema_hints(), options)?;
    prepare(raw)
}

/// Add derived columns to a freshly ingested trip table and coerce `Birth Year`.
///
/// Derivation order is fixed: month name, weekday name, start hour, then the combined station
/// label. Rows with a null start time get null derived values.
///
/// # Errors
///
/// - [`ExplorerError::SchemaMismatch`] if `Start Time` is absent or not a timestamp column.
/// - [`ExplorerError::ParseError`] if a birth year is not a whole number.
pub fn prepare(raw: DataSet) -> ExplorerResult<DataSet> {
    let start_idx = raw
        .schema
        .index_of(START_TIME)
        .filter(|&i| raw.schema.fields[i].data_type == DataType::DateTime)
        .ok_or_else(|| ExplorerError::SchemaMismatch {
            message: format!("'{START_TIME}' must be a timestamp column"),
        })?;

    let start = move |row: &[Value]| row.get(start_idx).and_then(Value::as_datetime).copied();

    let table = derive(raw, Field::optional(MONTH_OF_YEAR, DataType::Utf8), |row| {
        start(row).map_or(Value::Null, |dt| Value::Utf8(dt.format("%B").to_string()))
    });
    let table = derive(table, Field::optional(DAY_OF_WEEK, DataType::Utf8), |row| {
        start(row).map_or(Value::Null, |dt| Value::Utf8(dt.format("%A").to_string()))
    });
    let table = derive(table, Field::optional(START_HOUR, DataType::Int64), |row| {
        start(row).map_or(Value::Null, |dt| Value::Int64(i64::from(dt.hour())))
    });

    let from_idx = table.schema.index_of(START_STATION);
    let to_idx = table.schema.index_of(END_STATION);
    let table = derive(table, Field::optional(START_END_STATION, DataType::Utf8), |row| {
        match (text_at(row, from_idx), text_at(row, to_idx)) {
            (Some(from), Some(to)) => Value::Utf8(format!("{from} - {to}")),
            _ => Value::Null,
        }
    });

    let table = try_convert_column(
        table,
        BIRTH_YEAR,
        Field::optional(BIRTH_YEAR, DataType::Int64),
        coerce_birth_year,
    )?;

    log::debug!(
        "prepared {} rows, columns={:?}",
        table.row_count(),
        table.schema.field_names().collect::<Vec<_>>()
    );
    Ok(table)
}

fn text_at(row: &[Value], idx: Option<usize>) -> Option<&str> {
    idx.and_then(|i| row.get(i)).and_then(Value::as_str)
}

fn coerce_birth_year(row_idx: usize, value: &Value) -> ExplorerResult<Value> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Int64(y) => Ok(Value::Int64(*y)),
        Value::Float64(y) if y.is_finite() && y.fract() == 0.0 => Ok(Value::Int64(*y as i64)),
        other => Err(ExplorerError::ParseError {
            // Header is row 1.
            row: row_idx + 2,
            column: BIRTH_YEAR.to_owned(),
            raw: other.to_string(),
            message: "expected a whole-number year".to_owned(),
        }),
    }
}

/// Keep rows whose month name equals `month_key` and whose weekday name equals `day_key`.
///
/// [`ALL_MONTHS`] / [`ALL_DAYS`] disable the corresponding filter. Columns are never dropped.
///
/// # Errors
///
/// Returns [`ExplorerError::SchemaMismatch`] if an active filter's derived column is missing
/// (i.e. the table did not come from [`prepare`]).
pub fn filter(table: &DataSet, month_key: &str, day_key: &str) -> ExplorerResult<DataSet> {
    let by_month = narrow(table, MONTH_OF_YEAR, month_key, ALL_MONTHS)?;
    let by_day = match by_month {
        Some(ds) => narrow(&ds, DAY_OF_WEEK, day_key, ALL_DAYS)?.unwrap_or(ds),
        None => narrow(table, DAY_OF_WEEK, day_key, ALL_DAYS)?.unwrap_or_else(|| table.clone()),
    };
    log::debug!(
        "filter month={month_key:?} day={day_key:?}: {} of {} rows",
        by_day.row_count(),
        table.row_count()
    );
    Ok(by_day)
}

fn narrow(table: &DataSet, column: &str, key: &str, sentinel: &str) -> ExplorerResult<Option<DataSet>> {
    if key == sentinel {
        return Ok(None);
    }
    filter_eq(table, column, &Value::Utf8(key.to_owned()))
        .map(Some)
        .ok_or_else(|| ExplorerError::SchemaMismatch {
            message: format!("cannot filter on missing column '{column}'"),
        })
}
