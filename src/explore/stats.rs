//! Descriptive statistics over the working table.
//!
//! Every aggregate returns its own [`StatResult`], so one missing or malformed column degrades
//! a single line of the report instead of aborting it.

use std::io::{self, Write};
use std::time::Instant;

use thiserror::Error;

use crate::processing::{mode, reduce, value_counts, ReduceOp};
use crate::types::{DataSet, DataType, Value};

use super::loader::{
    BIRTH_YEAR, DAY_OF_WEEK, END_STATION, GENDER, MONTH_OF_YEAR, START_END_STATION, START_HOUR,
    START_STATION, TRIP_DURATION, USER_TYPE,
};

const RULE: &str = "----------------------------------------";

/// Why a single aggregate could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatError {
    /// The dataset has no such column (e.g. Washington has no `Gender`).
    #[error("column '{column}' is not available")]
    ColumnUnavailable { column: String },
    /// The column exists but holds no non-null values in this selection.
    #[error("column '{column}' has no values in this selection")]
    NoData { column: String },
    /// The column exists but has the wrong type for this aggregate.
    #[error("column '{column}' does not hold {expected} values")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },
}

/// Result of one aggregate.
pub type StatResult<T> = Result<T, StatError>;

fn unavailable(column: &str) -> StatError {
    StatError::ColumnUnavailable {
        column: column.to_owned(),
    }
}

fn no_data(column: &str) -> StatError {
    StatError::NoData {
        column: column.to_owned(),
    }
}

/// Most frequent value(s) of `column`; ties are all returned.
pub fn most_common(table: &DataSet, column: &str) -> StatResult<Vec<Value>> {
    let modes = mode(table, column).ok_or_else(|| unavailable(column))?;
    if modes.is_empty() {
        return Err(no_data(column));
    }
    Ok(modes)
}

/// Occurrences of each value of `column`, most frequent first.
pub fn counts_by(table: &DataSet, column: &str) -> StatResult<Vec<(Value, usize)>> {
    let counts = value_counts(table, column).ok_or_else(|| unavailable(column))?;
    if counts.is_empty() {
        return Err(no_data(column));
    }
    Ok(counts)
}

/// Total (`ReduceOp::Sum`) or average (`ReduceOp::Mean`) trip duration in minutes.
pub fn trip_minutes(table: &DataSet, op: ReduceOp) -> StatResult<f64> {
    let field = table
        .schema
        .field(TRIP_DURATION)
        .ok_or_else(|| unavailable(TRIP_DURATION))?;
    if !matches!(field.data_type, DataType::Float64 | DataType::Int64) {
        return Err(StatError::TypeMismatch {
            column: TRIP_DURATION.to_owned(),
            expected: "numeric",
        });
    }
    match reduce(table, TRIP_DURATION, op) {
        Some(Value::Float64(secs)) => Ok(secs / 60.0),
        Some(Value::Int64(secs)) => Ok(secs as f64 / 60.0),
        _ => Err(no_data(TRIP_DURATION)),
    }
}

/// Earliest, latest and most common birth year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthYears {
    /// Smallest year.
    pub earliest: i64,
    /// Largest year.
    pub latest: i64,
    /// Most frequent year(s).
    pub most_common: Vec<i64>,
}

/// Birth-year summary; requires the coerced Int64 `Birth Year` column.
pub fn birth_years(table: &DataSet) -> StatResult<BirthYears> {
    let field = table
        .schema
        .field(BIRTH_YEAR)
        .ok_or_else(|| unavailable(BIRTH_YEAR))?;
    if field.data_type != DataType::Int64 {
        return Err(StatError::TypeMismatch {
            column: BIRTH_YEAR.to_owned(),
            expected: "integer",
        });
    }
    let year = |op| match reduce(table, BIRTH_YEAR, op) {
        Some(Value::Int64(y)) => Ok(y),
        _ => Err(no_data(BIRTH_YEAR)),
    };
    Ok(BirthYears {
        earliest: year(ReduceOp::Min)?,
        latest: year(ReduceOp::Max)?,
        most_common: most_common(table, BIRTH_YEAR)?
            .into_iter()
            .filter_map(|v| match v {
                Value::Int64(y) => Some(y),
                _ => None,
            })
            .collect(),
    })
}

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeStats {
    pub month: StatResult<Vec<Value>>,
    pub day_of_week: StatResult<Vec<Value>>,
    pub start_hour: StatResult<Vec<Value>>,
}

impl TimeStats {
    pub fn compute(table: &DataSet) -> Self {
        Self {
            month: most_common(table, MONTH_OF_YEAR),
            day_of_week: most_common(table, DAY_OF_WEEK),
            start_hour: most_common(table, START_HOUR),
        }
    }
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq)]
pub struct StationStats {
    pub start: StatResult<Vec<Value>>,
    pub end: StatResult<Vec<Value>>,
    pub trip: StatResult<Vec<Value>>,
}

impl StationStats {
    pub fn compute(table: &DataSet) -> Self {
        Self {
            start: most_common(table, START_STATION),
            end: most_common(table, END_STATION),
            trip: most_common(table, START_END_STATION),
        }
    }
}

/// Total and average trip duration.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationStats {
    pub total_minutes: StatResult<f64>,
    pub mean_minutes: StatResult<f64>,
}

impl DurationStats {
    pub fn compute(table: &DataSet) -> Self {
        Self {
            total_minutes: trip_minutes(table, ReduceOp::Sum),
            mean_minutes: trip_minutes(table, ReduceOp::Mean),
        }
    }
}

/// Rider breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct UserStats {
    pub user_types: StatResult<Vec<(Value, usize)>>,
    pub genders: StatResult<Vec<(Value, usize)>>,
    pub birth_years: StatResult<BirthYears>,
}

impl UserStats {
    pub fn compute(table: &DataSet) -> Self {
        Self {
            user_types: counts_by(table, USER_TYPE),
            genders: counts_by(table, GENDER),
            birth_years: birth_years(table),
        }
    }
}

/// Compute and print all four report sections.
///
/// # Errors
///
/// Only write failures on `out`; aggregate failures are printed as degraded lines.
pub fn write_report<W: Write>(out: &mut W, table: &DataSet) -> io::Result<()> {
    timed_section(out, "Calculating The Most Frequent Times of Travel...", |out| {
        write_time_stats(out, &TimeStats::compute(table))
    })?;
    timed_section(out, "Calculating The Most Popular Stations and Trip...", |out| {
        write_station_stats(out, &StationStats::compute(table))
    })?;
    timed_section(out, "Calculating Trip Duration...", |out| {
        write_duration_stats(out, &DurationStats::compute(table))
    })?;
    timed_section(out, "Calculating User Stats...", |out| {
        write_user_stats(out, &UserStats::compute(table))
    })
}

fn timed_section<W: Write>(
    out: &mut W,
    title: &str,
    body: impl FnOnce(&mut W) -> io::Result<()>,
) -> io::Result<()> {
    let started = Instant::now();
    writeln!(out, "\n{title}\n")?;
    body(out)?;
    writeln!(out, "\nThis took {:.6} seconds.", started.elapsed().as_secs_f64())?;
    writeln!(out, "{RULE}")
}

pub fn write_time_stats<W: Write>(out: &mut W, stats: &TimeStats) -> io::Result<()> {
    let what = "frequency stats";
    write_line(out, "Most Common Month", &stats.month, what, |v| join_values(v))?;
    write_line(out, "Most Common Day of Week", &stats.day_of_week, what, |v| join_values(v))?;
    write_line(out, "Most Common Start Hour", &stats.start_hour, what, |v| join_values(v))
}

pub fn write_station_stats<W: Write>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    let what = "station stats";
    write_line(out, "Most Common Start Location", &stats.start, what, |v| join_values(v))?;
    write_line(out, "Most Common End Location", &stats.end, what, |v| join_values(v))?;
    write_line(out, "Most Common 'Start - End' Locations", &stats.trip, what, |v| join_values(v))
}

pub fn write_duration_stats<W: Write>(out: &mut W, stats: &DurationStats) -> io::Result<()> {
    let what = "duration stats";
    write_line(out, "Total Travel Time (in Minutes)", &stats.total_minutes, what, |m| format!("{m:.2}"))?;
    write_line(out, "Average Travel Time (in Minutes)", &stats.mean_minutes, what, |m| format!("{m:.2}"))
}

pub fn write_user_stats<W: Write>(out: &mut W, stats: &UserStats) -> io::Result<()> {
    writeln!(out, "User Counts by Account Type:")?;
    match &stats.user_types {
        Ok(counts) => write_counts(out, counts)?,
        Err(e) => degraded(out, "account type stats", e)?,
    }

    writeln!(out, "\nUser Counts by Gender:")?;
    match &stats.genders {
        Ok(counts) => write_counts(out, counts)?,
        Err(StatError::ColumnUnavailable { .. }) => {
            writeln!(out, "Gender is not available for this given set of data.")?;
        }
        Err(e) => degraded(out, "gender stats", e)?,
    }

    writeln!(out, "\nBirth Year Stats ->")?;
    match &stats.birth_years {
        Ok(years) => {
            writeln!(out, "Earliest Birth Year: {}", years.earliest)?;
            writeln!(out, "Latest Birth Year: {}", years.latest)?;
            let common: Vec<String> = years.most_common.iter().map(i64::to_string).collect();
            writeln!(out, "Most Common Birth Year: {}", common.join(", "))?;
        }
        Err(StatError::ColumnUnavailable { .. }) => {
            writeln!(out, "Birth Year is not available for this given set of data.")?;
        }
        Err(e) => degraded(out, "birth year stats", e)?,
    }
    Ok(())
}

fn write_line<W: Write, T>(
    out: &mut W,
    label: &str,
    result: &StatResult<T>,
    what: &str,
    render: impl FnOnce(&T) -> String,
) -> io::Result<()> {
    match result {
        Ok(v) => writeln!(out, "{label}: {}", render(v)),
        Err(e) => degraded(out, what, e),
    }
}

fn degraded<W: Write>(out: &mut W, what: &str, error: &StatError) -> io::Result<()> {
    log::warn!("skipping {what}: {error}");
    writeln!(out, "Error collecting {what}. Moving on.")?;
    writeln!(out, "Unexpected: {error}")
}

fn write_counts<W: Write>(out: &mut W, counts: &[(Value, usize)]) -> io::Result<()> {
    let labels: Vec<String> = counts.iter().map(|(v, _)| v.to_string()).collect();
    let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    for (label, (_, n)) in labels.iter().zip(counts) {
        writeln!(out, "{label:<width$}    {n}")?;
    }
    Ok(())
}

fn join_values(values: &[Value]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Field, Schema};

    fn text(s: &str) -> Value {
        Value::Utf8(s.to_string())
    }

    fn chicago_like() -> DataSet {
        let schema = Schema::new(vec![
            Field::optional(TRIP_DURATION, DataType::Float64),
            Field::optional(START_STATION, DataType::Utf8),
            Field::optional(USER_TYPE, DataType::Utf8),
            Field::optional(GENDER, DataType::Utf8),
            Field::optional(BIRTH_YEAR, DataType::Int64),
        ]);
        DataSet::new(
            schema,
            vec![
                vec![Value::Float64(600.0), text("Canal St"), text("Subscriber"), text("Male"), Value::Int64(1985)],
                vec![Value::Float64(1200.0), text("Canal St"), text("Customer"), Value::Null, Value::Null],
                vec![Value::Float64(300.0), text("Clark St"), text("Subscriber"), text("Female"), Value::Int64(1985)],
                vec![Value::Null, text("Clark St"), text("Subscriber"), text("Male"), Value::Int64(1971)],
            ],
        )
    }

    fn washington_like() -> DataSet {
        let schema = Schema::new(vec![
            Field::optional(TRIP_DURATION, DataType::Float64),
            Field::optional(USER_TYPE, DataType::Utf8),
        ]);
        DataSet::new(schema, vec![vec![Value::Float64(60.0), text("Customer")]])
    }

    #[test]
    fn trip_minutes_converts_seconds() {
        let ds = chicago_like();
        assert_eq!(trip_minutes(&ds, ReduceOp::Sum), Ok(35.0));
        assert_eq!(trip_minutes(&ds, ReduceOp::Mean), Ok(700.0 / 60.0));
    }

    #[test]
    fn trip_minutes_reports_missing_and_empty() {
        let empty = chicago_like().filter_rows(|_| false);
        assert_eq!(
            trip_minutes(&empty, ReduceOp::Sum),
            Err(StatError::NoData {
                column: TRIP_DURATION.to_string()
            })
        );
        let schema = Schema::new(vec![Field::new(USER_TYPE, DataType::Utf8)]);
        let no_col = DataSet::new(schema, vec![]);
        assert!(matches!(
            trip_minutes(&no_col, ReduceOp::Mean),
            Err(StatError::ColumnUnavailable { .. })
        ));
    }

    #[test]
    fn most_common_keeps_ties() {
        let ds = chicago_like();
        assert_eq!(
            most_common(&ds, START_STATION),
            Ok(vec![text("Canal St"), text("Clark St")])
        );
    }

    #[test]
    fn birth_years_summarises_non_null_years() {
        let ds = chicago_like();
        assert_eq!(
            birth_years(&ds),
            Ok(BirthYears {
                earliest: 1971,
                latest: 1985,
                most_common: vec![1985],
            })
        );
    }

    #[test]
    fn birth_years_requires_integer_column() {
        let schema = Schema::new(vec![Field::new(BIRTH_YEAR, DataType::Utf8)]);
        let ds = DataSet::new(schema, vec![vec![text("1985")]]);
        assert!(matches!(birth_years(&ds), Err(StatError::TypeMismatch { .. })));
    }

    #[test]
    fn user_stats_for_city_without_demographics() {
        let stats = UserStats::compute(&washington_like());
        assert_eq!(stats.user_types, Ok(vec![(text("Customer"), 1)]));
        assert!(matches!(stats.genders, Err(StatError::ColumnUnavailable { .. })));
        assert!(matches!(stats.birth_years, Err(StatError::ColumnUnavailable { .. })));

        let mut out = Vec::new();
        write_user_stats(&mut out, &stats).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Customer    1"));
        assert!(out.contains("Gender is not available for this given set of data."));
        assert!(out.contains("Birth Year is not available for this given set of data."));
        assert!(!out.contains("Moving on"));
    }

    #[test]
    fn user_stats_prints_counts_and_years() {
        let mut out = Vec::new();
        write_user_stats(&mut out, &UserStats::compute(&chicago_like())).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Subscriber    3\nCustomer      1\n"));
        assert!(out.contains("Male      2\nFemale    1\n"));
        assert!(out.contains("Earliest Birth Year: 1971"));
        assert!(out.contains("Latest Birth Year: 1985"));
        assert!(out.contains("Most Common Birth Year: 1985"));
    }

    #[test]
    fn failed_aggregate_does_not_stop_the_section() {
        // No derived time columns at all: every line degrades, none aborts.
        let mut out = Vec::new();
        write_time_stats(&mut out, &TimeStats::compute(&washington_like())).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.matches("Error collecting frequency stats. Moving on.").count(), 3);
    }

    #[test]
    fn report_runs_every_section() {
        let mut out = Vec::new();
        write_report(&mut out, &washington_like()).unwrap();
        let out = String::from_utf8(out).unwrap();
        for title in [
            "Calculating The Most Frequent Times of Travel...",
            "Calculating The Most Popular Stations and Trip...",
            "Calculating Trip Duration...",
            "Calculating User Stats...",
        ] {
            assert!(out.contains(title), "missing section {title}");
        }
        assert!(out.contains("Total Travel Time (in Minutes): 1.00"));
        assert_eq!(out.matches(RULE).count(), 4);
    }
}
