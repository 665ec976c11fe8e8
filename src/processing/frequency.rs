//! Frequency operations (mode, value counts) for [`crate::types::DataSet`].

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::types::{DataSet, Value};

/// Total-order grouping key for non-null values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum GroupKey {
    Int(i64),
    Float(i64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl GroupKey {
    fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::Int64(i) => Some(Self::Int(*i)),
            Value::Float64(f) => Some(Self::Float(total_order_bits(*f))),
            Value::Utf8(s) => Some(Self::Text(s.clone())),
            Value::DateTime(dt) => Some(Self::DateTime(*dt)),
        }
    }
}

// Same ordering as `f64::total_cmp`.
fn total_order_bits(f: f64) -> i64 {
    let bits = f.to_bits() as i64;
    bits ^ ((((bits >> 63) as u64) >> 1) as i64)
}

fn tally(dataset: &DataSet, column: &str) -> Option<BTreeMap<GroupKey, (Value, usize)>> {
    let mut counts: BTreeMap<GroupKey, (Value, usize)> = BTreeMap::new();
    for value in dataset.column(column)? {
        if let Some(key) = GroupKey::of(value) {
            counts.entry(key).or_insert_with(|| (value.clone(), 0)).1 += 1;
        }
    }
    Some(counts)
}

/// Most frequent non-null values of `column`.
///
/// Every value tied for the highest count is returned, in ascending order.
/// Returns `None` if `column` does not exist and an empty vector if it holds no non-null values.
pub fn mode(dataset: &DataSet, column: &str) -> Option<Vec<Value>> {
    let counts = tally(dataset, column)?;
    let best = counts.values().map(|(_, n)| *n).max().unwrap_or(0);
    Some(
        counts
            .into_values()
            .filter(|(_, n)| *n == best)
            .map(|(v, _)| v)
            .collect(),
    )
}

/// Occurrence count of every distinct non-null value of `column`.
///
/// Sorted by descending count; ties keep ascending value order.
/// Returns `None` if `column` does not exist.
pub fn value_counts(dataset: &DataSet, column: &str) -> Option<Vec<(Value, usize)>> {
    let mut counts: Vec<(Value, usize)> = tally(dataset, column)?.into_values().collect();
    // Stable sort keeps the BTreeMap's ascending value order among ties.
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Some(counts)
}

#[cfg(test)]
mod tests {
    use super::{mode, value_counts};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn trips() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("user_type", DataType::Utf8),
            Field::new("hour", DataType::Int64),
            Field::new("duration", DataType::Float64),
        ]);
        let s = |v: &str| Value::Utf8(v.to_string());
        let rows = vec![
            vec![s("Subscriber"), Value::Int64(8), Value::Float64(-1.5)],
            vec![s("Customer"), Value::Int64(17), Value::Float64(2.0)],
            vec![s("Subscriber"), Value::Int64(17), Value::Float64(-1.5)],
            vec![Value::Null, Value::Int64(8), Value::Null],
            vec![s("Dependent"), Value::Null, Value::Null],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn mode_returns_single_most_frequent_value() {
        let ds = trips();
        assert_eq!(
            mode(&ds, "user_type"),
            Some(vec![Value::Utf8("Subscriber".to_string())])
        );
    }

    #[test]
    fn mode_returns_all_ties_in_ascending_order() {
        let ds = trips();
        assert_eq!(mode(&ds, "hour"), Some(vec![Value::Int64(8), Value::Int64(17)]));
    }

    #[test]
    fn mode_orders_negative_floats() {
        let ds = trips();
        assert_eq!(mode(&ds, "duration"), Some(vec![Value::Float64(-1.5)]));
    }

    #[test]
    fn mode_of_all_null_column_is_empty() {
        let schema = Schema::new(vec![Field::new("gender", DataType::Utf8)]);
        let ds = DataSet::new(schema, vec![vec![Value::Null]]);
        assert_eq!(mode(&ds, "gender"), Some(vec![]));
    }

    #[test]
    fn mode_of_missing_column_is_none() {
        assert_eq!(mode(&trips(), "gender"), None);
    }

    #[test]
    fn value_counts_sorts_by_descending_count() {
        let ds = trips();
        let counts = value_counts(&ds, "user_type").unwrap();
        assert_eq!(
            counts,
            vec![
                (Value::Utf8("Subscriber".to_string()), 2),
                (Value::Utf8("Customer".to_string()), 1),
                (Value::Utf8("Dependent".to_string()), 1),
            ]
        );
    }

    #[test]
    fn value_counts_of_missing_column_is_none() {
        assert!(value_counts(&trips(), "gender").is_none());
    }
}
