//! Row selection over a [`crate::types::DataSet`].

use crate::types::{DataSet, Value};

/// Keep the rows for which `predicate` holds. The schema is carried over untouched.
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Keep the rows whose `column` equals `expected`.
///
/// Returns `None` if `column` does not exist. A null cell never matches, not even a null
/// `expected`.
pub fn filter_eq(dataset: &DataSet, column: &str, expected: &Value) -> Option<DataSet> {
    let idx = dataset.schema.index_of(column)?;
    Some(filter(dataset, |row| {
        row.get(idx).is_some_and(|v| !v.is_null() && v == expected)
    }))
}
