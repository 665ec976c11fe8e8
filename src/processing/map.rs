//! Column derivation and conversion for [`crate::types::DataSet`].

use crate::types::{DataSet, Field, Value};

/// Replace every value of `column` using a fallible conversion.
///
/// `convert` receives the zero-based row index and the current value. The first error aborts
/// the whole conversion; the dataset is consumed either way. Returns the dataset unchanged if
/// `column` does not exist.
pub fn try_convert_column<F, E>(
    mut dataset: DataSet,
    column: &str,
    field: Field,
    mut convert: F,
) -> Result<DataSet, E>
where
    F: FnMut(usize, &Value) -> Result<Value, E>,
{
    let Some(idx) = dataset.schema.index_of(column) else {
        return Ok(dataset);
    };
    for (row_idx, row) in dataset.rows.iter_mut().enumerate() {
        if let Some(slot) = row.get_mut(idx) {
            *slot = convert(row_idx, slot)?;
        }
    }
    dataset.schema.fields[idx] = field;
    Ok(dataset)
}

/// Append (or replace) a column whose values are computed from each row.
///
/// This is a convenience wrapper around [`DataSet::with_column`].
pub fn derive<F>(dataset: DataSet, field: Field, derive: F) -> DataSet
where
    F: FnMut(&[Value]) -> Value,
{
    dataset.with_column(field, derive)
}
