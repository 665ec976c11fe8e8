//! Column reductions (count/sum/min/max/mean).

use crate::types::{DataSet, DataType, Value};

/// Reduction applied to one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Number of rows, nulls included.
    Count,
    /// Sum of the non-null values.
    Sum,
    /// Smallest non-null value.
    Min,
    /// Largest non-null value.
    Max,
    /// Arithmetic mean of the non-null values, always a [`Value::Float64`].
    Mean,
}

/// Reduce `column` with `op`.
///
/// `None` means the column does not exist. Numeric ops on a text column, or on a column with
/// no non-null values, give `Some(Value::Null)`. `Sum`, `Min` and `Max` keep the column type.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let data_type = dataset.schema.field(column)?.data_type;
    let values = dataset.column(column)?;

    if op == ReduceOp::Count {
        return Some(Value::Int64(dataset.row_count() as i64));
    }

    Some(match data_type {
        DataType::Int64 => {
            let ints = values.filter_map(|v| match v {
                Value::Int64(i) => Some(*i),
                _ => None,
            });
            if op == ReduceOp::Mean {
                mean(ints.map(|i| i as f64))
            } else {
                combine(ints, op).map_or(Value::Null, Value::Int64)
            }
        }
        DataType::Float64 => {
            let floats = values.filter_map(|v| match v {
                Value::Float64(f) => Some(*f),
                _ => None,
            });
            if op == ReduceOp::Mean {
                mean(floats)
            } else {
                combine(floats, op).map_or(Value::Null, Value::Float64)
            }
        }
        DataType::Utf8 | DataType::DateTime => Value::Null,
    })
}

fn combine<T>(mut values: impl Iterator<Item = T>, op: ReduceOp) -> Option<T>
where
    T: Copy + PartialOrd + std::ops::Add<Output = T>,
{
    let first = values.next()?;
    Some(values.fold(first, |acc, v| match op {
        ReduceOp::Min if v < acc => v,
        ReduceOp::Max if v > acc => v,
        ReduceOp::Min | ReduceOp::Max => acc,
        _ => acc + v,
    }))
}

fn mean(values: impl Iterator<Item = f64>) -> Value {
    let (total, n) = values.fold((0.0, 0usize), |(t, n), v| (t + v, n + 1));
    if n == 0 {
        Value::Null
    } else {
        Value::Float64(total / n as f64)
    }
}
