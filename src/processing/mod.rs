//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced by ingestion.
//! It is purely in-memory and single-threaded.
//!
//! Currently implemented:
//!
//! - [`filter()`] / [`filter_eq()`]: row filtering by predicate or column equality
//! - [`derive()`] / [`try_convert_column()`]: column derivation and in-place conversion
//! - [`reduce()`]: common reductions (count/sum/min/max/mean)
//! - [`mode()`] / [`value_counts()`]: frequency operations
//!
//! ## Example: derive → filter → reduce
//!
//! ```rust
//! use bikeshare_explorer::processing::{derive, filter_eq, reduce, ReduceOp};
//! use bikeshare_explorer::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("Trip Duration", DataType::Float64),
//!     Field::new("User Type", DataType::Utf8),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Float64(600.0), Value::Utf8("Subscriber".to_string())],
//!         vec![Value::Float64(300.0), Value::Utf8("Customer".to_string())],
//!         vec![Value::Null, Value::Utf8("Subscriber".to_string())],
//!     ],
//! );
//!
//! // Trip duration in minutes.
//! let ds = derive(ds, Field::new("Minutes", DataType::Float64), |row| match row[0] {
//!     Value::Float64(secs) => Value::Float64(secs / 60.0),
//!     _ => Value::Null,
//! });
//!
//! let subscribers = filter_eq(&ds, "User Type", &Value::Utf8("Subscriber".to_string())).unwrap();
//!
//! // Sum minutes (nulls ignored).
//! let sum = reduce(&subscribers, "Minutes", ReduceOp::Sum).unwrap();
//! assert_eq!(sum, Value::Float64(10.0));
//! ```

pub mod filter;
pub mod frequency;
pub mod map;
pub mod reduce;

pub use filter::{filter, filter_eq};
pub use frequency::{mode, value_counts};
pub use map::{derive, try_convert_column};
pub use reduce::{reduce, ReduceOp};
