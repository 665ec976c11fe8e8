//! The bikeshare workflow built on top of ingestion and processing.
//!
//! - [`loader`]: city file registry, derived columns, month/day filtering
//! - [`stats`]: the four report sections, each aggregate failing on its own
//! - [`pager`]: raw rows as JSON, a page at a time
//! - [`session`]: prompts and the restart loop

pub mod loader;
pub mod pager;
pub mod session;
pub mod stats;

pub use loader::{filter, load, prepare, DatasetRegistry};
pub use pager::show_raw_data;
pub use session::{run, Explorer, Filters};
pub use stats::{write_report, StatError, StatResult};
