//! `bikeshare-explorer` is an interactive explorer for US bikeshare trip data.
//!
//! A session asks for a city, a month and a day of the week. Answers are matched against
//! alias catalogs (`"nyc"`, `"2"` and `"New York"` all mean New York City), confirmed with the
//! user, and then used to load the city's CSV file into an in-memory [`types::DataSet`], derive
//! time and route columns, filter, and print descriptive statistics.
//!
//! ## Modules
//!
//! - [`resolver`]: alias catalogs, lookup tables and the prompt/confirm loop
//! - [`ingestion`]: CSV reading into a typed [`types::DataSet`], with a load observer hook
//! - [`processing`]: in-memory transformations (filter/derive/reduce/mode)
//! - [`explore`]: loading, derived columns, filtering, the report, the pager and the session
//! - [`console`]: prompt I/O over any `BufRead`/`Write` pair
//! - [`config`]: environment configuration
//! - [`error`]: the shared error type
//!
//! ## Resolving a prompt
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use bikeshare_explorer::console::Console;
//! use bikeshare_explorer::resolver::{Catalogs, Resolver};
//!
//! let catalogs = Catalogs::standard().unwrap();
//! let mut console = Console::new(Cursor::new(b"nyc\ny\n".to_vec()), Vec::new());
//! let city = Resolver::new(&catalogs.cities, 0)
//!     .unwrap()
//!     .resolve(&mut console, "City? ")
//!     .unwrap();
//! assert_eq!(city, "New York City");
//! ```
//!
//! ## Loading and filtering a city
//!
//! ```no_run
//! use bikeshare_explorer::config::ExplorerConfig;
//! use bikeshare_explorer::explore::{filter, load, DatasetRegistry};
//!
//! # fn main() -> Result<(), bikeshare_explorer::ExplorerError> {
//! let config = ExplorerConfig::from_env()?;
//! let trips = load(&config, &DatasetRegistry::default(), "Chicago", None)?;
//! let mondays_in_june = filter(&trips, "June", "Monday")?;
//! println!("rows={}", mondays_in_june.row_count());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod explore;
pub mod ingestion;
pub mod processing;
pub mod resolver;
pub mod types;

pub use error::{ExplorerError, ExplorerResult};
