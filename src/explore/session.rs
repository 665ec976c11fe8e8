//! The interactive session: pick filters, load, report, page, maybe restart.

use std::io::{BufRead, Write};

use crate::config::ExplorerConfig;
use crate::console::Console;
use crate::error::ExplorerResult;
use crate::ingestion::LoadObserver;
use crate::resolver::{Catalogs, Resolver};
use crate::types::DataSet;

use super::loader::{self, DatasetRegistry};
use super::pager::show_raw_data;
use super::stats::write_report;

const RULE: &str = "----------------------------------------";

const CITY_PROMPT: &str = "\nWould you like to review Chicago, New York City, or Washington data? ";
const MONTH_PROMPT: &str = "\nWhat month would you like to review? ";
const DAY_PROMPT: &str = "\nWhat day of the week would you like to review? ";
const RESTART_PROMPT: &str = "\nWould you like to restart [y/n]? ";

/// Confirmed canonical keys for one exploration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filters {
    pub city: String,
    pub month: String,
    pub day: String,
}

/// Everything a session needs, borrowed from `main` (or a test).
pub struct Explorer<'a> {
    catalogs: &'a Catalogs,
    config: &'a ExplorerConfig,
    registry: DatasetRegistry,
    observer: Option<&'a dyn LoadObserver>,
}

impl<'a> Explorer<'a> {
    pub fn new(catalogs: &'a Catalogs, config: &'a ExplorerConfig) -> Self {
        Self {
            catalogs,
            config,
            registry: DatasetRegistry::default(),
            observer: None,
        }
    }

    /// Report every load to `observer`.
    pub fn with_observer(mut self, observer: &'a dyn LoadObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Replace the city-to-file mapping.
    pub fn with_registry(mut self, registry: DatasetRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Greet, then resolve city (no truncation), month and day (3-character truncation).
    ///
    /// # Errors
    ///
    /// Only console failures and [`crate::ExplorerError::InputClosed`].
    pub fn get_filters<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
    ) -> ExplorerResult<Filters> {
        console.say("Hello! Let's explore some US bikeshare data!")?;
        console.say("Type 'options' for options at any time.")?;

        let city = Resolver::new(&self.catalogs.cities, 0)?.resolve(console, CITY_PROMPT)?;
        let month = Resolver::new(&self.catalogs.months, 3)?.resolve(console, MONTH_PROMPT)?;
        let day = Resolver::new(&self.catalogs.days, 3)?.resolve(console, DAY_PROMPT)?;
        console.say(RULE)?;

        log::debug!("filters city={city:?} month={month:?} day={day:?}");
        Ok(Filters { city, month, day })
    }

    /// Load and filter the dataset selected by `filters`.
    ///
    /// # Errors
    ///
    /// Data errors (see [`crate::ExplorerError::is_data_error`]) and
    /// [`crate::ExplorerError::UnknownDataset`].
    pub fn working_table(&self, filters: &Filters) -> ExplorerResult<DataSet> {
        let raw = loader::load(self.config, &self.registry, &filters.city, self.observer)?;
        loader::filter(&raw, &filters.month, &filters.day)
    }

    /// One pass: load and filter, print the report, then offer raw rows.
    ///
    /// A data error is printed and logged, and the pass ends early with `Ok`.
    ///
    /// # Errors
    ///
    /// Console failures, closed input and contract errors such as an unregistered city.
    pub fn explore_once<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        filters: &Filters,
    ) -> ExplorerResult<()> {
        let table = match self.working_table(filters) {
            Ok(table) => table,
            Err(err) if err.is_data_error() => {
                log::warn!("giving up on {}: {err}", filters.city);
                console.say(format_args!("Unable to load {} data: {err}", filters.city))?;
                return Ok(());
            }
            Err(err) => return Err(err),
        };

        write_report(console.output_mut(), &table)?;
        show_raw_data(console, &table, self.config.page_size)?;
        Ok(())
    }

    /// Run passes until the user declines to restart.
    ///
    /// # Errors
    ///
    /// Anything [`Explorer::explore_once`] or [`Explorer::get_filters`] propagates.
    pub fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> ExplorerResult<()> {
        loop {
            let filters = self.get_filters(console)?;
            self.explore_once(console, &filters)?;
            if !console.ask_continue(RESTART_PROMPT)? {
                return Ok(());
            }
        }
    }
}

/// Run an interactive session with the default dataset registry.
///
/// # Errors
///
/// See [`Explorer::run`].
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    catalogs: &Catalogs,
    config: &ExplorerConfig,
    observer: &dyn LoadObserver,
) -> ExplorerResult<()> {
    Explorer::new(catalogs, config)
        .with_observer(observer)
        .run(console)
}
