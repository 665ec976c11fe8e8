//! Observed, path-based ingestion.
//!
//! [`ingest_from_path`] reads a CSV file into an in-memory [`crate::types::DataSet`] and, if an
//! [`super::observability::LoadObserver`] is configured, reports success/failure/alerts to it.

use std::fmt;
use std::path::Path;

use crate::error::ExplorerResult;
use crate::types::{DataSet, Schema};

use super::csv::ingest_csv_from_path;
use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};

/// Options controlling observed ingestion.
///
/// Use [`Default`] for common cases.
#[derive(Clone, Copy)]
pub struct IngestionOptions<'a> {
    /// Optional observer for logging/alerts.
    pub observer: Option<&'a dyn LoadObserver>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for IngestionOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions<'_> {
    fn default() -> Self {
        Self {
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

/// Ingest the CSV file at `path`, typed by `hints`, labelled `dataset` for observers.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row/column stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// # Example
///
/// ```no_run
/// use bikeshare_explorer::ingestion::{ingest_from_path, IngestionOptions, LogObserver};
/// use bikeshare_explorer::types::{DataType, Field, Schema};
///
/// # fn main() -> Result<(), bikeshare_explorer::ExplorerError> {
/// let hints = Schema::new(vec![Field::new("Start Time", DataType::DateTime)]);
/// let observer = LogObserver;
/// let opts = IngestionOptions {
///     observer: Some(&observer),
///     ..Default::default()
/// };
/// let ds = ingest_from_path("Chicago", "chicago.csv", &hints, opts)?;
/// println!("rows={}", ds.row_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(
    dataset: &str,
    path: impl AsRef<Path>,
    hints: &Schema,
    options: IngestionOptions<'_>,
) -> ExplorerResult<DataSet> {
    let path = path.as_ref();
    let result = ingest_csv_from_path(path, hints);

    if let Some(obs) = options.observer {
        let ctx = LoadContext {
            dataset: dataset.to_owned(),
            path: path.to_path_buf(),
        };
        match &result {
            Ok(ds) => obs.on_success(
                &ctx,
                LoadStats {
                    rows: ds.row_count(),
                    columns: ds.schema.fields.len(),
                },
            ),
            Err(e) => {
                let sev = LoadSeverity::of(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}
