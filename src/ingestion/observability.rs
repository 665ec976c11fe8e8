use std::path::PathBuf;

use crate::error::ExplorerError;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (bad data: schema or parse failures).
    Error,
    /// Critical error (I/O or other infrastructure failures).
    Critical,
}

impl LoadSeverity {
    /// Classify a load failure.
    pub fn of(error: &ExplorerError) -> Self {
        match error {
            ExplorerError::Io(_) | ExplorerError::InputClosed => Self::Critical,
            ExplorerError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => Self::Critical,
                _ => Self::Error,
            },
            ExplorerError::Json(_)
            | ExplorerError::SchemaMismatch { .. }
            | ExplorerError::ParseError { .. } => Self::Error,
            ExplorerError::DuplicateAlias { .. }
            | ExplorerError::UnknownDataset { .. }
            | ExplorerError::Config { .. } => Self::Critical,
        }
    }
}

/// Context about a dataset load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// Canonical dataset key (e.g. `Chicago`), or the file stem when loaded by path.
    pub dataset: String,
    /// The file read.
    pub path: PathBuf,
}

/// Minimal stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of rows read.
    pub rows: usize,
    /// Number of source columns.
    pub columns: usize,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait LoadObserver {
    /// Called when a load succeeds.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &ExplorerError) {}

    /// Called when a load failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &ExplorerError) {
        self.on_failure(ctx, severity, error);
    }
}

/// Forwards load events to the [`log`] facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        log::info!(
            "loaded dataset={} path={} rows={} columns={}",
            ctx.dataset,
            ctx.path.display(),
            stats.rows,
            stats.columns
        );
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &ExplorerError) {
        log::warn!(
            "load failed severity={:?} dataset={} path={} err={}",
            severity,
            ctx.dataset,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &ExplorerError) {
        log::error!(
            "[ALERT] load failed severity={:?} dataset={} path={} err={}",
            severity,
            ctx.dataset,
            ctx.path.display(),
            error
        );
    }
}
