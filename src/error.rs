use thiserror::Error;

/// Convenience result type for explorer operations.
pub type ExplorerResult<T> = Result<T, ExplorerError>;

/// Error type returned by catalog construction, ingestion, loading and prompting.
///
/// User-input mistakes are never reported through this type; the resolver re-prompts instead.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Underlying I/O error (e.g. file not found, permission denied, broken terminal).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// A record could not be rendered as JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input does not conform to the provided schema (missing required columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// Two canonical keys of the same catalog claim the same alias.
    #[error("catalog '{catalog}' maps alias '{alias}' to both '{first}' and '{second}'")]
    DuplicateAlias {
        catalog: String,
        alias: String,
        first: String,
        second: String,
    },

    /// A dataset key that was never produced by the city resolver.
    #[error("no dataset is registered for key '{key}'")]
    UnknownDataset { key: String },

    /// Invalid runtime configuration (environment variables).
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Input reached end-of-file while a prompt was waiting for an answer.
    #[error("input closed while waiting for a response")]
    InputClosed,
}

impl ExplorerError {
    /// Whether this error comes from the data source (missing file, bad CSV, bad values).
    ///
    /// Data errors end the current exploration run; every other kind is a configuration or
    /// contract failure that ends the process.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::Csv(_) | Self::Json(_) | Self::SchemaMismatch { .. } | Self::ParseError { .. }
        )
    }
}
