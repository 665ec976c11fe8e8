//! Runtime configuration.
//!
//! Read once at startup from environment variables; nothing is persisted between runs.

use std::path::PathBuf;

use crate::error::{ExplorerError, ExplorerResult};

/// Directory holding the city CSV files.
pub const DATA_DIR_VAR: &str = "BIKESHARE_DATA_DIR";
/// Number of raw records shown per page.
pub const PAGE_SIZE_VAR: &str = "BIKESHARE_PAGE_SIZE";

const DEFAULT_PAGE_SIZE: usize = 5;

/// Explorer settings shared by the loader and the pager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerConfig {
    /// Directory the dataset file names are resolved against.
    pub data_dir: PathBuf,
    /// Raw records printed per page.
    pub page_size: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl ExplorerConfig {
    /// Build from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Config`] if a variable is set to an invalid value.
    pub fn from_env() -> ExplorerResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (unset or blank keys fall back to defaults).
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Config`] if `BIKESHARE_PAGE_SIZE` is not a positive integer.
    pub fn from_lookup<F>(lookup: F) -> ExplorerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(dir) = get(DATA_DIR_VAR) {
            config.data_dir = PathBuf::from(dir.trim());
        }
        if let Some(raw) = get(PAGE_SIZE_VAR) {
            config.page_size = match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ExplorerError::Config {
                        message: format!("{PAGE_SIZE_VAR} must be a positive integer, got '{raw}'"),
                    });
                }
            };
        }

        log::debug!("configuration: {config:?}");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::path::PathBuf;

    use super::{ExplorerConfig, DATA_DIR_VAR, PAGE_SIZE_VAR};
    use crate::error::ExplorerError;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = ExplorerConfig::from_lookup(env(&[])).unwrap();
        assert_eq!(config, ExplorerConfig::default());
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn reads_data_dir_and_page_size() {
        let config =
            ExplorerConfig::from_lookup(env(&[(DATA_DIR_VAR, "/srv/bikeshare"), (PAGE_SIZE_VAR, " 10 ")]))
                .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/bikeshare"));
        assert_eq!(config.page_size, 10);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config = ExplorerConfig::from_lookup(env(&[(DATA_DIR_VAR, "  "), (PAGE_SIZE_VAR, "")])).unwrap();
        assert_eq!(config, ExplorerConfig::default());
    }

    #[test]
    fn rejects_zero_or_non_numeric_page_size() {
        for bad in ["0", "five", "-3"] {
            let err = ExplorerConfig::from_lookup(env(&[(PAGE_SIZE_VAR, bad)])).unwrap_err();
            assert!(matches!(err, ExplorerError::Config { .. }), "{bad}: {err}");
        }
    }
}
