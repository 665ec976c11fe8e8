//! Reverse lookup from alias to canonical key, plus input normalization.

use std::collections::HashMap;

use crate::error::ExplorerResult;

use super::catalog::Catalog;

/// Read-only map from every alias of a [`Catalog`] to its canonical key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasLookup {
    by_alias: HashMap<String, String>,
}

impl AliasLookup {
    /// Canonical key for an already-normalized alias.
    pub fn get(&self, alias: &str) -> Option<&str> {
        self.by_alias.get(alias).map(String::as_str)
    }

    /// Number of aliases in the lookup.
    pub fn len(&self) -> usize {
        self.by_alias.len()
    }

    /// Whether the lookup has no aliases.
    pub fn is_empty(&self) -> bool {
        self.by_alias.is_empty()
    }
}

/// Invert `catalog` into an [`AliasLookup`] with exactly one entry per alias.
///
/// # Errors
///
/// Returns [`crate::ExplorerError::DuplicateAlias`] if the catalog lists an alias twice.
pub fn build_lookup(catalog: &Catalog) -> ExplorerResult<AliasLookup> {
    catalog.validate()?;
    let by_alias = catalog
        .entries()
        .iter()
        .flat_map(|entry| {
            entry
                .aliases
                .iter()
                .map(move |alias| (alias.clone(), entry.key.clone()))
        })
        .collect();
    Ok(AliasLookup { by_alias })
}

/// Trim surrounding whitespace and lower-case.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Keep the first `trim` characters when `trim > 0` and `input` is strictly longer.
pub fn truncate(input: &str, trim: usize) -> &str {
    if trim == 0 {
        return input;
    }
    match input.char_indices().nth(trim) {
        Some((cut, _)) => &input[..cut],
        None => input,
    }
}
