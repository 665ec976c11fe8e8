//! Category catalogs: canonical keys and the aliases a user may type for them.

use std::collections::HashMap;

use crate::error::{ExplorerError, ExplorerResult};

/// Sentinel month key meaning "no month filter".
pub const ALL_MONTHS: &str = "All Months";
/// Sentinel day key meaning "no day filter".
pub const ALL_DAYS: &str = "All Days";

/// One canonical key and its accepted aliases, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Canonical key, e.g. `Monday`.
    pub key: String,
    /// Accepted (already normalized) input tokens.
    pub aliases: Vec<String>,
}

/// A named, ordered mapping from canonical key to aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    name: String,
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Create a catalog from `(key, aliases)` pairs. Order is preserved.
    ///
    /// No collision check happens here; call [`Catalog::validate`] (or build a lookup) before use.
    pub fn new<K, A, S>(name: impl Into<String>, entries: impl IntoIterator<Item = (K, A)>) -> Self
    where
        K: Into<String>,
        A: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            entries: entries
                .into_iter()
                .map(|(key, aliases)| CatalogEntry {
                    key: key.into(),
                    aliases: aliases.into_iter().map(Into::into).collect(),
                })
                .collect(),
        }
    }

    /// Catalog name, used in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entries in declaration order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Canonical keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Whether `key` is one of this catalog's canonical keys.
    pub fn contains_key(&self, key: &str) -> bool {
        self.keys().any(|k| k == key)
    }

    /// Total number of aliases across all entries.
    pub fn alias_count(&self) -> usize {
        self.entries.iter().map(|e| e.aliases.len()).sum()
    }

    /// Check that no alias is listed twice.
    ///
    /// Flattens every alias and compares the count against the number of distinct aliases.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::DuplicateAlias`] naming the first repeated alias.
    pub fn validate(&self) -> ExplorerResult<()> {
        let mut owners: HashMap<&str, &str> = HashMap::with_capacity(self.alias_count());
        for entry in &self.entries {
            for alias in &entry.aliases {
                if let Some(first) = owners.insert(alias.as_str(), entry.key.as_str()) {
                    return Err(ExplorerError::DuplicateAlias {
                        catalog: self.name.clone(),
                        alias: alias.clone(),
                        first: first.to_owned(),
                        second: entry.key.clone(),
                    });
                }
            }
        }
        debug_assert_eq!(owners.len(), self.alias_count());
        Ok(())
    }

    /// Cities with downloadable trip data.
    pub fn cities() -> Self {
        Self::new(
            "city",
            [
                ("Chicago", vec!["1", "chicago"]),
                ("New York City", vec!["2", "new york city", "nyc", "ny", "new york"]),
                ("Washington", vec!["3", "washington", "dc", "d.c."]),
            ],
        )
    }

    /// Calendar months plus the [`ALL_MONTHS`] sentinel.
    pub fn months() -> Self {
        Self::new(
            "month",
            [
                (ALL_MONTHS, vec!["0", "all"]),
                ("January", vec!["1", "jan"]),
                ("February", vec!["2", "feb"]),
                ("March", vec!["3", "mar"]),
                ("April", vec!["4", "apr"]),
                ("May", vec!["5", "may"]),
                ("June", vec!["6", "jun"]),
                ("July", vec!["7", "jul"]),
                ("August", vec!["8", "aug"]),
                ("September", vec!["9", "sep"]),
                ("October", vec!["10", "oct"]),
                ("November", vec!["11", "nov"]),
                ("December", vec!["12", "dec"]),
            ],
        )
    }

    /// Days of the week plus the [`ALL_DAYS`] sentinel.
    ///
    /// Single-letter aliases: `r` is Thursday and `y` is Sunday.
    pub fn days() -> Self {
        Self::new(
            "day",
            [
                (ALL_DAYS, vec!["0", "a", "all"]),
                ("Monday", vec!["1", "m", "mon"]),
                ("Tuesday", vec!["2", "t", "tue"]),
                ("Wednesday", vec!["3", "w", "wed"]),
                ("Thursday", vec!["4", "r", "thu"]),
                ("Friday", vec!["5", "f", "fri"]),
                ("Saturday", vec!["6", "s", "sat"]),
                ("Sunday", vec!["7", "y", "sun"]),
            ],
        )
    }
}

/// The three catalogs the explorer prompts with, validated once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalogs {
    /// Dataset selector.
    pub cities: Catalog,
    /// Month filter.
    pub months: Catalog,
    /// Day-of-week filter.
    pub days: Catalog,
}

impl Catalogs {
    /// Build the standard catalogs and run the alias collision check on each.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::DuplicateAlias`] if any catalog is ambiguous.
    pub fn standard() -> ExplorerResult<Self> {
        Self::new(Catalog::cities(), Catalog::months(), Catalog::days())
    }

    /// Bundle custom catalogs, validating each.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::DuplicateAlias`] if any catalog is ambiguous.
    pub fn new(cities: Catalog, months: Catalog, days: Catalog) -> ExplorerResult<Self> {
        for catalog in [&cities, &months, &days] {
            catalog.validate()?;
        }
        Ok(Self {
            cities,
            months,
            days,
        })
    }
}
