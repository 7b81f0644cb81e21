//! Layered solar-term lookup: an optional primary store over the embedded
//! dataset.

use serde::Serialize;
use tracing::{debug, warn};

use crate::solar_term::YearTerms;
use crate::store::{EmbeddedStore, SolarTermStore};

/// Where a resolution's term data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionSource {
    /// The configured primary store.
    Store,
    /// The dataset compiled into the crate.
    Embedded,
    /// Fixed approximate boundaries; no term data was available.
    Approximate,
}

impl ResolutionSource {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Store => "store",
            Self::Embedded => "embedded",
            Self::Approximate => "approximate",
        }
    }
}

/// Solar-term table consulted by the resolver.
pub struct SolarTermTable {
    primary: Option<Box<dyn SolarTermStore>>,
    embedded: EmbeddedStore,
}

impl Default for SolarTermTable {
    fn default() -> Self {
        Self::embedded_only()
    }
}

impl std::fmt::Debug for SolarTermTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolarTermTable")
            .field("primary", &self.primary.as_ref().map(|s| s.name()))
            .finish()
    }
}

impl SolarTermTable {
    pub fn embedded_only() -> Self {
        Self {
            primary: None,
            embedded: EmbeddedStore,
        }
    }

    pub fn with_store(store: impl SolarTermStore + 'static) -> Self {
        Self {
            primary: Some(Box::new(store)),
            embedded: EmbeddedStore,
        }
    }

    pub fn primary_name(&self) -> Option<&str> {
        self.primary.as_ref().map(|s| s.name())
    }

    /// Terms for `year`, trying the primary store first.
    ///
    /// Store errors are logged and treated as a miss.
    pub fn lookup(&self, year: i32) -> Option<(YearTerms, ResolutionSource)> {
        if let Some(store) = &self.primary {
            match store.year_terms(year) {
                Ok(Some(terms)) => return Some((terms, ResolutionSource::Store)),
                Ok(None) => debug!(year, store = store.name(), "year not in primary store"),
                Err(e) => warn!(year, store = store.name(), error = %e, "solar-term store failed"),
            }
        }
        self.embedded
            .get(year)
            .map(|terms| (terms, ResolutionSource::Embedded))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;

    struct BrokenStore;

    impl SolarTermStore for BrokenStore {
        fn name(&self) -> &str {
            "broken"
        }

        fn year_terms(&self, _year: i32) -> Result<Option<YearTerms>, StoreError> {
            Err(StoreError::Unavailable("offline".into()))
        }
    }

    #[test]
    fn embedded_only_lookup() {
        let table = SolarTermTable::embedded_only();
        assert_eq!(table.lookup(2024).map(|(_, s)| s), Some(ResolutionSource::Embedded));
        assert!(table.lookup(1899).is_none());
    }

    #[test]
    fn primary_store_wins() {
        let store: MemoryStore = EmbeddedStore.get(2024).into_iter().collect();
        let table = SolarTermTable::with_store(store);
        assert_eq!(table.lookup(2024).map(|(_, s)| s), Some(ResolutionSource::Store));
        assert_eq!(table.lookup(2023).map(|(_, s)| s), Some(ResolutionSource::Embedded));
        assert_eq!(table.primary_name(), Some("memory"));
    }

    #[test]
    fn store_failure_falls_through() {
        let table = SolarTermTable::with_store(BrokenStore);
        assert_eq!(table.lookup(2025).map(|(_, s)| s), Some(ResolutionSource::Embedded));
        assert!(table.lookup(2101).is_none());
    }
}
