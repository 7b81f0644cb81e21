//! Solar-term stores.
//!
//! Data format (one term per line, `#` comments and a header row allowed):
//!
//! ```text
//! year,term,instant
//! 2024,lichun,2024-02-04T08:27:00Z
//! ```
//!
//! `term` is a pinyin or Chinese term name; `instant` is RFC 3339. A year is
//! usable only when all 24 of its terms parse and are strictly increasing;
//! anything else is logged and the year is left out.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::StoreError;
use crate::solar_term::{SolarTerm, YearTerms};

/// A source of per-year solar-term instants.
pub trait SolarTermStore: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    /// The 24 terms of `year`, or `Ok(None)` if the store has no data for it.
    fn year_terms(&self, year: i32) -> Result<Option<YearTerms>, StoreError>;
}

/// Parse term rows into complete years.
///
/// Bad rows and incomplete years are skipped with a warning; the returned map
/// only holds validated years.
pub fn parse_terms_csv(content: &str) -> BTreeMap<i32, YearTerms> {
    let mut rows: BTreeMap<i32, Vec<(SolarTerm, DateTime<Utc>)>> = BTreeMap::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("year") {
            continue;
        }
        match parse_row(line, idx + 1) {
            Ok((year, term, instant)) => rows.entry(year).or_default().push((term, instant)),
            Err(e) => warn!(error = %e, "skipping solar-term row"),
        }
    }

    let mut years = BTreeMap::new();
    for (year, entries) in rows {
        match YearTerms::from_entries(year, entries) {
            Ok(terms) => {
                years.insert(year, terms);
            }
            Err(e) => warn!(year, error = %e, "dropping solar-term year"),
        }
    }
    years
}

fn parse_row(line: &str, line_no: usize) -> Result<(i32, SolarTerm, DateTime<Utc>), StoreError> {
    let err = |msg: String| StoreError::Parse { line: line_no, msg };
    let mut fields = line.split(',').map(str::trim);
    let (Some(year), Some(term), Some(instant), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(err(format!("expected 3 fields: {line}")));
    };
    let year: i32 = year.parse().map_err(|_| err(format!("bad year: {year}")))?;
    let term: SolarTerm = term.parse().map_err(err)?;
    let instant = DateTime::parse_from_rfc3339(instant)
        .map_err(|e| err(format!("bad instant {instant}: {e}")))?
        .with_timezone(&Utc);
    Ok((year, term, instant))
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    years: BTreeMap<i32, YearTerms>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, terms: YearTerms) {
        self.years.insert(terms.year(), terms);
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

impl FromIterator<YearTerms> for MemoryStore {
    fn from_iter<I: IntoIterator<Item = YearTerms>>(iter: I) -> Self {
        let mut store = Self::new();
        for terms in iter {
            store.insert(terms);
        }
        store
    }
}

impl SolarTermStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn year_terms(&self, year: i32) -> Result<Option<YearTerms>, StoreError> {
        Ok(self.years.get(&year).copied())
    }
}

/// File-backed store, read once when loaded.
#[derive(Debug, Clone)]
pub struct CsvStore {
    label: String,
    years: MemoryStore,
}

impl CsvStore {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path)?;
        let store = Self::parse(&path.display().to_string(), &content);
        debug!(path = %path.display(), years = store.years.len(), "loaded solar-term file");
        Ok(store)
    }

    pub fn parse(label: &str, content: &str) -> Self {
        Self {
            label: label.to_string(),
            years: parse_terms_csv(content).into_values().collect(),
        }
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.years.years()
    }
}

impl SolarTermStore for CsvStore {
    fn name(&self) -> &str {
        &self.label
    }

    fn year_terms(&self, year: i32) -> Result<Option<YearTerms>, StoreError> {
        self.years.year_terms(year)
    }
}

static EMBEDDED_CSV: &str = include_str!("../data/solar_terms.csv");

static EMBEDDED: LazyLock<BTreeMap<i32, YearTerms>> =
    LazyLock::new(|| parse_terms_csv(EMBEDDED_CSV));

/// The dataset compiled into the crate, covering 1900 through 2100.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedStore;

impl EmbeddedStore {
    /// First and last year covered.
    pub fn range(&self) -> Option<(i32, i32)> {
        let first = EMBEDDED.keys().next()?;
        let last = EMBEDDED.keys().next_back()?;
        Some((*first, *last))
    }

    pub fn get(&self, year: i32) -> Option<YearTerms> {
        EMBEDDED.get(&year).copied()
    }
}

impl SolarTermStore for EmbeddedStore {
    fn name(&self) -> &str {
        "embedded"
    }

    fn year_terms(&self, year: i32) -> Result<Option<YearTerms>, StoreError> {
        Ok(self.get(year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_dataset_is_complete() {
        let store = EmbeddedStore;
        assert_eq!(store.range(), Some((1900, 2100)));
        for year in 1900..=2100 {
            let terms = store.get(year).unwrap();
            assert_eq!(terms.year(), year);
        }
        assert!(store.get(1899).is_none());
        assert!(store.get(2101).is_none());
    }

    #[test]
    fn embedded_start_of_spring_1950() {
        let terms = EmbeddedStore.get(1950).unwrap();
        assert_eq!(
            terms.start_of_spring().to_rfc3339(),
            "1950-02-04T09:21:00+00:00"
        );
    }

    #[test]
    fn embedded_start_of_spring_2024() {
        let terms = EmbeddedStore.get(2024).unwrap();
        assert_eq!(
            terms.start_of_spring().to_rfc3339(),
            "2024-02-04T08:27:00+00:00"
        );
    }

    #[test]
    fn bad_rows_drop_their_year_only() {
        let mut content = String::from("year,term,instant\n");
        for (term, instant) in EmbeddedStore.get(2024).unwrap().iter() {
            content.push_str(&format!("2024,{},{}\n", term.pinyin(), instant.to_rfc3339()));
        }
        content.push_str("2031,lichun,not-a-date\n");
        content.push_str("2031,lichun\n");
        let years = parse_terms_csv(&content);
        assert_eq!(years.keys().copied().collect::<Vec<_>>(), vec![2024]);
    }

    #[test]
    fn row_errors_carry_line_numbers() {
        let err = parse_row("2024,nowhere,2024-01-01T00:00:00Z", 7).unwrap_err();
        assert!(matches!(err, StoreError::Parse { line: 7, .. }));
        assert!(parse_row("x,lichun,2024-01-01T00:00:00Z", 1).is_err());
        assert!(parse_row("2024,lichun,2024-01-01T00:00:00Z,extra", 1).is_err());
    }

    #[test]
    fn memory_store_lookup() {
        let store: MemoryStore = EmbeddedStore.get(2023).into_iter().collect();
        assert_eq!(store.len(), 1);
        assert!(store.year_terms(2023).unwrap().is_some());
        assert!(store.year_terms(2024).unwrap().is_none());
    }
}
