//! Named rule catalogs, loaded once and shared read-only.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{error, info, warn};

use crate::catalog::RuleCatalog;
use crate::error::RuleError;

/// Built-in catalog sources, compiled into the crate.
pub const BUILTIN_CATALOGS: [(&str, &str); 2] = [
    ("classic", include_str!("../catalogs/classic.json")),
    ("relations", include_str!("../catalogs/relations.json")),
];

/// Catalog used when a request names none.
pub const DEFAULT_CATALOG: &str = "classic";

/// Catalogs by name.
#[derive(Debug, Clone, Default)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<String, RuleCatalog>,
}

impl CatalogRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry holding the built-in catalogs.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for (name, text) in BUILTIN_CATALOGS {
            match RuleCatalog::from_json(text) {
                Ok(catalog) => registry.insert(catalog),
                Err(e) => error!(catalog = name, error = %e, "built-in catalog failed to parse"),
            }
        }
        registry
    }

    /// Add or replace a catalog under its own name.
    pub fn insert(&mut self, catalog: RuleCatalog) {
        info!(catalog = %catalog.name, rules = catalog.len(), "registered rule catalog");
        self.catalogs.insert(catalog.name.clone(), catalog);
    }

    /// Load every `*.json` file in `dir`. Files that fail to parse are logged
    /// and skipped. Returns the number of catalogs added.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, RuleError> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        let mut added = 0;
        for path in paths {
            match Self::load_file(&path) {
                Ok(catalog) => {
                    self.insert(catalog);
                    added += 1;
                }
                Err(e) => warn!(path = %path.display(), error = %e, "skipping rule catalog file"),
            }
        }
        Ok(added)
    }

    fn load_file(path: &Path) -> Result<RuleCatalog, RuleError> {
        let text = std::fs::read_to_string(path)?;
        RuleCatalog::from_json(&text)
    }

    pub fn get(&self, name: &str) -> Result<&RuleCatalog, RuleError> {
        self.catalogs
            .get(name)
            .ok_or_else(|| RuleError::UnknownCatalog(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.catalogs.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleCatalog> {
        self.catalogs.values()
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalogs_present() {
        let reg = CatalogRegistry::builtin();
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["classic", "relations"]);
        assert!(reg.contains(DEFAULT_CATALOG));
    }

    #[test]
    fn unknown_catalog() {
        let reg = CatalogRegistry::builtin();
        assert!(matches!(reg.get("nope"), Err(RuleError::UnknownCatalog(n)) if n == "nope"));
    }

    #[test]
    fn load_dir_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("extra.json"),
            r#"{"name":"extra","definitions":[]}"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("broken.json"), "{").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut reg = CatalogRegistry::builtin();
        assert_eq!(reg.load_dir(dir.path()).unwrap(), 1);
        assert!(reg.get("extra").unwrap().is_empty());
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn load_dir_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut reg = CatalogRegistry::empty();
        assert!(matches!(
            reg.load_dir(&dir.path().join("absent")),
            Err(RuleError::Io(_))
        ));
    }

    #[test]
    fn file_catalog_replaces_builtin_of_same_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("classic.json"),
            r#"{"name":"classic","version":"local","definitions":[]}"#,
        )
        .unwrap();
        let mut reg = CatalogRegistry::builtin();
        reg.load_dir(dir.path()).unwrap();
        assert_eq!(reg.get("classic").unwrap().version, "local");
    }
}
