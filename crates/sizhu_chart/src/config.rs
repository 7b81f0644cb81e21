//! Service configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sizhu_rules::DEFAULT_CATALOG;
use sizhu_time::MAX_OFFSET_MINUTES;

use crate::error::ChartError;

/// UTC+8.
pub const DEFAULT_OFFSET_MINUTES: i32 = 480;

/// Chart service configuration, read from JSON. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Offset applied when a request gives none.
    #[serde(default = "default_offset_minutes")]
    pub default_offset_minutes: i32,
    /// Catalog used when a request names none.
    #[serde(default = "default_catalog")]
    pub default_catalog: String,
    /// CSV solar-term store consulted before the embedded dataset.
    #[serde(default)]
    pub solar_term_file: Option<PathBuf>,
    /// Directory of extra `*.json` rule catalogs.
    #[serde(default)]
    pub catalog_dir: Option<PathBuf>,
    /// JSON-lines file that receives charts computed for identified callers.
    #[serde(default)]
    pub record_file: Option<PathBuf>,
}

fn default_offset_minutes() -> i32 {
    DEFAULT_OFFSET_MINUTES
}

fn default_catalog() -> String {
    DEFAULT_CATALOG.to_string()
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            default_offset_minutes: default_offset_minutes(),
            default_catalog: default_catalog(),
            solar_term_file: None,
            catalog_dir: None,
            record_file: None,
        }
    }
}

impl ChartConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ChartError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ChartError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if self.default_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ChartError::InvalidConfig(format!(
                "default_offset_minutes {} is outside ±{MAX_OFFSET_MINUTES}",
                self.default_offset_minutes
            )));
        }
        if self.default_catalog.trim().is_empty() {
            return Err(ChartError::InvalidConfig(
                "default_catalog must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = ChartConfig::default();
        assert_eq!(c.default_offset_minutes, 480);
        assert_eq!(c.default_catalog, "classic");
        assert!(c.solar_term_file.is_none());
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_object_uses_defaults() {
        assert_eq!(ChartConfig::from_json("{}").unwrap(), ChartConfig::default());
    }

    #[test]
    fn partial_override() {
        let c = ChartConfig::from_json(
            r#"{"default_offset_minutes": -300, "catalog_dir": "/etc/sizhu/catalogs"}"#,
        )
        .unwrap();
        assert_eq!(c.default_offset_minutes, -300);
        assert_eq!(c.default_catalog, "classic");
        assert_eq!(c.catalog_dir, Some(PathBuf::from("/etc/sizhu/catalogs")));
    }

    #[test]
    fn validate_rejects_bad_values() {
        let c = ChartConfig {
            default_offset_minutes: 900,
            ..ChartConfig::default()
        };
        assert!(matches!(c.validate(), Err(ChartError::InvalidConfig(_))));
        let c = ChartConfig {
            default_catalog: " ".into(),
            ..ChartConfig::default()
        };
        assert!(c.validate().is_err());
        assert!(matches!(
            ChartConfig::from_json(r#"{"default_offset_minutes": -841}"#),
            Err(ChartError::InvalidConfig(_))
        ));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sizhu.json");
        std::fs::write(&path, r#"{"default_catalog": "relations"}"#).unwrap();
        assert_eq!(ChartConfig::load(&path).unwrap().default_catalog, "relations");
        assert!(matches!(
            ChartConfig::load(&dir.path().join("missing.json")),
            Err(ChartError::Io(_))
        ));
    }
}
