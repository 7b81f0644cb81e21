//! Rule definitions and named, versioned catalogs.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::anchor::Anchor;
use crate::error::RuleError;

/// General tenor of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Nature {
    Auspicious,
    Inauspicious,
    #[default]
    Neutral,
}

/// One alternative way for a marker to match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRule {
    pub anchor: Anchor,
    /// Justification template; see [`crate::evidence`] for placeholders.
    #[serde(default)]
    pub template: Option<String>,
}

/// A marker and its ordered sub-rules. The first sub-rule that matches wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerRuleDefinition {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Lower ranks first.
    pub priority: i32,
    #[serde(default)]
    pub nature: Nature,
    #[serde(default)]
    pub effect: String,
    pub rules: Vec<MarkerRule>,
}

impl MarkerRuleDefinition {
    /// Every sub-rule's anchor must be usable.
    pub fn check(&self) -> Result<(), RuleError> {
        for (idx, rule) in self.rules.iter().enumerate() {
            rule.anchor
                .check()
                .map_err(|e| RuleError::Malformed(format!("{}#{idx}: {e}", self.id)))?;
        }
        Ok(())
    }
}

/// A named, versioned set of rule definitions in declared order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleCatalog {
    pub name: String,
    pub version: String,
    pub description: String,
    pub definitions: Vec<MarkerRuleDefinition>,
}

#[derive(Deserialize)]
struct RawCatalog {
    name: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    description: String,
    definitions: Vec<serde_json::Value>,
}

impl RuleCatalog {
    pub fn new(name: &str, definitions: Vec<MarkerRuleDefinition>) -> Self {
        Self {
            name: name.to_string(),
            version: String::new(),
            description: String::new(),
            definitions,
        }
    }

    /// Parse a catalog document.
    ///
    /// Only the envelope must be well-formed. A definition that fails to
    /// deserialize, has an unusable sub-rule, or repeats an earlier id is
    /// logged once here and left out.
    pub fn from_json(text: &str) -> Result<Self, RuleError> {
        let raw: RawCatalog = serde_json::from_str(text)?;
        let mut seen = BTreeSet::new();
        let mut definitions = Vec::with_capacity(raw.definitions.len());
        for (idx, value) in raw.definitions.into_iter().enumerate() {
            match serde_json::from_value::<MarkerRuleDefinition>(value) {
                Ok(def) => {
                    if let Err(e) = def.check() {
                        warn!(catalog = %raw.name, id = %def.id, error = %e, "skipping malformed rule");
                    } else if seen.insert(def.id.clone()) {
                        definitions.push(def);
                    } else {
                        warn!(catalog = %raw.name, id = %def.id, "duplicate rule id, skipping");
                    }
                }
                Err(e) => {
                    warn!(catalog = %raw.name, index = idx, error = %e, "skipping undecodable rule");
                }
            }
        }
        Ok(Self {
            name: raw.name,
            version: raw.version,
            description: raw.description,
            definitions,
        })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&MarkerRuleDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: &str = r#"{
        "name": "small",
        "version": "2",
        "definitions": [
            {"id": "a", "name": "A", "category": "x", "priority": 5,
             "rules": [{"anchor": {"kind": "day_pillar", "mode": "empty_branches"}}]},
            {"id": "b", "name": "B", "category": "x",
             "rules": []},
            {"id": "a", "name": "A again", "category": "x", "priority": 1,
             "rules": []},
            {"id": "c", "name": "C", "category": "y", "priority": 7, "nature": "auspicious",
             "effect": "text", "rules": [{"anchor": {"kind": "nonsense"}}]},
            {"id": "d", "name": "D", "category": "y", "priority": 9, "nature": "inauspicious",
             "rules": [{"anchor": {"kind": "day_stem", "table": {"甲": ["子"]}}, "template": "{basis}"}]},
            {"id": "e", "name": "E", "category": "y", "priority": 3,
             "rules": [{"anchor": {"kind": "day_pillar", "mode": "empty_branches"}},
                       {"anchor": {"kind": "day_stem"}}]},
            {"id": "f", "name": "F", "category": "y", "priority": 4,
             "rules": [{"anchor": {"kind": "day_stem", "table": {"X": ["子"]}}}]}
        ]
    }"#;

    #[test]
    fn bad_definitions_are_skipped() {
        let cat = RuleCatalog::from_json(SMALL).unwrap();
        assert_eq!(cat.name, "small");
        assert_eq!(cat.version, "2");
        let ids: Vec<&str> = cat.definitions.iter().map(|d| d.id.as_str()).collect();
        // b lacks a priority, the second a is a duplicate, c has an unknown
        // anchor, e has a table-less sub-rule, f an unknown table key
        assert_eq!(ids, vec!["a", "d"]);
        assert_eq!(cat.get("d").unwrap().nature, Nature::Inauspicious);
        assert_eq!(cat.get("a").unwrap().nature, Nature::Neutral);
    }

    #[test]
    fn malformed_envelope_is_an_error() {
        assert!(matches!(
            RuleCatalog::from_json(r#"{"name": "x"}"#),
            Err(RuleError::Json(_))
        ));
        assert!(RuleCatalog::from_json("not json").is_err());
    }

    #[test]
    fn definition_check_names_the_sub_rule() {
        let def: MarkerRuleDefinition = serde_json::from_str(
            r#"{"id": "e", "name": "E", "category": "y", "priority": 3,
                "rules": [{"anchor": {"kind": "day_pillar", "mode": "empty_branches"}},
                          {"anchor": {"kind": "combo", "pillars": ["day"], "min_count": 0,
                                      "table": {"子": ["子"]}}}]}"#,
        )
        .unwrap();
        let err = def.check().unwrap_err().to_string();
        assert!(err.contains("e#1"), "{err}");
    }
}
