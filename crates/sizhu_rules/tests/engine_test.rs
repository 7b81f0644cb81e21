//! Engine properties over the built-in catalogs.

use std::collections::BTreeSet;

use sizhu_base::{FourPillarChart, Pillar};
use sizhu_rules::{CatalogRegistry, evaluate};

/// A spread of charts: every day pillar, with the other pillars rotated.
fn charts() -> impl Iterator<Item = FourPillarChart> {
    (0..60).map(|i| FourPillarChart {
        year: Pillar::from_cycle_index(i * 7),
        month: Pillar::from_cycle_index(i * 13 + 2),
        day: Pillar::from_cycle_index(i),
        hour: Pillar::from_cycle_index(i * 11 + 5),
    })
}

#[test]
fn builtin_rules_are_well_formed() {
    let registry = CatalogRegistry::builtin();
    for catalog in registry.iter() {
        assert!(!catalog.is_empty(), "{}", catalog.name);
        for def in &catalog.definitions {
            assert!(!def.rules.is_empty(), "{}", def.id);
            for rule in &def.rules {
                assert!(rule.anchor.check().is_ok(), "{}: {:?}", def.id, rule.anchor.check());
            }
        }
    }
}

#[test]
fn at_most_one_marker_per_definition() {
    let registry = CatalogRegistry::builtin();
    for catalog in registry.iter() {
        for chart in charts() {
            let matches = evaluate(&chart, catalog);
            let unique: BTreeSet<&str> = matches.iter().map(|m| m.rule_id.as_str()).collect();
            assert_eq!(unique.len(), matches.len(), "{chart}");
            assert!(matches.len() <= catalog.len());
        }
    }
}

#[test]
fn matches_sorted_by_priority_with_evidence() {
    let registry = CatalogRegistry::builtin();
    let classic = registry.get("classic").unwrap();
    for chart in charts() {
        let matches = evaluate(&chart, classic);
        assert!(matches.windows(2).all(|w| w[0].priority <= w[1].priority));
        for m in &matches {
            assert!(m.evidence.rule_ref.starts_with(&m.rule_id));
            assert!(!m.evidence.targets.is_empty());
            assert!(!m.evidence.matched.is_empty());
            assert!(!m.evidence.justification.is_empty());
            assert!(!m.evidence.justification.contains('{'), "{}", m.evidence.justification);
        }
    }
}

#[test]
fn evaluation_is_deterministic() {
    let registry = CatalogRegistry::builtin();
    let classic = registry.get("classic").unwrap();
    for chart in charts() {
        let first = serde_json::to_string(&evaluate(&chart, classic)).unwrap();
        let second = serde_json::to_string(&evaluate(&chart, classic)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn void_marker_tracks_day_decade() {
    let registry = CatalogRegistry::builtin();
    let classic = registry.get("classic").unwrap();
    for chart in charts() {
        let empties = sizhu_base::empty_branches(chart.day);
        let has_empty = chart.branches().iter().any(|(_, b)| empties.contains(b));
        let matched = evaluate(&chart, classic).iter().any(|m| m.rule_id == "kongwang");
        assert_eq!(has_empty, matched, "{chart}");
    }
}
