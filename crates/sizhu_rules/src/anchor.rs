//! Anchor strategies: how a rule picks its lookup key from the chart and what
//! it matches the looked-up targets against.
//!
//! Tables are JSON objects keyed by the stem or branch (character or pinyin
//! name) and decode straight into typed maps, so an unknown key rejects the
//! anchor when the catalog is read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sizhu_base::{Branch, Pillar, PillarSlot, Stem, Symbol};

use crate::error::RuleError;

/// Day stem → target branches.
pub type StemTable = BTreeMap<Stem, Vec<Branch>>;

/// Branch → target branches.
pub type BranchTable = BTreeMap<Branch, Vec<Branch>>;

/// Branch → target stems and/or branches.
pub type SymbolTable = BTreeMap<Branch, Vec<Symbol>>;

/// Which chart symbols a single-branch anchor's targets are compared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    #[default]
    Branch,
    Stem,
    Either,
}

/// Sub-mode of the day-pillar anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayPillarMode {
    /// Day pillar is one of a listed set of stem/branch pairs.
    Combination,
    /// A chart branch is empty (xunkong) for the day pillar's decade.
    EmptyBranches,
}

/// How a rule anchors on the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anchor {
    /// Day stem → target branches; any chart branch.
    DayStem { table: Option<StemTable> },
    /// One pillar's branch (optionally replaced by its triad representative)
    /// → target symbols, matched anywhere in the chart including the anchor
    /// branch itself unless `exclude_self` is set.
    Branch {
        pillar: PillarSlot,
        #[serde(default)]
        triad: bool,
        #[serde(default)]
        target: TargetKind,
        #[serde(default, skip_serializing_if = "is_false")]
        exclude_self: bool,
        table: Option<SymbolTable>,
    },
    /// Any ordered pair of distinct branch positions (A, B) with B in
    /// table[A].
    MutualBranch { table: Option<BranchTable> },
    DayPillar {
        mode: DayPillarMode,
        #[serde(default, with = "pillar_names")]
        pillars: Vec<Pillar>,
    },
    /// Count how many of `pillars`' branches fall in the set looked up from
    /// the `source` branch.
    Combo {
        #[serde(default = "default_combo_source")]
        source: PillarSlot,
        #[serde(default = "default_true")]
        triad: bool,
        pillars: Vec<PillarSlot>,
        min_count: usize,
        table: Option<BranchTable>,
    },
}

fn default_combo_source() -> PillarSlot {
    PillarSlot::Year
}

fn default_true() -> bool {
    true
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Anchor kind, recorded in evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorKind {
    DayStem,
    Branch,
    MutualBranch,
    DayPillar,
    Combo,
}

impl Anchor {
    pub fn kind(&self) -> AnchorKind {
        match self {
            Self::DayStem { .. } => AnchorKind::DayStem,
            Self::Branch { .. } => AnchorKind::Branch,
            Self::MutualBranch { .. } => AnchorKind::MutualBranch,
            Self::DayPillar { .. } => AnchorKind::DayPillar,
            Self::Combo { .. } => AnchorKind::Combo,
        }
    }

    /// Reject anchors that cannot be evaluated.
    pub fn check(&self) -> Result<(), RuleError> {
        match self {
            Self::DayStem { table } => check_table(table.as_ref()),
            Self::Branch { table, .. } => check_table(table.as_ref()),
            Self::MutualBranch { table } => check_table(table.as_ref()),
            Self::DayPillar { mode, pillars } => match mode {
                DayPillarMode::EmptyBranches => Ok(()),
                DayPillarMode::Combination if pillars.is_empty() => {
                    Err(malformed("combination list is empty"))
                }
                DayPillarMode::Combination => Ok(()),
            },
            Self::Combo {
                pillars,
                min_count,
                table,
                ..
            } => {
                if pillars.is_empty() {
                    return Err(malformed("combo pillar subset is empty"));
                }
                let mut distinct = pillars.clone();
                distinct.sort();
                distinct.dedup();
                if distinct.len() != pillars.len() {
                    return Err(malformed("combo pillar subset repeats a pillar"));
                }
                if *min_count == 0 || *min_count > pillars.len() {
                    return Err(malformed(&format!(
                        "min_count {min_count} outside 1..={}",
                        pillars.len()
                    )));
                }
                check_table(table.as_ref())
            }
        }
    }
}

fn check_table<K, V>(table: Option<&BTreeMap<K, V>>) -> Result<(), RuleError> {
    match table {
        None => Err(malformed("missing lookup table")),
        Some(t) if t.is_empty() => Err(malformed("empty lookup table")),
        Some(_) => Ok(()),
    }
}

fn malformed(reason: &str) -> RuleError {
    RuleError::Malformed(reason.to_string())
}

/// Combination lists are written as pillar names ("庚辰" or "Geng-Chen").
mod pillar_names {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};
    use sizhu_base::Pillar;

    pub fn serialize<S: Serializer>(pillars: &[Pillar], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(pillars.iter().map(ToString::to_string))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Pillar>, D::Error> {
        Vec::<String>::deserialize(d)?
            .iter()
            .map(|p| {
                p.parse()
                    .map_err(|e| D::Error::custom(format!("combination entry {p:?}: {e}")))
            })
            .collect()
    }
}
