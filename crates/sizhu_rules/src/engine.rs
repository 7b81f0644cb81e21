//! Marker rule evaluation.
//!
//! Definitions are tried in catalog order. Within a definition the sub-rules
//! are tried in order and the first match ends that definition, so each
//! definition yields at most one marker. Anchors are validated once when the
//! catalog is read; an anchor that is still unusable here (say, a table-less
//! one built in code) simply never matches. The result is sorted by priority;
//! the sort is stable, so equal priorities keep catalog order.

use std::fmt::Display;

use sizhu_base::{
    ALL_POSITIONS, Branch, ChartPosition, FourPillarChart, Part, Pillar, PillarSlot, Stem, decade_of,
    empty_branches, triad_of,
};
use tracing::debug;

use crate::anchor::{Anchor, BranchTable, DayPillarMode, StemTable, SymbolTable, TargetKind};
use crate::catalog::{MarkerRuleDefinition, RuleCatalog};
use crate::evidence::{DEFAULT_TEMPLATE, Evidence, Hit, MarkerMatch, MatchedSymbol, Site, render};

/// Evaluate every definition of `catalog` against `chart`.
pub fn evaluate(chart: &FourPillarChart, catalog: &RuleCatalog) -> Vec<MarkerMatch> {
    let mut matches: Vec<MarkerMatch> = catalog
        .definitions
        .iter()
        .filter_map(|def| evaluate_definition(chart, def))
        .collect();
    matches.sort_by_key(|m| m.priority);
    debug!(catalog = %catalog.name, matched = matches.len(), "evaluated rule catalog");
    matches
}

/// Evaluate one definition; the first matching sub-rule wins.
pub fn evaluate_definition(
    chart: &FourPillarChart,
    def: &MarkerRuleDefinition,
) -> Option<MarkerMatch> {
    for (idx, rule) in def.rules.iter().enumerate() {
        let Some(hit) = evaluate_anchor(chart, &rule.anchor) else {
            continue;
        };
        debug!(rule = %def.id, index = idx, "marker matched");
        let template = rule.template.as_deref().unwrap_or(DEFAULT_TEMPLATE);
        let justification = render(template, &def.name, &hit);
        return Some(MarkerMatch {
            rule_id: def.id.clone(),
            name: def.name.clone(),
            category: def.category.clone(),
            priority: def.priority,
            nature: def.nature,
            effect: def.effect.clone(),
            evidence: Evidence {
                rule_ref: format!("{}#{idx}", def.id),
                anchor: rule.anchor.kind(),
                anchor_site: hit.anchor_site,
                anchor_value: hit.anchor_value,
                basis: hit.basis,
                targets: hit.targets,
                matched: hit.matched,
                justification,
            },
        });
    }
    None
}

fn evaluate_anchor(chart: &FourPillarChart, anchor: &Anchor) -> Option<Hit> {
    match anchor {
        Anchor::DayStem { table } => day_stem(chart, table.as_ref()?),
        Anchor::Branch {
            pillar,
            triad,
            target,
            exclude_self,
            table,
        } => single_branch(
            chart,
            *pillar,
            *triad,
            *target,
            *exclude_self,
            table.as_ref()?,
        ),
        Anchor::MutualBranch { table } => mutual_branch(chart, table.as_ref()?),
        Anchor::DayPillar { mode, pillars } => match mode {
            DayPillarMode::Combination => day_combination(chart, pillars),
            DayPillarMode::EmptyBranches => day_empty_branches(chart),
        },
        Anchor::Combo {
            source,
            triad,
            pillars,
            min_count,
            table,
        } => combo(chart, *source, *triad, pillars, *min_count, table.as_ref()?),
    }
}

fn day_stem(chart: &FourPillarChart, table: &StemTable) -> Option<Hit> {
    let stem: Stem = chart.day_master();
    let targets = table.get(&stem)?;
    let matched = branch_matches(chart, targets, |_| true);
    (!matched.is_empty()).then(|| Hit {
        anchor_site: Site::Symbol(ChartPosition::DAY_STEM),
        anchor_value: stem.name().to_string(),
        basis: format!("{} = {stem}", ChartPosition::DAY_STEM),
        targets: names(targets),
        matched,
    })
}

fn single_branch(
    chart: &FourPillarChart,
    pillar: PillarSlot,
    triad: bool,
    target: TargetKind,
    exclude_self: bool,
    table: &SymbolTable,
) -> Option<Hit> {
    let anchor_pos = ChartPosition::branch(pillar);
    let branch = chart.pillar(pillar).branch;
    let key = if triad { triad_of(branch) } else { branch };
    let targets = table.get(&key)?;

    let matched: Vec<MatchedSymbol> = ALL_POSITIONS
        .into_iter()
        .filter(|pos| !(exclude_self && *pos == anchor_pos))
        .filter(|pos| match (target, pos.part) {
            (TargetKind::Either, _) => true,
            (TargetKind::Stem, part) => part == Part::Stem,
            (TargetKind::Branch, part) => part == Part::Branch,
        })
        .filter_map(|pos| {
            let symbol = chart.symbol_at(pos);
            targets.contains(&symbol).then(|| MatchedSymbol {
                site: Site::Symbol(pos),
                value: symbol.name().to_string(),
            })
        })
        .collect();

    (!matched.is_empty()).then(|| Hit {
        anchor_site: Site::Symbol(anchor_pos),
        anchor_value: branch.name().to_string(),
        basis: branch_basis(anchor_pos, branch, triad.then_some(key)),
        targets: names(targets),
        matched,
    })
}

fn mutual_branch(chart: &FourPillarChart, table: &BranchTable) -> Option<Hit> {
    for (slot, branch) in chart.branches() {
        let Some(targets) = table.get(&branch) else {
            continue;
        };
        let matched = branch_matches(chart, targets, |other| other != slot);
        if !matched.is_empty() {
            let pos = ChartPosition::branch(slot);
            return Some(Hit {
                anchor_site: Site::Symbol(pos),
                anchor_value: branch.name().to_string(),
                basis: format!("{pos} = {branch}"),
                targets: names(targets),
                matched,
            });
        }
    }
    None
}

fn day_combination(chart: &FourPillarChart, list: &[Pillar]) -> Option<Hit> {
    let day = chart.day;
    list.contains(&day).then(|| Hit {
        anchor_site: Site::Pillar(PillarSlot::Day),
        anchor_value: day.to_string(),
        basis: format!("{} = {day}", Site::Pillar(PillarSlot::Day)),
        targets: names(list),
        matched: vec![MatchedSymbol {
            site: Site::Pillar(PillarSlot::Day),
            value: day.to_string(),
        }],
    })
}

fn day_empty_branches(chart: &FourPillarChart) -> Option<Hit> {
    let day = chart.day;
    let empties = empty_branches(day);
    let matched = branch_matches(chart, &empties, |_| true);
    let decade_head = Pillar::from_cycle_index(i64::from(decade_of(day)) * 10);
    (!matched.is_empty()).then(|| Hit {
        anchor_site: Site::Pillar(PillarSlot::Day),
        anchor_value: day.to_string(),
        basis: format!("{} = {day}（{decade_head}旬）", Site::Pillar(PillarSlot::Day)),
        targets: names(&empties),
        matched,
    })
}

fn combo(
    chart: &FourPillarChart,
    source: PillarSlot,
    triad: bool,
    pillars: &[PillarSlot],
    min_count: usize,
    table: &BranchTable,
) -> Option<Hit> {
    let anchor_pos = ChartPosition::branch(source);
    let branch = chart.pillar(source).branch;
    let key = if triad { triad_of(branch) } else { branch };
    let targets = table.get(&key)?;

    let matched: Vec<MatchedSymbol> = pillars
        .iter()
        .map(|&slot| (slot, chart.pillar(slot).branch))
        .filter(|(_, b)| targets.contains(b))
        .map(|(slot, b)| MatchedSymbol {
            site: Site::Symbol(ChartPosition::branch(slot)),
            value: b.name().to_string(),
        })
        .collect();
    if matched.is_empty() || matched.len() < min_count {
        return None;
    }
    Some(Hit {
        anchor_site: Site::Symbol(anchor_pos),
        anchor_value: branch.name().to_string(),
        basis: format!(
            "{}，{}/{}支在内",
            branch_basis(anchor_pos, branch, triad.then_some(key)),
            matched.len(),
            pillars.len()
        ),
        targets: names(targets),
        matched,
    })
}

/// Chart branches in `targets`, restricted to slots accepted by `keep`.
fn branch_matches(
    chart: &FourPillarChart,
    targets: &[Branch],
    keep: impl Fn(PillarSlot) -> bool,
) -> Vec<MatchedSymbol> {
    chart
        .branches()
        .into_iter()
        .filter(|(slot, b)| keep(*slot) && targets.contains(b))
        .map(|(slot, b)| MatchedSymbol {
            site: Site::Symbol(ChartPosition::branch(slot)),
            value: b.name().to_string(),
        })
        .collect()
}

fn branch_basis(pos: ChartPosition, branch: Branch, representative: Option<Branch>) -> String {
    match representative {
        Some(rep) => format!("{pos} = {branch}（三合取{rep}）"),
        None => format!("{pos} = {branch}"),
    }
}

fn names<T: Display>(items: &[T]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
