//! Marker matches and the evidence recorded for each.

use std::fmt::{Display, Formatter};

use serde::Serialize;
use sizhu_base::{ChartPosition, PillarSlot};

use crate::anchor::AnchorKind;
use crate::catalog::Nature;

/// A place on the chart: one symbol, or a whole pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Site {
    Symbol(ChartPosition),
    Pillar(PillarSlot),
}

impl Display for Site {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Symbol(pos) => pos.fmt(f),
            Self::Pillar(slot) => write!(f, "{}柱", slot.name()),
        }
    }
}

/// One chart symbol that satisfied a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedSymbol {
    pub site: Site,
    pub value: String,
}

/// Why a marker matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Evidence {
    /// `<definition id>#<sub-rule index>`.
    pub rule_ref: String,
    pub anchor: AnchorKind,
    pub anchor_site: Site,
    pub anchor_value: String,
    /// Lookup basis, e.g. `日干 = 甲`.
    pub basis: String,
    /// The literal target set looked up.
    pub targets: Vec<String>,
    /// Satisfying symbols in chart order; never empty.
    pub matched: Vec<MatchedSymbol>,
    pub justification: String,
}

/// One matched marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerMatch {
    pub rule_id: String,
    pub name: String,
    pub category: String,
    pub priority: i32,
    pub nature: Nature,
    pub effect: String,
    pub evidence: Evidence,
}

/// Raw result of one anchor evaluation, before templating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Hit {
    pub anchor_site: Site,
    pub anchor_value: String,
    pub basis: String,
    pub targets: Vec<String>,
    pub matched: Vec<MatchedSymbol>,
}

/// Fill a justification template.
///
/// Placeholders: `{name}`, `{basis}`, `{anchor}`, `{anchor_value}`,
/// `{targets}`, `{position}`, `{value}`. The last two name the first
/// satisfying symbol. Unknown placeholders are left as-is.
pub(crate) fn render(template: &str, name: &str, hit: &Hit) -> String {
    let (position, value) = hit
        .matched
        .first()
        .map(|m| (m.site.to_string(), m.value.clone()))
        .unwrap_or_default();
    template
        .replace("{name}", name)
        .replace("{basis}", &hit.basis)
        .replace("{anchor_value}", &hit.anchor_value)
        .replace("{anchor}", &hit.anchor_site.to_string())
        .replace("{targets}", &hit.targets.join("、"))
        .replace("{position}", &position)
        .replace("{value}", &value)
}

/// Template used when a rule does not supply one.
pub(crate) const DEFAULT_TEMPLATE: &str = "{basis}，查得{targets}；{position}见{value}，成{name}";
