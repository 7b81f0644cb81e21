//! Ten relational roles (十神) relative to the day master.
//!
//! A role is a pure function of (element relation, polarity match) between
//! the day stem and a target symbol: a 5×2 lookup with no exceptions.

use std::fmt::{Display, Formatter};

use serde::Serialize;

use crate::element::{ElementRelation, relation};
use crate::pillar::{ALL_POSITIONS, ChartPosition, FourPillarChart};
use crate::symbols::{Stem, Symbol};

/// The ten relational roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TenRole {
    /// 比肩: same element, same polarity.
    Companion,
    /// 劫财: same element, different polarity.
    RobWealth,
    /// 食神: day generates target, same polarity.
    EatingGod,
    /// 伤官: day generates target, different polarity.
    HurtingOfficer,
    /// 偏财: day overcomes target, same polarity.
    IndirectWealth,
    /// 正财: day overcomes target, different polarity.
    DirectWealth,
    /// 七杀: target overcomes day, same polarity.
    SevenKillings,
    /// 正官: target overcomes day, different polarity.
    DirectOfficer,
    /// 偏印: target generates day, same polarity.
    IndirectResource,
    /// 正印: target generates day, different polarity.
    DirectResource,
}

impl TenRole {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Companion => "比肩",
            Self::RobWealth => "劫财",
            Self::EatingGod => "食神",
            Self::HurtingOfficer => "伤官",
            Self::IndirectWealth => "偏财",
            Self::DirectWealth => "正财",
            Self::SevenKillings => "七杀",
            Self::DirectOfficer => "正官",
            Self::IndirectResource => "偏印",
            Self::DirectResource => "正印",
        }
    }
}

impl Display for TenRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The 5×2 lookup: (relation, same polarity) → role.
pub const fn role_for(rel: ElementRelation, same_polarity: bool) -> TenRole {
    use ElementRelation::*;
    use TenRole::*;
    match (rel, same_polarity) {
        (Same, true) => Companion,
        (Same, false) => RobWealth,
        (DayGenerates, true) => EatingGod,
        (DayGenerates, false) => HurtingOfficer,
        (DayOvercomes, true) => IndirectWealth,
        (DayOvercomes, false) => DirectWealth,
        (OvercomesDay, true) => SevenKillings,
        (OvercomesDay, false) => DirectOfficer,
        (GeneratesDay, true) => IndirectResource,
        (GeneratesDay, false) => DirectResource,
    }
}

/// Role of any stem or branch as seen from `day_stem`.
pub fn ten_role(day_stem: Stem, target: Symbol) -> TenRole {
    let rel = relation(day_stem.element(), target.element());
    role_for(rel, day_stem.polarity() == target.polarity())
}

/// Label of one chart position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "role", rename_all = "snake_case")]
pub enum RoleLabel {
    /// The day stem itself (日主).
    SelfStem,
    Role(TenRole),
}

impl Display for RoleLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelfStem => f.write_str("日主"),
            Self::Role(r) => r.fmt(f),
        }
    }
}

/// Role of each of the 8 positions of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    pub entries: [(ChartPosition, RoleLabel); 8],
}

impl RoleAssignment {
    pub fn from_chart(chart: &FourPillarChart) -> Self {
        let day = chart.day_master();
        let entries = ALL_POSITIONS.map(|pos| {
            let label = if pos == ChartPosition::DAY_STEM {
                RoleLabel::SelfStem
            } else {
                RoleLabel::Role(ten_role(day, chart.symbol_at(pos)))
            };
            (pos, label)
        });
        Self { entries }
    }

    pub fn label_at(&self, position: ChartPosition) -> RoleLabel {
        self.entries
            .iter()
            .find(|(pos, _)| *pos == position)
            .map(|(_, label)| *label)
            .unwrap_or(RoleLabel::SelfStem)
    }
}
