//! Stem/branch pillars and the four-pillar chart.
//!
//! A pillar pairs one stem with one branch of equal polarity, giving the 60
//! legal combinations of the sexagenary cycle (lcm(10, 12) = 60).

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BaseError;
use crate::symbols::{Branch, Stem, Symbol};

/// Length of the sexagenary cycle.
pub const CYCLE_LEN: u8 = 60;

/// One stem/branch pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pillar {
    pub stem: Stem,
    pub branch: Branch,
}

impl Pillar {
    /// Pair a stem with a branch. Returns `None` for the 60 parity-mismatched
    /// combinations.
    pub const fn new(stem: Stem, branch: Branch) -> Option<Self> {
        if stem.index() % 2 == branch.index() % 2 {
            Some(Self { stem, branch })
        } else {
            None
        }
    }

    /// Like [`Pillar::new`] but reports the illegal pair.
    pub fn try_new(stem: Stem, branch: Branch) -> Result<Self, BaseError> {
        Self::new(stem, branch).ok_or(BaseError::IllegalPillar {
            stem: stem.name(),
            branch: branch.name(),
        })
    }

    /// Pillar at a cycle position (0 = Jia-Zi), wrapping modulo 60.
    pub const fn from_cycle_index(index: i64) -> Self {
        let i = index.rem_euclid(CYCLE_LEN as i64);
        Self {
            stem: Stem::from_index(i),
            branch: Branch::from_index(i),
        }
    }

    /// Position in the 60-cycle (0 = Jia-Zi .. 59 = Gui-Hai).
    ///
    /// Solves i ≡ s (mod 10), i ≡ b (mod 12): i = 6s − 5b (mod 60).
    pub const fn cycle_index(self) -> u8 {
        let s = self.stem.index() as i16;
        let b = self.branch.index() as i16;
        (6 * s - 5 * b).rem_euclid(CYCLE_LEN as i16) as u8
    }

    /// Pillar `steps` positions further along the cycle.
    pub const fn advance(self, steps: i64) -> Self {
        Self::from_cycle_index(self.cycle_index() as i64 + steps)
    }
}

impl Display for Pillar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem, self.branch)
    }
}

/// Accepts two characters ("庚辰") or two pinyin names ("Geng-Chen",
/// "geng chen").
impl FromStr for Pillar {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let (stem, branch) = match (chars.next(), chars.next(), chars.next()) {
            (Some(a), Some(b), None) => {
                let mut buf = [0u8; 4];
                let stem: Stem = a.encode_utf8(&mut buf).parse()?;
                let branch: Branch = b.encode_utf8(&mut buf).parse()?;
                (stem, branch)
            }
            _ => {
                let mut parts = s.split(|c: char| c == '-' || c.is_whitespace());
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(a), Some(b), None) => (a.parse()?, b.parse()?),
                    _ => return Err(BaseError::UnknownPillar(s.to_string())),
                }
            }
        };
        Self::try_new(stem, branch)
    }
}

/// The four pillar slots of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PillarSlot {
    Year,
    Month,
    Day,
    Hour,
}

pub const ALL_SLOTS: [PillarSlot; 4] = [
    PillarSlot::Year,
    PillarSlot::Month,
    PillarSlot::Day,
    PillarSlot::Hour,
];

impl PillarSlot {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "年",
            Self::Month => "月",
            Self::Day => "日",
            Self::Hour => "时",
        }
    }

    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Year => "Year",
            Self::Month => "Month",
            Self::Day => "Day",
            Self::Hour => "Hour",
        }
    }
}

/// Whether a position refers to the stem or the branch of its pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Part {
    Stem,
    Branch,
}

/// One of the eight symbol positions of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChartPosition {
    pub slot: PillarSlot,
    pub part: Part,
}

impl ChartPosition {
    pub const fn stem(slot: PillarSlot) -> Self {
        Self {
            slot,
            part: Part::Stem,
        }
    }

    pub const fn branch(slot: PillarSlot) -> Self {
        Self {
            slot,
            part: Part::Branch,
        }
    }

    pub const DAY_STEM: Self = Self::stem(PillarSlot::Day);
}

impl Display for ChartPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let part = match self.part {
            Part::Stem => "干",
            Part::Branch => "支",
        };
        write!(f, "{}{}", self.slot.name(), part)
    }
}

/// All 8 positions, stems first within each pillar, pillars in slot order.
pub const ALL_POSITIONS: [ChartPosition; 8] = [
    ChartPosition::stem(PillarSlot::Year),
    ChartPosition::branch(PillarSlot::Year),
    ChartPosition::stem(PillarSlot::Month),
    ChartPosition::branch(PillarSlot::Month),
    ChartPosition::stem(PillarSlot::Day),
    ChartPosition::branch(PillarSlot::Day),
    ChartPosition::stem(PillarSlot::Hour),
    ChartPosition::branch(PillarSlot::Hour),
];

/// Year, Month, Day and Hour pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FourPillarChart {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillarChart {
    pub const fn pillar(&self, slot: PillarSlot) -> Pillar {
        match slot {
            PillarSlot::Year => self.year,
            PillarSlot::Month => self.month,
            PillarSlot::Day => self.day,
            PillarSlot::Hour => self.hour,
        }
    }

    pub const fn day_master(&self) -> Stem {
        self.day.stem
    }

    pub fn pillars(&self) -> [(PillarSlot, Pillar); 4] {
        ALL_SLOTS.map(|slot| (slot, self.pillar(slot)))
    }

    pub fn stems(&self) -> [(PillarSlot, Stem); 4] {
        ALL_SLOTS.map(|slot| (slot, self.pillar(slot).stem))
    }

    pub fn branches(&self) -> [(PillarSlot, Branch); 4] {
        ALL_SLOTS.map(|slot| (slot, self.pillar(slot).branch))
    }

    /// The symbol at one of the eight positions.
    pub const fn symbol_at(&self, position: ChartPosition) -> Symbol {
        let pillar = self.pillar(position.slot);
        match position.part {
            Part::Stem => Symbol::Stem(pillar.stem),
            Part::Branch => Symbol::Branch(pillar.branch),
        }
    }
}

impl Display for FourPillarChart {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {} {}", self.year, self.month, self.day, self.hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_sixty_legal_pairs() {
        let mut legal = 0;
        for s in 0..10 {
            for b in 0..12 {
                if Pillar::new(Stem::from_index(s), Branch::from_index(b)).is_some() {
                    legal += 1;
                }
            }
        }
        assert_eq!(legal, 60);
    }

    #[test]
    fn cycle_index_roundtrip() {
        for i in 0..60 {
            let p = Pillar::from_cycle_index(i);
            assert_eq!(p.cycle_index() as i64, i);
            assert!(Pillar::new(p.stem, p.branch).is_some());
        }
    }

    #[test]
    fn known_cycle_positions() {
        assert_eq!(Pillar::from_cycle_index(0).to_string(), "甲子");
        assert_eq!(Pillar::from_cycle_index(10).to_string(), "甲戌");
        assert_eq!(Pillar::from_cycle_index(54).to_string(), "戊午");
        assert_eq!(Pillar::from_cycle_index(59).to_string(), "癸亥");
        assert_eq!(Pillar::from_cycle_index(60).to_string(), "甲子");
        assert_eq!(Pillar::from_cycle_index(-1).to_string(), "癸亥");
    }

    #[test]
    fn illegal_pair_rejected() {
        assert!(Pillar::new(Stem::Jia, Branch::Chou).is_none());
        assert!(Pillar::try_new(Stem::Yi, Branch::Zi).is_err());
    }

    #[test]
    fn parse_pillars() {
        assert_eq!("庚辰".parse::<Pillar>(), Ok(Pillar::from_cycle_index(16)));
        assert_eq!("Geng-Chen".parse::<Pillar>(), Ok(Pillar::from_cycle_index(16)));
        assert_eq!("jia zi".parse::<Pillar>(), Ok(Pillar::from_cycle_index(0)));
        assert!(matches!("甲丑".parse::<Pillar>(), Err(BaseError::IllegalPillar { .. })));
        assert!("甲".parse::<Pillar>().is_err());
        assert!("甲子丑".parse::<Pillar>().is_err());
    }

    #[test]
    fn advance_wraps() {
        let p = Pillar::from_cycle_index(58);
        assert_eq!(p.advance(3), Pillar::from_cycle_index(1));
        assert_eq!(p.advance(-60), p);
    }

    #[test]
    fn symbol_at_positions() {
        let chart = FourPillarChart {
            year: Pillar::from_cycle_index(0),
            month: Pillar::from_cycle_index(2),
            day: Pillar::from_cycle_index(4),
            hour: Pillar::from_cycle_index(6),
        };
        assert_eq!(chart.symbol_at(ChartPosition::DAY_STEM), Symbol::Stem(Stem::Wu));
        assert_eq!(
            chart.symbol_at(ChartPosition::branch(PillarSlot::Hour)),
            Symbol::Branch(Branch::Wu)
        );
        assert_eq!(chart.day_master(), Stem::Wu);
        assert_eq!(chart.to_string(), "甲子 丙寅 戊辰 庚午");
    }

    #[test]
    fn position_display() {
        assert_eq!(ChartPosition::DAY_STEM.to_string(), "日干");
        assert_eq!(ChartPosition::branch(PillarSlot::Month).to_string(), "月支");
    }
}
