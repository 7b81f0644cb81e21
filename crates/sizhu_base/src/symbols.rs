//! Heavenly stems (10) and earthly branches (12).
//!
//! Both alphabets are cyclic. Index 0 is Jia for stems and Zi for branches;
//! an even index is Yang, an odd index is Yin. Each symbol belongs to exactly
//! one of the five elements.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::Element;
use crate::error::BaseError;

/// Yin/Yang polarity of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Polarity implied by a cycle position: even = Yang, odd = Yin.
    pub const fn from_parity(index: u8) -> Self {
        if index % 2 == 0 { Self::Yang } else { Self::Yin }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Yang => "阳",
            Self::Yin => "阴",
        }
    }
}

/// The 10 heavenly stems. Serialized as the Chinese character, since the
/// romanizations of 戊 and 午 collide; the pinyin name is accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    #[serde(rename = "甲", alias = "Jia")]
    Jia,
    #[serde(rename = "乙", alias = "Yi")]
    Yi,
    #[serde(rename = "丙", alias = "Bing")]
    Bing,
    #[serde(rename = "丁", alias = "Ding")]
    Ding,
    #[serde(rename = "戊", alias = "Wu")]
    Wu,
    #[serde(rename = "己", alias = "Ji")]
    Ji,
    #[serde(rename = "庚", alias = "Geng")]
    Geng,
    #[serde(rename = "辛", alias = "Xin")]
    Xin,
    #[serde(rename = "壬", alias = "Ren")]
    Ren,
    #[serde(rename = "癸", alias = "Gui")]
    Gui,
}

/// All 10 stems in cycle order (index 0 = Jia).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Jia,
    Stem::Yi,
    Stem::Bing,
    Stem::Ding,
    Stem::Wu,
    Stem::Ji,
    Stem::Geng,
    Stem::Xin,
    Stem::Ren,
    Stem::Gui,
];

const STEM_NAMES: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

const STEM_PINYIN: [&str; 10] = [
    "Jia", "Yi", "Bing", "Ding", "Wu", "Ji", "Geng", "Xin", "Ren", "Gui",
];

impl Stem {
    /// 0-based cycle index (Jia=0 .. Gui=9).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Stem at a cycle position, wrapping modulo 10.
    pub const fn from_index(index: i64) -> Self {
        ALL_STEMS[index.rem_euclid(10) as usize]
    }

    /// Chinese character.
    pub const fn name(self) -> &'static str {
        STEM_NAMES[self.index() as usize]
    }

    pub const fn pinyin(self) -> &'static str {
        STEM_PINYIN[self.index() as usize]
    }

    /// Stems pair up by element: Jia/Yi Wood, Bing/Ding Fire, and so on.
    pub const fn element(self) -> Element {
        Element::from_index(self.index() / 2)
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::from_parity(self.index())
    }

    /// Stem `steps` positions further along the cycle.
    pub const fn advance(self, steps: i64) -> Self {
        Self::from_index(self.index() as i64 + steps)
    }
}

impl Display for Stem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stem {
    type Err = BaseError;

    /// Accepts the character or the pinyin name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_STEMS
            .iter()
            .copied()
            .find(|stem| stem.name() == s || stem.pinyin().eq_ignore_ascii_case(s))
            .ok_or_else(|| BaseError::UnknownStem(s.to_string()))
    }
}

/// The 12 earthly branches. Serialized as the character, read from the
/// character or the pinyin name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    #[serde(rename = "子", alias = "Zi")]
    Zi,
    #[serde(rename = "丑", alias = "Chou")]
    Chou,
    #[serde(rename = "寅", alias = "Yin")]
    Yin,
    #[serde(rename = "卯", alias = "Mao")]
    Mao,
    #[serde(rename = "辰", alias = "Chen")]
    Chen,
    #[serde(rename = "巳", alias = "Si")]
    Si,
    #[serde(rename = "午", alias = "Wu")]
    Wu,
    #[serde(rename = "未", alias = "Wei")]
    Wei,
    #[serde(rename = "申", alias = "Shen")]
    Shen,
    #[serde(rename = "酉", alias = "You")]
    You,
    #[serde(rename = "戌", alias = "Xu")]
    Xu,
    #[serde(rename = "亥", alias = "Hai")]
    Hai,
}

/// All 12 branches in cycle order (index 0 = Zi).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Zi,
    Branch::Chou,
    Branch::Yin,
    Branch::Mao,
    Branch::Chen,
    Branch::Si,
    Branch::Wu,
    Branch::Wei,
    Branch::Shen,
    Branch::You,
    Branch::Xu,
    Branch::Hai,
];

const BRANCH_NAMES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

const BRANCH_PINYIN: [&str; 12] = [
    "Zi", "Chou", "Yin", "Mao", "Chen", "Si", "Wu", "Wei", "Shen", "You", "Xu", "Hai",
];

/// Zi Water, Chou Earth, Yin/Mao Wood, Chen Earth, Si/Wu Fire, Wei Earth,
/// Shen/You Metal, Xu Earth, Hai Water.
const BRANCH_ELEMENTS: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

impl Branch {
    /// 0-based cycle index (Zi=0 .. Hai=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Branch at a cycle position, wrapping modulo 12.
    pub const fn from_index(index: i64) -> Self {
        ALL_BRANCHES[index.rem_euclid(12) as usize]
    }

    /// Chinese character.
    pub const fn name(self) -> &'static str {
        BRANCH_NAMES[self.index() as usize]
    }

    pub const fn pinyin(self) -> &'static str {
        BRANCH_PINYIN[self.index() as usize]
    }

    pub const fn element(self) -> Element {
        BRANCH_ELEMENTS[self.index() as usize]
    }

    pub const fn polarity(self) -> Polarity {
        Polarity::from_parity(self.index())
    }

    /// Branch `steps` positions further along the cycle.
    pub const fn advance(self, steps: i64) -> Self {
        Self::from_index(self.index() as i64 + steps)
    }

    /// Forward distance from `other` to `self` (0..12).
    pub const fn offset_from(self, other: Branch) -> u8 {
        (self.index() as i16 - other.index() as i16).rem_euclid(12) as u8
    }
}

impl Display for Branch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Branch {
    type Err = BaseError;

    /// Accepts the character or the pinyin name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_BRANCHES
            .iter()
            .copied()
            .find(|branch| branch.name() == s || branch.pinyin().eq_ignore_ascii_case(s))
            .ok_or_else(|| BaseError::UnknownBranch(s.to_string()))
    }
}

/// Either alphabet, used where a rule target may be a stem or a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Symbol {
    Stem(Stem),
    Branch(Branch),
}

impl Symbol {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Stem(s) => s.name(),
            Self::Branch(b) => b.name(),
        }
    }

    pub const fn element(self) -> Element {
        match self {
            Self::Stem(s) => s.element(),
            Self::Branch(b) => b.element(),
        }
    }

    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Stem(s) => s.polarity(),
            Self::Branch(b) => b.polarity(),
        }
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Stem> for Symbol {
    fn from(s: Stem) -> Self {
        Self::Stem(s)
    }
}

impl From<Branch> for Symbol {
    fn from(b: Branch) -> Self {
        Self::Branch(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, s) in ALL_STEMS.iter().enumerate() {
            assert_eq!(s.index() as usize, i);
        }
        for (i, b) in ALL_BRANCHES.iter().enumerate() {
            assert_eq!(b.index() as usize, i);
        }
    }

    #[test]
    fn from_index_wraps() {
        assert_eq!(Stem::from_index(10), Stem::Jia);
        assert_eq!(Stem::from_index(-1), Stem::Gui);
        assert_eq!(Branch::from_index(12), Branch::Zi);
        assert_eq!(Branch::from_index(-1), Branch::Hai);
    }

    #[test]
    fn stem_elements_pairwise() {
        assert_eq!(Stem::Jia.element(), Element::Wood);
        assert_eq!(Stem::Yi.element(), Element::Wood);
        assert_eq!(Stem::Ding.element(), Element::Fire);
        assert_eq!(Stem::Ji.element(), Element::Earth);
        assert_eq!(Stem::Xin.element(), Element::Metal);
        assert_eq!(Stem::Gui.element(), Element::Water);
    }

    #[test]
    fn branch_elements() {
        assert_eq!(Branch::Zi.element(), Element::Water);
        assert_eq!(Branch::Chen.element(), Element::Earth);
        assert_eq!(Branch::Si.element(), Element::Fire);
        assert_eq!(Branch::You.element(), Element::Metal);
        assert_eq!(Branch::Hai.element(), Element::Water);
    }

    #[test]
    fn polarity_by_parity() {
        assert_eq!(Stem::Jia.polarity(), Polarity::Yang);
        assert_eq!(Stem::Yi.polarity(), Polarity::Yin);
        assert_eq!(Branch::Zi.polarity(), Polarity::Yang);
        assert_eq!(Branch::Hai.polarity(), Polarity::Yin);
    }

    #[test]
    fn parse_character_and_pinyin() {
        assert_eq!("甲".parse::<Stem>().unwrap(), Stem::Jia);
        assert_eq!("geng".parse::<Stem>().unwrap(), Stem::Geng);
        assert_eq!("亥".parse::<Branch>().unwrap(), Branch::Hai);
        assert_eq!(" Chou ".parse::<Branch>().unwrap(), Branch::Chou);
        assert!("Foo".parse::<Stem>().is_err());
        assert!("".parse::<Branch>().is_err());
    }

    #[test]
    fn offset_from_tiger() {
        assert_eq!(Branch::Yin.offset_from(Branch::Yin), 0);
        assert_eq!(Branch::Zi.offset_from(Branch::Yin), 10);
        assert_eq!(Branch::Chou.offset_from(Branch::Yin), 11);
    }

    #[test]
    fn symbol_serializes_untagged() {
        let json = serde_json::to_string(&Symbol::Stem(Stem::Ding)).unwrap();
        assert_eq!(json, "\"丁\"");
        let back: Symbol = serde_json::from_str("\"酉\"").unwrap();
        assert_eq!(back, Symbol::Branch(Branch::You));
        let stem_wu: Symbol = serde_json::from_str("\"戊\"").unwrap();
        let branch_wu: Symbol = serde_json::from_str("\"午\"").unwrap();
        assert_eq!(stem_wu, Symbol::Stem(Stem::Wu));
        assert_eq!(branch_wu, Symbol::Branch(Branch::Wu));
    }

    #[test]
    fn map_keys_read_character_or_pinyin() {
        use std::collections::BTreeMap;

        let table: BTreeMap<Stem, Vec<Branch>> =
            serde_json::from_str(r#"{"甲":["丑"],"Geng":["Wei","未"]}"#).unwrap();
        assert_eq!(table.get(&Stem::Jia), Some(&vec![Branch::Chou]));
        assert_eq!(table.get(&Stem::Geng), Some(&vec![Branch::Wei, Branch::Wei]));
        assert_eq!(serde_json::to_string(&table).unwrap(), r#"{"甲":["丑"],"庚":["未","未"]}"#);
        assert!(serde_json::from_str::<BTreeMap<Branch, u8>>(r#"{"X":1}"#).is_err());
    }
}
