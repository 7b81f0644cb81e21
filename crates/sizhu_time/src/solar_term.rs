//! The 24 solar terms and per-year term instants.
//!
//! Terms are listed in calendar order, starting with Minor Cold (early
//! January). Even-indexed terms are the 12 "jie" terms, each of which opens a
//! solar month; the odd-indexed "qi" term that follows stays in the same month.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sizhu_base::Branch;

use crate::error::StoreError;

/// The 24 solar terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SolarTerm {
    Xiaohan,
    Dahan,
    Lichun,
    Yushui,
    Jingzhe,
    Chunfen,
    Qingming,
    Guyu,
    Lixia,
    Xiaoman,
    Mangzhong,
    Xiazhi,
    Xiaoshu,
    Dashu,
    Liqiu,
    Chushu,
    Bailu,
    Qiufen,
    Hanlu,
    Shuangjiang,
    Lidong,
    Xiaoxue,
    Daxue,
    Dongzhi,
}

/// All 24 terms in calendar order.
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::Xiaohan,
    SolarTerm::Dahan,
    SolarTerm::Lichun,
    SolarTerm::Yushui,
    SolarTerm::Jingzhe,
    SolarTerm::Chunfen,
    SolarTerm::Qingming,
    SolarTerm::Guyu,
    SolarTerm::Lixia,
    SolarTerm::Xiaoman,
    SolarTerm::Mangzhong,
    SolarTerm::Xiazhi,
    SolarTerm::Xiaoshu,
    SolarTerm::Dashu,
    SolarTerm::Liqiu,
    SolarTerm::Chushu,
    SolarTerm::Bailu,
    SolarTerm::Qiufen,
    SolarTerm::Hanlu,
    SolarTerm::Shuangjiang,
    SolarTerm::Lidong,
    SolarTerm::Xiaoxue,
    SolarTerm::Daxue,
    SolarTerm::Dongzhi,
];

const TERM_NAMES: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
    "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

const TERM_PINYIN: [&str; 24] = [
    "xiaohan",
    "dahan",
    "lichun",
    "yushui",
    "jingzhe",
    "chunfen",
    "qingming",
    "guyu",
    "lixia",
    "xiaoman",
    "mangzhong",
    "xiazhi",
    "xiaoshu",
    "dashu",
    "liqiu",
    "chushu",
    "bailu",
    "qiufen",
    "hanlu",
    "shuangjiang",
    "lidong",
    "xiaoxue",
    "daxue",
    "dongzhi",
];

/// Month branch in force from each term until the next.
const TERM_MONTH_BRANCH: [Branch; 24] = [
    Branch::Chou,
    Branch::Chou,
    Branch::Yin,
    Branch::Yin,
    Branch::Mao,
    Branch::Mao,
    Branch::Chen,
    Branch::Chen,
    Branch::Si,
    Branch::Si,
    Branch::Wu,
    Branch::Wu,
    Branch::Wei,
    Branch::Wei,
    Branch::Shen,
    Branch::Shen,
    Branch::You,
    Branch::You,
    Branch::Xu,
    Branch::Xu,
    Branch::Hai,
    Branch::Hai,
    Branch::Zi,
    Branch::Zi,
];

impl SolarTerm {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(index: u8) -> Option<Self> {
        if (index as usize) < ALL_SOLAR_TERMS.len() {
            Some(ALL_SOLAR_TERMS[index as usize])
        } else {
            None
        }
    }

    pub const fn name(self) -> &'static str {
        TERM_NAMES[self as usize]
    }

    pub const fn pinyin(self) -> &'static str {
        TERM_PINYIN[self as usize]
    }

    /// Whether this term opens a solar month.
    pub const fn is_jie(self) -> bool {
        self.index() % 2 == 0
    }

    pub const fn month_branch(self) -> Branch {
        TERM_MONTH_BRANCH[self as usize]
    }
}

impl Display for SolarTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolarTerm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_SOLAR_TERMS
            .into_iter()
            .find(|t| t.name() == s || t.pinyin().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown solar term: {s}"))
    }
}

/// The 24 term instants of one calendar year, strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearTerms {
    year: i32,
    instants: [DateTime<Utc>; 24],
}

impl YearTerms {
    /// Build from instants in calendar order.
    pub fn new(year: i32, instants: [DateTime<Utc>; 24]) -> Result<Self, StoreError> {
        for pair in ALL_SOLAR_TERMS.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if instants[next as usize] <= instants[prev as usize] {
                return Err(StoreError::NotIncreasing {
                    year,
                    term: next.pinyin(),
                });
            }
        }
        Ok(Self { year, instants })
    }

    /// Build from unordered (term, instant) pairs. Every term must appear
    /// exactly once.
    pub fn from_entries(
        year: i32,
        entries: impl IntoIterator<Item = (SolarTerm, DateTime<Utc>)>,
    ) -> Result<Self, StoreError> {
        let mut slots: [Option<DateTime<Utc>>; 24] = [None; 24];
        for (term, instant) in entries {
            slots[term as usize] = Some(instant);
        }
        let missing = slots.iter().filter(|s| s.is_none()).count();
        if missing > 0 {
            return Err(StoreError::IncompleteYear { year, missing });
        }
        let instants = slots.map(|s| s.unwrap_or_default());
        Self::new(year, instants)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn instant(&self, term: SolarTerm) -> DateTime<Utc> {
        self.instants[term as usize]
    }

    /// (term, instant) pairs in calendar order.
    pub fn iter(&self) -> impl Iterator<Item = (SolarTerm, DateTime<Utc>)> + '_ {
        ALL_SOLAR_TERMS.into_iter().zip(self.instants)
    }

    /// Start of Spring, which opens the sexagenary year.
    pub fn start_of_spring(&self) -> DateTime<Utc> {
        self.instant(SolarTerm::Lichun)
    }
}
