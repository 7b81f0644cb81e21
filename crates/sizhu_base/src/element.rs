//! Five-element (wu xing) relation engine.
//!
//! The generating cycle runs Wood → Fire → Earth → Metal → Water → Wood.
//! The overcoming cycle runs Wood → Earth → Water → Fire → Metal → Wood.
//! The two directed 5-cycles share no edge, so any ordered pair of distinct
//! elements is related by exactly one of the four directed relations.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BaseError;

/// The five elements in generating-cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All 5 elements in generating order (index 0 = Wood).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Element at a generating-cycle position, wrapping modulo 5.
    pub const fn from_index(index: u8) -> Self {
        ALL_ELEMENTS[(index % 5) as usize]
    }

    /// Chinese character.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    pub const fn english_name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    /// The element this one generates (Wood → Fire).
    pub const fn generates(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The element that generates this one (Fire ← Wood).
    pub const fn generated_by(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// The element this one overcomes (Wood → Earth).
    pub const fn overcomes(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The element that overcomes this one (Wood ← Metal).
    pub const fn overcome_by(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Element {
    type Err = BaseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ALL_ELEMENTS
            .iter()
            .copied()
            .find(|e| e.name() == s || e.english_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| BaseError::UnknownElement(s.to_string()))
    }
}

/// Relation of a target element as seen from the day master's element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementRelation {
    /// Same element.
    Same,
    /// The day element generates the target.
    DayGenerates,
    /// The target generates the day element.
    GeneratesDay,
    /// The day element overcomes the target.
    DayOvercomes,
    /// The target overcomes the day element.
    OvercomesDay,
}

/// Classify `target` relative to `day`.
pub const fn relation(day: Element, target: Element) -> ElementRelation {
    // Distance along the generating cycle decides the relation uniquely.
    match (target.index() + 5 - day.index()) % 5 {
        0 => ElementRelation::Same,
        1 => ElementRelation::DayGenerates,
        2 => ElementRelation::DayOvercomes,
        3 => ElementRelation::OvercomesDay,
        _ => ElementRelation::GeneratesDay,
    }
}
