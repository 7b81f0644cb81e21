//! Weighted element scores and the yin/yang ratio of a chart.

use serde::Serialize;

use crate::element::{ALL_ELEMENTS, Element};
use crate::pillar::FourPillarChart;
use crate::symbols::Polarity;

/// Weight contributed by each of the four stems.
pub const STEM_WEIGHT: f64 = 1.5;

/// Weight contributed by each of the four branches.
pub const BRANCH_WEIGHT: f64 = 1.0;

/// Sum of all contributions: 4 × 1.5 + 4 × 1.0.
pub const TOTAL_WEIGHT: f64 = 4.0 * STEM_WEIGHT + 4.0 * BRANCH_WEIGHT;

/// Weighted count per element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ElementalScore {
    pub wood: f64,
    pub fire: f64,
    pub earth: f64,
    pub metal: f64,
    pub water: f64,
}

impl ElementalScore {
    /// Score all 8 symbols of a chart.
    pub fn from_chart(chart: &FourPillarChart) -> Self {
        let mut score = Self::default();
        for (_, stem) in chart.stems() {
            *score.slot_mut(stem.element()) += STEM_WEIGHT;
        }
        for (_, branch) in chart.branches() {
            *score.slot_mut(branch.element()) += BRANCH_WEIGHT;
        }
        score
    }

    pub const fn get(&self, element: Element) -> f64 {
        match element {
            Element::Wood => self.wood,
            Element::Fire => self.fire,
            Element::Earth => self.earth,
            Element::Metal => self.metal,
            Element::Water => self.water,
        }
    }

    fn slot_mut(&mut self, element: Element) -> &mut f64 {
        match element {
            Element::Wood => &mut self.wood,
            Element::Fire => &mut self.fire,
            Element::Earth => &mut self.earth,
            Element::Metal => &mut self.metal,
            Element::Water => &mut self.water,
        }
    }

    pub fn total(&self) -> f64 {
        ALL_ELEMENTS.iter().map(|&e| self.get(e)).sum()
    }

    /// Element with the highest score; ties go to the earlier element in
    /// generating order.
    pub fn dominant(&self) -> Element {
        let mut best = Element::Wood;
        for e in ALL_ELEMENTS {
            if self.get(e) > self.get(best) {
                best = e;
            }
        }
        best
    }

    /// Elements that receive no contribution at all.
    pub fn missing(&self) -> Vec<Element> {
        ALL_ELEMENTS
            .iter()
            .copied()
            .filter(|&e| self.get(e) == 0.0)
            .collect()
    }
}

/// Yin/Yang split of the 8 chart symbols, in whole percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PolarityRatio {
    pub yin: u8,
    pub yang: u8,
}

impl PolarityRatio {
    pub fn from_chart(chart: &FourPillarChart) -> Self {
        let stems = chart.stems().map(|(_, s)| s.polarity());
        let branches = chart.branches().map(|(_, b)| b.polarity());
        let yang_count = stems
            .iter()
            .chain(branches.iter())
            .filter(|&&p| p == Polarity::Yang)
            .count() as u32;
        // Round half up; yin takes the remainder so the pair sums to 100.
        let yang = ((yang_count * 100 + 4) / 8) as u8;
        Self {
            yin: 100 - yang,
            yang,
        }
    }
}
