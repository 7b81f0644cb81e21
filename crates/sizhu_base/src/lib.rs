//! Symbol layer of the four-pillar engine.
//!
//! This crate provides:
//! - The 10 stems, 12 branches, five elements and yin/yang polarity
//! - Pillars (legal stem/branch pairs) and the four-pillar chart
//! - The five-element generating/overcoming relation engine
//! - Weighted element scores, polarity ratio and the ten relational roles
//! - Nayin labels and the fixed branch groupings used by marker rules
//!
//! Everything here is pure, allocation-light and free of I/O.

pub mod balance;
pub mod cycle_groups;
pub mod element;
pub mod error;
pub mod nayin;
pub mod pillar;
pub mod symbols;
pub mod ten_role;

pub use balance::{BRANCH_WEIGHT, ElementalScore, PolarityRatio, STEM_WEIGHT, TOTAL_WEIGHT};
pub use cycle_groups::{
    EMPTY_BRANCHES, TRIADS, decade_of, empty_branches, season_members, triad_members, triad_of,
};
pub use element::{ALL_ELEMENTS, Element, ElementRelation, relation};
pub use error::BaseError;
pub use nayin::{NAYIN_TABLE, Nayin, nayin};
pub use pillar::{
    ALL_POSITIONS, ALL_SLOTS, CYCLE_LEN, ChartPosition, FourPillarChart, Part, Pillar, PillarSlot,
};
pub use symbols::{ALL_BRANCHES, ALL_STEMS, Branch, Polarity, Stem, Symbol};
pub use ten_role::{RoleAssignment, RoleLabel, TenRole, role_for, ten_role};
