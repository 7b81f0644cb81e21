//! Declarative marker rule engine.
//!
//! Rule catalogs are JSON data: each definition lists one or more anchored
//! sub-rules, and [`evaluate`] matches a four-pillar chart against a catalog,
//! producing at most one [`MarkerMatch`] per definition with its evidence.
//! Catalogs are selected by name from a [`CatalogRegistry`].

pub mod anchor;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod registry;

pub use anchor::{
    Anchor, AnchorKind, BranchTable, DayPillarMode, StemTable, SymbolTable, TargetKind,
};
pub use catalog::{MarkerRule, MarkerRuleDefinition, Nature, RuleCatalog};
pub use engine::{evaluate, evaluate_definition};
pub use error::RuleError;
pub use evidence::{Evidence, MarkerMatch, MatchedSymbol, Site};
pub use registry::{BUILTIN_CATALOGS, CatalogRegistry, DEFAULT_CATALOG};
