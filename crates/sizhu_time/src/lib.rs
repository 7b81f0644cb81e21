//! Calendar layer of the four-pillar engine.
//!
//! This crate provides:
//! - `BirthMoment`: local date/time with a UTC offset
//! - The 24 solar terms and per-year term instants
//! - Solar-term stores (embedded dataset, CSV file, in-memory) and the
//!   layered `SolarTermTable`
//! - Solar-term resolution with an approximate fallback tier
//! - The sexagenary calculator for year, month, day and hour pillars

pub mod error;
pub mod moment;
pub mod resolver;
pub mod sexagenary;
pub mod solar_term;
pub mod store;
pub mod table;

pub use error::{StoreError, TimeError};
pub use moment::{BirthMoment, GeoPoint, MAX_OFFSET_MINUTES};
pub use resolver::{APPROX_BOUNDARY_DAY, SolarResolution, approximate, resolve};
pub use sexagenary::{
    DAY_REFERENCE_CE, RAT_HOUR_STEM, TIGER_MONTH_STEM, YEAR_REFERENCE, compute_chart, day_pillar,
    four_pillars, hour_branch, hour_pillar, month_pillar, year_pillar,
};
pub use solar_term::{ALL_SOLAR_TERMS, SolarTerm, YearTerms};
pub use store::{CsvStore, EmbeddedStore, MemoryStore, SolarTermStore, parse_terms_csv};
pub use table::{ResolutionSource, SolarTermTable};
