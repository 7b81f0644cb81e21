//! Chart assembly service.
//!
//! [`ChartService::compute`] validates a [`BirthRequest`], resolves the
//! solar month, computes the four pillars and their derived sections,
//! evaluates the selected rule catalog and, when a caller is identified,
//! hands the result to a [`ChartRepository`]. Only invalid input fails a
//! request; missing calendar data, malformed rules and storage failures
//! degrade to a complete chart.

pub mod assembly;
pub mod config;
pub mod error;
pub mod repository;
pub mod request;
pub mod service;

pub use assembly::{AssembledChart, ComputedChart, PersistenceStatus, PillarEntry};
pub use config::{ChartConfig, DEFAULT_OFFSET_MINUTES};
pub use error::{ChartError, PersistError};
pub use repository::{ChartRepository, JsonLinesRepository, MemoryRepository, RecordId, record_id};
pub use request::{BirthRequest, CallerId, validate};
pub use service::ChartService;
