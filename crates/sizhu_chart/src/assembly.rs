//! The assembled chart handed back to callers.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sizhu_base::{
    ElementalScore, FourPillarChart, Nayin, Pillar, PillarSlot, PolarityRatio, RoleAssignment,
    nayin,
};
use sizhu_rules::{MarkerMatch, RuleCatalog, evaluate};
use sizhu_time::{BirthMoment, SolarResolution};

use crate::repository::RecordId;
use crate::request::BirthRequest;

/// One pillar with its nayin label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PillarEntry {
    pub slot: PillarSlot,
    pub pillar: Pillar,
    pub nayin: Nayin,
}

/// Everything derived from a birth moment and a catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputedChart {
    pub moment: BirthMoment,
    pub utc_instant: DateTime<Utc>,
    pub pillars: [PillarEntry; 4],
    pub elements: ElementalScore,
    pub polarity: PolarityRatio,
    pub roles: RoleAssignment,
    pub solar: SolarResolution,
    pub catalog: String,
    pub catalog_version: String,
    pub markers: Vec<MarkerMatch>,
}

impl ComputedChart {
    pub fn assemble(
        moment: BirthMoment,
        chart: &FourPillarChart,
        solar: SolarResolution,
        catalog: &RuleCatalog,
    ) -> Self {
        let pillars = chart.pillars().map(|(slot, pillar)| PillarEntry {
            slot,
            pillar,
            nayin: nayin(pillar),
        });
        Self {
            moment,
            utc_instant: moment.utc_instant(),
            pillars,
            elements: ElementalScore::from_chart(chart),
            polarity: PolarityRatio::from_chart(chart),
            roles: RoleAssignment::from_chart(chart),
            solar,
            catalog: catalog.name.clone(),
            catalog_version: catalog.version.clone(),
            markers: evaluate(chart, catalog),
        }
    }

    /// The four pillars as a chart.
    pub fn four_pillars(&self) -> FourPillarChart {
        let [year, month, day, hour] = self.pillars.map(|e| e.pillar);
        FourPillarChart {
            year,
            month,
            day,
            hour,
        }
    }
}

/// What happened to the chart after it was computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PersistenceStatus {
    /// No caller identity; the chart was not stored.
    Guest,
    /// No repository is configured.
    Disabled,
    Stored { record_id: RecordId },
    /// The repository rejected the record. The chart is still complete.
    Failed,
}

/// Request echo, computed chart and persistence outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssembledChart {
    pub request: BirthRequest,
    #[serde(flatten)]
    pub chart: ComputedChart,
    pub persistence: PersistenceStatus,
}
