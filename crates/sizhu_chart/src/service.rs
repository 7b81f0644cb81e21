//! Chart assembly: validate, resolve, compute, evaluate, persist.

use tracing::{debug, info, warn};

use sizhu_rules::CatalogRegistry;
use sizhu_time::{CsvStore, SolarTermTable, compute_chart};

use crate::assembly::{AssembledChart, ComputedChart, PersistenceStatus};
use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::repository::{ChartRepository, JsonLinesRepository};
use crate::request::{BirthRequest, CallerId, validate};

/// Computes charts. Shared read-only between requests.
pub struct ChartService {
    config: ChartConfig,
    terms: SolarTermTable,
    catalogs: CatalogRegistry,
    repository: Option<Box<dyn ChartRepository>>,
}

impl std::fmt::Debug for ChartService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChartService")
            .field("config", &self.config)
            .field("terms", &self.terms)
            .field("catalogs", &self.catalogs.names().collect::<Vec<_>>())
            .field("repository", &self.repository.as_ref().map(|r| r.name()))
            .finish()
    }
}

impl ChartService {
    /// Service with the embedded solar terms, the built-in catalogs and no
    /// repository.
    pub fn new(config: ChartConfig) -> Result<Self, ChartError> {
        config.validate()?;
        let service = Self {
            config,
            terms: SolarTermTable::embedded_only(),
            catalogs: CatalogRegistry::builtin(),
            repository: None,
        };
        service.check_default_catalog()?;
        Ok(service)
    }

    /// Service wired from the paths named in `config`.
    ///
    /// A solar-term file or catalog directory that cannot be read is logged
    /// and left out; the embedded data and built-in catalogs still apply.
    pub fn from_config(config: ChartConfig) -> Result<Self, ChartError> {
        config.validate()?;

        let terms = match &config.solar_term_file {
            Some(path) => match CsvStore::load(path) {
                Ok(store) => SolarTermTable::with_store(store),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "solar-term file unavailable, using embedded data");
                    SolarTermTable::embedded_only()
                }
            },
            None => SolarTermTable::embedded_only(),
        };

        let mut catalogs = CatalogRegistry::builtin();
        if let Some(dir) = &config.catalog_dir {
            if let Err(e) = catalogs.load_dir(dir) {
                warn!(dir = %dir.display(), error = %e, "catalog directory unavailable");
            }
        }

        let repository: Option<Box<dyn ChartRepository>> = config
            .record_file
            .as_ref()
            .map(|path| Box::new(JsonLinesRepository::new(path)) as Box<dyn ChartRepository>);

        let service = Self {
            config,
            terms,
            catalogs,
            repository,
        };
        service.check_default_catalog()?;
        Ok(service)
    }

    fn check_default_catalog(&self) -> Result<(), ChartError> {
        if self.catalogs.contains(&self.config.default_catalog) {
            Ok(())
        } else {
            Err(ChartError::InvalidConfig(format!(
                "default catalog {:?} is not registered",
                self.config.default_catalog
            )))
        }
    }

    pub fn with_terms(mut self, terms: SolarTermTable) -> Self {
        self.terms = terms;
        self
    }

    /// Replace the catalog registry. Requests fall back to the configured
    /// default catalog, which must be present in `catalogs`.
    pub fn with_catalogs(mut self, catalogs: CatalogRegistry) -> Result<Self, ChartError> {
        self.catalogs = catalogs;
        self.check_default_catalog()?;
        Ok(self)
    }

    pub fn with_repository(mut self, repository: impl ChartRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn terms(&self) -> &SolarTermTable {
        &self.terms
    }

    pub fn catalogs(&self) -> &CatalogRegistry {
        &self.catalogs
    }

    /// Compute the chart for `request`.
    ///
    /// Only invalid input is an error. With a caller the chart is also handed
    /// to the repository; the outcome is reported in `persistence`.
    pub fn compute(
        &self,
        request: &BirthRequest,
        caller: Option<&CallerId>,
    ) -> Result<AssembledChart, ChartError> {
        let moment = validate(request, &self.config)?;
        let catalog_name = request
            .catalog
            .as_deref()
            .map(str::trim)
            .unwrap_or(self.config.default_catalog.as_str());
        let catalog = self
            .catalogs
            .get(catalog_name)
            .map_err(|e| ChartError::input("catalog", e.to_string()))?;

        let (pillars, solar) = compute_chart(&self.terms, &moment);
        let chart = ComputedChart::assemble(moment, &pillars, solar, catalog);
        debug!(
            pillars = %pillars,
            source = solar.source.name(),
            markers = chart.markers.len(),
            "computed chart"
        );

        let persistence = self.persist(caller, request, &chart);
        Ok(AssembledChart {
            request: request.clone(),
            chart,
            persistence,
        })
    }

    fn persist(
        &self,
        caller: Option<&CallerId>,
        request: &BirthRequest,
        chart: &ComputedChart,
    ) -> PersistenceStatus {
        let Some(caller) = caller else {
            return PersistenceStatus::Guest;
        };
        let Some(repository) = &self.repository else {
            debug!(caller = %caller, "no repository configured, chart not stored");
            return PersistenceStatus::Disabled;
        };
        match repository.save(caller, request, chart) {
            Ok(record_id) => {
                info!(caller = %caller, record = %record_id, repository = repository.name(), "stored chart");
                PersistenceStatus::Stored { record_id }
            }
            Err(e) => {
                warn!(caller = %caller, repository = repository.name(), error = %e, "chart not stored");
                PersistenceStatus::Failed
            }
        }
    }
}
