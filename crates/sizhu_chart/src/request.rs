//! Birth request input and its validation.

use std::fmt::{Display, Formatter};

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sizhu_time::{BirthMoment, GeoPoint};

use crate::config::ChartConfig;
use crate::error::ChartError;

/// Birth data as received from the request layer.
///
/// `name`, `gender`, `true_solar_time` and `location` are passed through to
/// the output untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BirthRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub gender: String,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`.
    pub time: String,
    #[serde(default)]
    pub true_solar_time: bool,
    #[serde(default)]
    pub location: Option<String>,
    /// Falls back to [`ChartConfig::default_offset_minutes`].
    #[serde(default)]
    pub offset_minutes: Option<i32>,
    #[serde(default)]
    pub coordinates: Option<GeoPoint>,
    /// Falls back to [`ChartConfig::default_catalog`].
    #[serde(default)]
    pub catalog: Option<String>,
}

impl BirthRequest {
    pub fn new(date: &str, time: &str) -> Self {
        Self {
            date: date.to_string(),
            time: time.to_string(),
            ..Self::default()
        }
    }
}

/// Identity of the caller on whose behalf a chart is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallerId(pub String);

impl CallerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CallerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Check the required birth fields and build the moment they describe.
pub fn validate(request: &BirthRequest, config: &ChartConfig) -> Result<BirthMoment, ChartError> {
    let date = parse_date(&request.date)?;
    let time = parse_time(&request.time)?;
    let offset = request
        .offset_minutes
        .unwrap_or(config.default_offset_minutes);

    let moment = BirthMoment::new(date, time, offset)
        .map_err(|e| ChartError::input("offset_minutes", e.to_string()))?;

    match request.coordinates {
        Some(point) => {
            let point = GeoPoint::new(point.lat, point.lon)
                .map_err(|e| ChartError::input("coordinates", e.to_string()))?;
            Ok(moment.with_location(point))
        }
        None => Ok(moment),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ChartError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ChartError::input("date", "missing"));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| ChartError::input("date", format!("{raw:?}: {e}")))
}

fn parse_time(raw: &str) -> Result<NaiveTime, ChartError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ChartError::input("time", "missing"));
    }
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .map_err(|e| ChartError::input("time", format!("{raw:?}: {e}")))
}
