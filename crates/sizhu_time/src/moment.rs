//! Birth moment: a local civil date and time plus its UTC offset.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TimeError;

/// Largest accepted UTC offset magnitude, in minutes (UTC±14:00).
pub const MAX_OFFSET_MINUTES: i32 = 14 * 60;

/// Geographic coordinates in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self, TimeError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(TimeError::CoordinatesOutOfRange { lat, lon });
        }
        Ok(Self { lat, lon })
    }
}

/// An immutable birth moment.
///
/// The local date and time are kept as given; the UTC instant is derived from
/// them and the offset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BirthMoment {
    date: NaiveDate,
    time: NaiveTime,
    offset_minutes: i32,
    location: Option<GeoPoint>,
}

impl BirthMoment {
    pub fn new(date: NaiveDate, time: NaiveTime, offset_minutes: i32) -> Result<Self, TimeError> {
        if offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(TimeError::OffsetOutOfRange(offset_minutes));
        }
        Ok(Self {
            date,
            time,
            offset_minutes,
            location: None,
        })
    }

    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn offset_minutes(&self) -> i32 {
        self.offset_minutes
    }

    pub fn location(&self) -> Option<GeoPoint> {
        self.location
    }

    pub fn local(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// The absolute instant: local time minus the offset.
    pub fn utc_instant(&self) -> DateTime<Utc> {
        let naive = self.local() - Duration::minutes(i64::from(self.offset_minutes));
        Utc.from_utc_datetime(&naive)
    }
}
