//! Solar-term resolution: which solar month a birth falls in, and whether it
//! precedes Start of Spring.
//!
//! The timeline searched for a birth in local calendar year Y is the last two
//! terms of Y−1 (Major Snow, Winter Solstice) followed by the 24 terms of Y.
//! The governing term is the latest one whose instant is at or before the
//! birth instant, so a birth exactly on a term belongs to the new month.
//! With offsets up to ±14h the birth instant can never precede Major Snow of
//! Y−1 or reach Minor Cold of Y+1, so this window always suffices.

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use sizhu_base::Branch;
use tracing::debug;

use crate::moment::BirthMoment;
use crate::solar_term::{SolarTerm, YearTerms};
use crate::table::{ResolutionSource, SolarTermTable};

/// Outcome of resolving a birth moment against the solar-term table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SolarResolution {
    pub month_branch: Branch,
    pub before_start_of_spring: bool,
    /// Governing term, absent for approximate resolutions.
    pub term: Option<SolarTerm>,
    pub term_instant: Option<DateTime<Utc>>,
    pub source: ResolutionSource,
}

/// Day of each calendar month on which the approximate month boundary falls
/// (January..December). February's entry doubles as the approximate Start of
/// Spring.
pub const APPROX_BOUNDARY_DAY: [u32; 12] = [6, 4, 6, 5, 6, 6, 7, 8, 8, 8, 7, 7];

/// Resolve a birth moment. Never fails: missing term data degrades to the
/// approximate tier.
pub fn resolve(table: &SolarTermTable, moment: &BirthMoment) -> SolarResolution {
    let year = moment.date().year();
    let birth = moment.utc_instant();

    let Some((current, current_src)) = table.lookup(year) else {
        debug!(year, "no term data, using approximate boundaries");
        return approximate(moment);
    };

    let before_start_of_spring = birth < current.start_of_spring();

    if let Some(found) = governing_in(&current, birth) {
        return SolarResolution {
            month_branch: found.0.month_branch(),
            before_start_of_spring,
            term: Some(found.0),
            term_instant: Some(found.1),
            source: current_src,
        };
    }

    // Before Minor Cold: fall back to the tail of the previous year.
    let Some((previous, previous_src)) = table.lookup(year - 1) else {
        debug!(year = year - 1, "no term data for previous year, using approximate boundaries");
        return approximate(moment);
    };
    let tail = [SolarTerm::Daxue, SolarTerm::Dongzhi]
        .into_iter()
        .map(|t| (t, previous.instant(t)))
        .filter(|(_, instant)| *instant <= birth)
        .last();
    match tail {
        Some((term, instant)) => SolarResolution {
            month_branch: term.month_branch(),
            before_start_of_spring,
            term: Some(term),
            term_instant: Some(instant),
            source: previous_src,
        },
        None => {
            debug!(%birth, "birth precedes the term window, using approximate boundaries");
            approximate(moment)
        }
    }
}

/// Latest term of `terms` at or before `birth`.
fn governing_in(terms: &YearTerms, birth: DateTime<Utc>) -> Option<(SolarTerm, DateTime<Utc>)> {
    terms.iter().take_while(|(_, instant)| *instant <= birth).last()
}

/// Fixed-boundary resolution on the local calendar date.
pub fn approximate(moment: &BirthMoment) -> SolarResolution {
    let date = moment.date();
    let month = date.month();
    let boundary = APPROX_BOUNDARY_DAY[month as usize - 1];
    // Month m from its boundary day onward has branch m mod 12 (Feb = Yin).
    let branch_index = if date.day() >= boundary { month } else { month - 1 };
    let before_start_of_spring = month == 1 || (month == 2 && date.day() < APPROX_BOUNDARY_DAY[1]);
    SolarResolution {
        month_branch: Branch::from_index(i64::from(branch_index)),
        before_start_of_spring,
        term: None,
        term_instant: None,
        source: ResolutionSource::Approximate,
    }
}
