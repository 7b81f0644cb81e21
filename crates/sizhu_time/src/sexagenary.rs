//! Year, month, day and hour pillars.
//!
//! Reference points:
//! - 1984 is a Jia-Zi year (counted from Start of Spring).
//! - 1949-10-01 is a Jia-Zi day.
//! - The Tiger month of a year starts on the stem given by the year stem mod 5
//!   (甲己之年丙作首).
//! - The Rat hour of a day starts on the stem given by the day stem mod 5
//!   (甲己还加甲).

use chrono::{Datelike, NaiveDate, NaiveTime, Timelike};
use sizhu_base::{Branch, FourPillarChart, Pillar, Stem};

use crate::moment::BirthMoment;
use crate::resolver::{SolarResolution, resolve};
use crate::table::SolarTermTable;

/// A Jia-Zi year.
pub const YEAR_REFERENCE: i32 = 1984;

/// Days from 0001-01-01 (day 1) to 1949-10-01, a Jia-Zi day.
pub const DAY_REFERENCE_CE: i32 = 711_766;

/// Stem of the Tiger (first) month, by year stem mod 5.
pub const TIGER_MONTH_STEM: [Stem; 5] = [Stem::Bing, Stem::Wu, Stem::Geng, Stem::Ren, Stem::Jia];

/// Stem of the Rat (first) hour, by day stem mod 5.
pub const RAT_HOUR_STEM: [Stem; 5] = [Stem::Jia, Stem::Bing, Stem::Wu, Stem::Geng, Stem::Ren];

/// Year pillar. A birth before Start of Spring belongs to the previous
/// sexagenary year.
pub fn year_pillar(calendar_year: i32, before_start_of_spring: bool) -> Pillar {
    let year = if before_start_of_spring {
        calendar_year - 1
    } else {
        calendar_year
    };
    Pillar::from_cycle_index(i64::from(year - YEAR_REFERENCE))
}

/// Month pillar from the year stem and the resolved month branch.
pub fn month_pillar(year_stem: Stem, month_branch: Branch) -> Pillar {
    let start = TIGER_MONTH_STEM[(year_stem.index() % 5) as usize];
    let stem = start.advance(i64::from(month_branch.offset_from(Branch::Yin)));
    debug_assert!(Pillar::new(stem, month_branch).is_some());
    Pillar {
        stem,
        branch: month_branch,
    }
}

/// Day pillar from the local civil date.
pub fn day_pillar(date: NaiveDate) -> Pillar {
    Pillar::from_cycle_index(i64::from(date.num_days_from_ce() - DAY_REFERENCE_CE))
}

/// Two-hour branch: 23:00-00:59 is Zi, 01:00-02:59 Chou, and so on.
pub fn hour_branch(time: NaiveTime) -> Branch {
    Branch::from_index(i64::from((time.hour() + 1) / 2))
}

/// Hour pillar. 23:00 and later stays on the same civil day.
pub fn hour_pillar(day_stem: Stem, time: NaiveTime) -> Pillar {
    let branch = hour_branch(time);
    let start = RAT_HOUR_STEM[(day_stem.index() % 5) as usize];
    let stem = start.advance(i64::from(branch.index()));
    debug_assert!(Pillar::new(stem, branch).is_some());
    Pillar { stem, branch }
}

/// All four pillars of a birth moment, given its solar resolution.
pub fn four_pillars(moment: &BirthMoment, resolution: &SolarResolution) -> FourPillarChart {
    let year = year_pillar(moment.date().year(), resolution.before_start_of_spring);
    let month = month_pillar(year.stem, resolution.month_branch);
    let day = day_pillar(moment.date());
    let hour = hour_pillar(day.stem, moment.time());
    FourPillarChart {
        year,
        month,
        day,
        hour,
    }
}

/// Resolve and compute in one step.
pub fn compute_chart(
    table: &SolarTermTable,
    moment: &BirthMoment,
) -> (FourPillarChart, SolarResolution) {
    let resolution = resolve(table, moment);
    (four_pillars(moment, &resolution), resolution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizhu_base::ALL_BRANCHES;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn day_reference_constant() {
        assert_eq!(date(1949, 10, 1).num_days_from_ce(), DAY_REFERENCE_CE);
        assert_eq!(day_pillar(date(1949, 10, 1)).to_string(), "甲子");
    }

    #[test]
    fn year_pillars() {
        assert_eq!(year_pillar(1984, false).to_string(), "甲子");
        assert_eq!(year_pillar(1984, true).to_string(), "癸亥");
        assert_eq!(year_pillar(2024, false).to_string(), "甲辰");
        assert_eq!(year_pillar(1900, false).to_string(), "庚子");
    }

    #[test]
    fn tiger_month_starts() {
        assert_eq!(month_pillar(Stem::Jia, Branch::Yin).to_string(), "丙寅");
        assert_eq!(month_pillar(Stem::Ji, Branch::Yin).to_string(), "丙寅");
        assert_eq!(month_pillar(Stem::Yi, Branch::Yin).to_string(), "戊寅");
        assert_eq!(month_pillar(Stem::Gui, Branch::Yin).to_string(), "甲寅");
        // Zi and Chou close the year, ten and eleven months after Tiger.
        assert_eq!(month_pillar(Stem::Gui, Branch::Zi).to_string(), "甲子");
        assert_eq!(month_pillar(Stem::Gui, Branch::Chou).to_string(), "乙丑");
    }

    #[test]
    fn month_pillars_are_legal() {
        for s in 0..10 {
            for b in ALL_BRANCHES {
                let p = month_pillar(Stem::from_index(s), b);
                assert!(Pillar::new(p.stem, p.branch).is_some());
            }
        }
    }

    #[test]
    fn hour_branches() {
        assert_eq!(hour_branch(hm(23, 0)), Branch::Zi);
        assert_eq!(hour_branch(hm(0, 59)), Branch::Zi);
        assert_eq!(hour_branch(hm(1, 0)), Branch::Chou);
        assert_eq!(hour_branch(hm(11, 59)), Branch::Wu);
        assert_eq!(hour_branch(hm(22, 59)), Branch::Hai);
    }

    #[test]
    fn rat_hour_starts() {
        assert_eq!(hour_pillar(Stem::Jia, hm(0, 30)).to_string(), "甲子");
        assert_eq!(hour_pillar(Stem::Ji, hm(23, 30)).to_string(), "甲子");
        assert_eq!(hour_pillar(Stem::Yi, hm(0, 30)).to_string(), "丙子");
        assert_eq!(hour_pillar(Stem::Gui, hm(22, 0)).to_string(), "癸亥");
    }

    #[test]
    fn late_rat_hour_keeps_day() {
        let d = date(2024, 2, 10);
        let day = day_pillar(d);
        let m = BirthMoment::new(d, hm(23, 30), 480).unwrap();
        let (chart, _) = compute_chart(&SolarTermTable::embedded_only(), &m);
        assert_eq!(chart.day, day);
        assert_eq!(chart.hour.branch, Branch::Zi);
    }
}
