//! Sighting statistics for the summary screen and headless output.
//!
//! All figures are computed from the loaded sighting list. Sightings whose
//! timestamp could not be parsed count towards the per-animal totals but not
//! towards any daily figure.

use crate::api::{Alert, Sighting};
use crate::domain::{AlertKind, AnimalKind, GeoPoint};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum SummaryScope {
    Month { year: i32, month: u32 },
    Day { date: NaiveDate },
}

impl SummaryScope {
    pub fn month_of(date: NaiveDate) -> Self {
        Self::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        match self {
            Self::Month { year, month } => date.year() == year && date.month() == month,
            Self::Day { date: day } => date == day,
        }
    }

    /// Month view of the latest sighting, or of `today` when there is none.
    pub fn latest_month(sightings: &[Sighting], today: NaiveDate) -> Self {
        Self::month_of(latest(sightings).unwrap_or(today))
    }

    /// Steps one month (or one day) forward or back.
    pub fn shift(self, forward: bool) -> Self {
        match self {
            Self::Month { year, month } => {
                let (year, month) = match (forward, month) {
                    (true, 12) => (year + 1, 1),
                    (true, m) => (year, m + 1),
                    (false, 1) => (year - 1, 12),
                    (false, m) => (year, m - 1),
                };
                Self::Month { year, month }
            }
            Self::Day { date } => {
                let next = if forward { date.succ_opt() } else { date.pred_opt() };
                Self::Day {
                    date: next.unwrap_or(date),
                }
            }
        }
    }
}

impl fmt::Display for SummaryScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Month { year, month } => match NaiveDate::from_ymd_opt(*year, *month, 1) {
                Some(first) => write!(f, "{}", first.format("%B %Y")),
                None => write!(f, "{year}-{month:02}"),
            },
            Self::Day { date } => write!(f, "{}", date.format("%a %d %b %Y")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesSummary {
    pub animal: AnimalKind,
    pub scope: SummaryScope,
    pub total: u64,
    /// Total divided by the number of days in scope that have any sighting.
    pub average: f64,
    pub peak: Option<DailyCount>,
    pub daily: Vec<DailyCount>,
    /// Position of the largest single sighting of this animal in scope.
    pub hotspot: Option<GeoPoint>,
}

pub fn summarize(sightings: &[Sighting], animal: AnimalKind, scope: SummaryScope) -> SpeciesSummary {
    let in_scope = sightings
        .iter()
        .filter_map(|s| s.observed_at.map(|at| (at.date(), s)))
        .filter(|(date, _)| scope.contains(*date))
        .collect::<Vec<_>>();

    let active_days = in_scope.iter().map(|(date, _)| *date).collect::<BTreeSet<_>>();

    let mut buckets: BTreeMap<NaiveDate, u64> = active_days.iter().map(|d| (*d, 0)).collect();
    for (date, sighting) in in_scope.iter().filter(|(_, s)| s.animal == animal) {
        *buckets.entry(*date).or_default() += u64::from(sighting.count);
    }
    let daily = buckets
        .into_iter()
        .map(|(date, count)| DailyCount { date, count })
        .collect::<Vec<_>>();

    let total = daily.iter().map(|d| d.count).sum::<u64>();
    let average = if active_days.is_empty() {
        0.0
    } else {
        #[allow(clippy::cast_precision_loss)]
        let average = total as f64 / active_days.len() as f64;
        average
    };

    // Earliest day wins a tie.
    let peak = daily
        .iter()
        .filter(|d| d.count > 0)
        .fold(None::<DailyCount>, |best, d| match best {
            Some(b) if b.count >= d.count => Some(b),
            _ => Some(*d),
        });

    let hotspot = in_scope
        .iter()
        .filter(|(_, s)| s.animal == animal)
        .filter_map(|(_, s)| s.position().map(|p| (s.count, p)))
        .fold(None::<(u32, GeoPoint)>, |best, (count, p)| match best {
            Some((c, _)) if c >= count => best,
            _ => Some((count, p)),
        })
        .map(|(_, p)| p);

    SpeciesSummary {
        animal,
        scope,
        total,
        average,
        peak,
        daily,
        hotspot,
    }
}

/// Sum of counts per animal, every category listed.
pub fn totals_by_animal(sightings: &[Sighting]) -> Vec<(AnimalKind, u64)> {
    AnimalKind::ALL
        .iter()
        .map(|animal| {
            let total = sightings
                .iter()
                .filter(|s| s.animal == *animal)
                .map(|s| u64::from(s.count))
                .sum();
            (*animal, total)
        })
        .collect()
}

pub fn alerts_by_kind(alerts: &[Alert]) -> Vec<(AlertKind, usize)> {
    AlertKind::ALL
        .iter()
        .map(|kind| (*kind, alerts.iter().filter(|a| a.kind == *kind).count()))
        .collect()
}

pub fn days_with_data(sightings: &[Sighting]) -> BTreeSet<NaiveDate> {
    sightings
        .iter()
        .filter_map(|s| s.observed_at.map(|at| at.date()))
        .collect()
}

pub fn latest(sightings: &[Sighting]) -> Option<NaiveDate> {
    days_with_data(sightings).last().copied()
}
