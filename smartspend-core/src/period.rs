//! Bucket-key derivation: mapping a local calendar date to the period that
//! contains it.
//!
//! Seeding and folding both go through [`PeriodKey::containing`], so a
//! transaction lands in a seeded bucket exactly when their keys compare equal.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Serialize, Serializer};

use crate::timeframe::Timeframe;

/// Canonical key of one bucket: the timeframe plus the first day of the period.
///
/// Renders as `YYYY-MM-DD` (day and week), `YYYY-MM` (month) or `YYYY` (year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    timeframe: Timeframe,
    start: NaiveDate,
}

impl PeriodKey {
    /// Key of the period of `timeframe` containing `date`.
    pub fn containing(date: NaiveDate, timeframe: Timeframe) -> Self {
        let start = match timeframe {
            Timeframe::Daily => date,
            Timeframe::Weekly => week_start(date),
            Timeframe::Monthly => month_start(date),
            Timeframe::Yearly => date - Duration::days(i64::from(date.ordinal0())),
        };
        Self { timeframe, start }
    }

    pub fn timeframe(&self) -> Timeframe {
        self.timeframe
    }

    /// First calendar day of the period.
    pub fn start_date(&self) -> NaiveDate {
        self.start
    }

    /// The period immediately before this one.
    pub fn previous(&self) -> Self {
        let prior_day = self.start - Duration::days(1);
        Self::containing(prior_day, self.timeframe)
    }

    /// Human-readable label, e.g. `05 Jan`, `Wk 07 Jan`, `Jan 24`, `2024`.
    pub fn label(&self) -> String {
        match self.timeframe {
            Timeframe::Daily => self.start.format("%d %b").to_string(),
            Timeframe::Weekly => format!("Wk {}", self.start.format("%d %b")),
            Timeframe::Monthly => self.start.format("%b %y").to_string(),
            Timeframe::Yearly => self.start.year().to_string(),
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.timeframe {
            Timeframe::Daily | Timeframe::Weekly => write!(f, "{}", self.start.format("%Y-%m-%d")),
            Timeframe::Monthly => write!(f, "{}", self.start.format("%Y-%m")),
            Timeframe::Yearly => write!(f, "{:04}", self.start.year()),
        }
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Sunday on or before `date`.
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.day0()))
}
