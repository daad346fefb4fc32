//! Rollover Intervals
//!
//! Patterns that roll over on a calendar schedule (one index per hour, day,
//! week, month or year) are expanded locally, without asking the backend:
//!
//! ```text
//! "[logstash-]YYYY.MM.DD", days, 2015-09-20 .. 2015-09-22
//!        ↓
//! [logstash-2015.09.20, logstash-2015.09.21, logstash-2015.09.22]
//! ```

mod calculator;
mod error;
mod template;

pub use calculator::{IntervalCalculator, DEFAULT_MAX_INDICES};
pub use error::{IntervalError, IntervalResult};
pub use template::{DateToken, IndexTemplate, TemplateItem};

use chrono::{DateTime, Datelike, Duration, Months, NaiveTime, TimeZone, Timelike, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Calendar step between two rollover indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    Hours,
    Days,
    Weeks,
    Months,
    Years,
}

impl Interval {
    /// All intervals, shortest first
    pub fn all() -> &'static [Interval] {
        &[
            Interval::Hours,
            Interval::Days,
            Interval::Weeks,
            Interval::Months,
            Interval::Years,
        ]
    }

    /// Canonical name, as stored on an index pattern
    pub fn name(&self) -> &'static str {
        match self {
            Interval::Hours => "hours",
            Interval::Days => "days",
            Interval::Weeks => "weeks",
            Interval::Months => "months",
            Interval::Years => "years",
        }
    }

    /// Human-readable label
    pub fn display(&self) -> &'static str {
        match self {
            Interval::Hours => "Hourly",
            Interval::Days => "Daily",
            Interval::Weeks => "Weekly",
            Interval::Months => "Monthly",
            Interval::Years => "Yearly",
        }
    }

    /// Truncate an instant to the start of its bucket (UTC, ISO weeks)
    ///
    /// `None` when the bucket would start before the earliest representable
    /// date.
    pub fn start_of(&self, at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let date = at.date_naive();
        let day_start = match self {
            Interval::Hours | Interval::Days => Some(date),
            Interval::Weeks => date.checked_sub_signed(Duration::days(
                date.weekday().num_days_from_monday() as i64,
            )),
            Interval::Months => date.with_day(1),
            Interval::Years => date.with_ordinal(1),
        }?;
        let midnight = Utc.from_utc_datetime(&day_start.and_time(NaiveTime::default()));

        match self {
            Interval::Hours => midnight.checked_add_signed(Duration::hours(at.hour() as i64)),
            _ => Some(midnight),
        }
    }

    /// Number of buckets from `first` to `last` inclusive, both bucket starts
    pub fn buckets_between(&self, first: DateTime<Utc>, last: DateTime<Utc>) -> u64 {
        if last < first {
            return 0;
        }
        let span = last - first;
        let steps = match self {
            Interval::Hours => span.num_hours(),
            Interval::Days => span.num_days(),
            Interval::Weeks => span.num_weeks(),
            Interval::Months => month_index(last) - month_index(first),
            Interval::Years => (last.year() - first.year()) as i64,
        };
        steps.unsigned_abs() + 1
    }

    /// Advance a bucket start by one interval
    pub fn step(&self, bucket: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            Interval::Hours => bucket.checked_add_signed(Duration::hours(1)),
            Interval::Days => bucket.checked_add_signed(Duration::days(1)),
            Interval::Weeks => bucket.checked_add_signed(Duration::weeks(1)),
            Interval::Months => bucket.checked_add_months(Months::new(1)),
            Interval::Years => bucket.checked_add_months(Months::new(12)),
        }
    }
}

fn month_index(at: DateTime<Utc>) -> i64 {
    at.year() as i64 * 12 + at.month0() as i64
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hours" | "hour" | "hourly" => Ok(Interval::Hours),
            "days" | "day" | "daily" => Ok(Interval::Days),
            "weeks" | "week" | "weekly" => Ok(Interval::Weeks),
            "months" | "month" | "monthly" => Ok(Interval::Months),
            "years" | "year" | "yearly" => Ok(Interval::Years),
            _ => Err(IntervalError::UnknownInterval(s.to_string())),
        }
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
