//! Interval Calculator
//!
//! Expands a rollover index pattern into one concrete index name per
//! calendar bucket between two instants.

use chrono::{DateTime, Utc};

use crate::interval::error::{IntervalError, IntervalResult};
use crate::interval::template::IndexTemplate;
use crate::interval::Interval;

/// Default cap on the number of index names one expansion may produce
pub const DEFAULT_MAX_INDICES: usize = 10_000;

/// Pure calculator for rollover index names
///
/// Absent bounds default to the calculator's clock, which is `Utc::now`
/// unless overridden with [`IntervalCalculator::with_clock`]. Ranges
/// covering more than `max_indices` buckets are rejected before any name is
/// generated.
#[derive(Debug, Clone, Copy)]
pub struct IntervalCalculator {
    clock: fn() -> DateTime<Utc>,
    max_indices: usize,
}

impl Default for IntervalCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl IntervalCalculator {
    /// Create a calculator using the system clock for open bounds
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Create a calculator with a fixed clock for open bounds
    pub fn with_clock(clock: fn() -> DateTime<Utc>) -> Self {
        Self {
            clock,
            max_indices: DEFAULT_MAX_INDICES,
        }
    }

    /// Builder method: cap the number of names one expansion may produce
    pub fn max_indices(mut self, limit: usize) -> Self {
        self.max_indices = limit;
        self
    }

    /// Current cap on names per expansion
    pub fn index_limit(&self) -> usize {
        self.max_indices
    }

    /// Build the ordered list of index names covering `[start, stop]`
    ///
    /// # Arguments
    /// * `pattern_id` - Index name template, e.g. `[logstash-]YYYY.MM.DD`
    /// * `interval` - Rollover step name, e.g. `days`
    /// * `start`, `stop` - Range bounds; swapped if given out of order
    pub fn to_index_list(
        &self,
        pattern_id: &str,
        interval: &str,
        start: Option<DateTime<Utc>>,
        stop: Option<DateTime<Utc>>,
    ) -> IntervalResult<Vec<String>> {
        let interval: Interval = interval.parse()?;
        let template = IndexTemplate::parse(pattern_id)?;

        let start = start.unwrap_or_else(self.clock);
        let stop = stop.unwrap_or_else(self.clock);
        let (low, high) = if start <= stop {
            (start, stop)
        } else {
            (stop, start)
        };

        let end = bucket_start(interval, high)?;
        let mut bucket = bucket_start(interval, low)?;

        let count = interval.buckets_between(bucket, end);
        if count > self.max_indices as u64 {
            tracing::warn!(
                pattern = pattern_id,
                interval = interval.name(),
                count,
                limit = self.max_indices,
                "Rejecting oversized interval expansion"
            );
            return Err(IntervalError::TooManyIndices {
                count,
                limit: self.max_indices,
            });
        }

        let mut indices = Vec::with_capacity(count as usize);

        while bucket <= end {
            indices.push(template.render(&bucket));
            bucket = match interval.step(bucket) {
                Some(next) => next,
                None => break,
            };
        }

        tracing::trace!(
            pattern = pattern_id,
            interval = interval.name(),
            count = indices.len(),
            "Expanded rollover interval"
        );

        Ok(indices)
    }
}

fn bucket_start(interval: Interval, at: DateTime<Utc>) -> IntervalResult<DateTime<Utc>> {
    interval
        .start_of(at)
        .ok_or_else(|| IntervalError::OutOfRange(at.to_rfc3339()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 9, 22, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_daily_range_is_inclusive() {
        let calc = IntervalCalculator::new();
        let list = calc
            .to_index_list(
                "[logstash-]YYYY.MM.DD",
                "days",
                Some(at(2015, 9, 20, 18)),
                Some(at(2015, 9, 22, 3)),
            )
            .unwrap();
        assert_eq!(
            list,
            vec![
                "logstash-2015.09.20",
                "logstash-2015.09.21",
                "logstash-2015.09.22"
            ]
        );
    }

    #[test]
    fn test_hourly_range() {
        let calc = IntervalCalculator::new();
        let list = calc
            .to_index_list(
                "[app-]YYYY.MM.DD.HH",
                "hourly",
                Some(at(2015, 12, 31, 22)),
                Some(at(2016, 1, 1, 0)),
            )
            .unwrap();
        assert_eq!(
            list,
            vec!["app-2015.12.31.22", "app-2015.12.31.23", "app-2016.01.01.00"]
        );
    }

    #[test]
    fn test_weekly_buckets_start_on_monday() {
        let calc = IntervalCalculator::new();
        // 2015-09-16 is a Wednesday, 2015-09-28 a Monday
        let list = calc
            .to_index_list(
                "[w-]GGGG.WW",
                "weeks",
                Some(at(2015, 9, 16, 0)),
                Some(at(2015, 9, 28, 0)),
            )
            .unwrap();
        assert_eq!(list, vec!["w-2015.38", "w-2015.39", "w-2015.40"]);
    }

    #[test]
    fn test_monthly_and_yearly() {
        let calc = IntervalCalculator::new();
        let months = calc
            .to_index_list(
                "[m-]YYYY.MM",
                "months",
                Some(at(2015, 11, 30, 0)),
                Some(at(2016, 2, 1, 0)),
            )
            .unwrap();
        assert_eq!(months, vec!["m-2015.11", "m-2015.12", "m-2016.01", "m-2016.02"]);

        let years = calc
            .to_index_list("[y-]YYYY", "Yearly", Some(at(2013, 6, 1, 0)), Some(at(2015, 1, 1, 0)))
            .unwrap();
        assert_eq!(years, vec!["y-2013", "y-2014", "y-2015"]);
    }

    #[test]
    fn test_reversed_bounds_are_ordered() {
        let calc = IntervalCalculator::new();
        let list = calc
            .to_index_list("[d-]MM.DD", "days", Some(at(2015, 1, 3, 0)), Some(at(2015, 1, 1, 0)))
            .unwrap();
        assert_eq!(list, vec!["d-01.01", "d-01.02", "d-01.03"]);
    }

    #[test]
    fn test_open_bounds_use_clock() {
        let calc = IntervalCalculator::with_clock(fixed_now);
        let list = calc
            .to_index_list("[logstash-]YYYY.MM.DD", "days", None, None)
            .unwrap();
        assert_eq!(list, vec!["logstash-2015.09.22"]);

        let list = calc
            .to_index_list("[logstash-]YYYY.MM.DD", "days", Some(at(2015, 9, 21, 0)), None)
            .unwrap();
        assert_eq!(list, vec!["logstash-2015.09.21", "logstash-2015.09.22"]);
    }

    #[test]
    fn test_unknown_interval() {
        let calc = IntervalCalculator::new();
        let err = calc
            .to_index_list("[logstash-]YYYY", "fortnights", None, None)
            .unwrap_err();
        assert_eq!(err, IntervalError::UnknownInterval("fortnights".to_string()));
    }

    #[test]
    fn test_earliest_instant_is_out_of_range_for_weeks() {
        let calc = IntervalCalculator::new();
        let min = DateTime::<Utc>::MIN_UTC;

        let err = calc
            .to_index_list("[w-]GGGG.WW", "weeks", Some(min), Some(min))
            .unwrap_err();
        assert!(matches!(err, IntervalError::OutOfRange(_)));

        // Daily buckets at the same instant still exist
        let list = calc
            .to_index_list("[d-]YYYY", "days", Some(min), Some(min))
            .unwrap();
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_oversized_range_is_rejected() {
        let calc = IntervalCalculator::new();
        let err = calc
            .to_index_list(
                "[logstash-]YYYY.MM.DD.HH",
                "hours",
                Some(DateTime::<Utc>::MIN_UTC),
                Some(at(2015, 9, 22, 0)),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            IntervalError::TooManyIndices { limit: DEFAULT_MAX_INDICES, .. }
        ));

        let err = calc
            .to_index_list("[d-]YYYY.MM.DD", "days", Some(at(1, 1, 1, 0)), Some(at(2015, 1, 1, 0)))
            .unwrap_err();
        assert!(matches!(err, IntervalError::TooManyIndices { count, .. } if count > 700_000));
    }

    #[test]
    fn test_custom_index_limit() {
        let calc = IntervalCalculator::new().max_indices(3);
        assert_eq!(calc.index_limit(), 3);

        let list = calc
            .to_index_list("[d-]MM.DD", "days", Some(at(2015, 1, 1, 0)), Some(at(2015, 1, 3, 0)))
            .unwrap();
        assert_eq!(list.len(), 3);

        let err = calc
            .to_index_list("[d-]MM.DD", "days", Some(at(2015, 1, 1, 0)), Some(at(2015, 1, 4, 0)))
            .unwrap_err();
        assert_eq!(err, IntervalError::TooManyIndices { count: 4, limit: 3 });
    }
}
