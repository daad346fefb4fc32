//! Index Pattern Resolution
//!
//! Entry point that turns an [`IndexPattern`] and a time range into the
//! indices to search. The first matching strategy wins:
//!
//! 1. the pattern declares a rollover interval → expand it locally
//! 2. the pattern is a wildcard with a time field → ask the backend
//! 3. otherwise → the pattern id itself

use std::sync::Arc;

use crate::backend::FieldStatsClient;
use crate::interval::IntervalCalculator;
use crate::pattern::IndexPattern;
use crate::resolve::calculate::IndexCalculator;
use crate::resolve::error::{ResolveError, ResolveResult};
use crate::resolve::types::{IndexList, SortOrder, TimeBound};

/// How a pattern will be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Expand a rollover interval without I/O
    Interval,
    /// Query the backend's field statistics
    FieldStats,
    /// Use the pattern id unchanged
    Literal,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Interval => "interval",
            Strategy::FieldStats => "field_stats",
            Strategy::Literal => "literal",
        }
    }
}

/// Resolves index patterns to concrete index lists
///
/// Holds no per-call state; share it behind an `Arc` and call it
/// concurrently.
#[derive(Clone)]
pub struct Resolver {
    intervals: IntervalCalculator,
    indices: IndexCalculator,
}

impl Resolver {
    /// Create a resolver from its two collaborators
    pub fn new(intervals: IntervalCalculator, indices: IndexCalculator) -> Self {
        Self { intervals, indices }
    }

    /// Create a resolver with the default interval calculator
    pub fn with_client(client: Arc<dyn FieldStatsClient>) -> Self {
        Self::new(IntervalCalculator::new(), IndexCalculator::new(client))
    }

    /// Builder method: cap the names an interval pattern may expand to
    pub fn max_indices(mut self, limit: usize) -> Self {
        self.intervals = self.intervals.max_indices(limit);
        self
    }

    /// Pick the resolution strategy for a pattern
    pub fn strategy(&self, pattern: &IndexPattern) -> Strategy {
        if pattern.get_interval().is_some() {
            Strategy::Interval
        } else if pattern.has_time_field() && pattern.is_wildcard() {
            Strategy::FieldStats
        } else {
            Strategy::Literal
        }
    }

    /// Resolve a pattern for the given range and order
    ///
    /// Interval lists are chronological, reversed for `Desc`.
    pub async fn to_index_list(
        &self,
        pattern: &IndexPattern,
        start: Option<&TimeBound>,
        stop: Option<&TimeBound>,
        sort_order: Option<SortOrder>,
    ) -> ResolveResult<IndexList> {
        let strategy = self.strategy(pattern);
        tracing::debug!(
            pattern = %pattern.id,
            strategy = strategy.as_str(),
            sort = ?sort_order,
            "Resolving index pattern"
        );

        match (strategy, pattern.get_interval(), pattern.time_field_name.as_deref()) {
            (Strategy::Interval, Some(interval), _) => {
                let mut indices = self.intervals.to_index_list(
                    &pattern.id,
                    interval,
                    to_instant(start)?,
                    to_instant(stop)?,
                )?;
                if sort_order == Some(SortOrder::Desc) {
                    indices.reverse();
                }
                Ok(IndexList::Many(indices))
            }
            (Strategy::FieldStats, _, Some(time_field)) => {
                let indices = self
                    .indices
                    .calculate_indices(&pattern.id, time_field, start, stop, sort_order)
                    .await?;
                Ok(IndexList::Many(indices))
            }
            _ => Ok(IndexList::Single(pattern.id.clone())),
        }
    }
}

fn to_instant(bound: Option<&TimeBound>) -> ResolveResult<Option<chrono::DateTime<chrono::Utc>>> {
    match bound {
        None => Ok(None),
        Some(bound) => bound
            .to_instant()
            .map(Some)
            .ok_or_else(|| ResolveError::InvalidTimeBound(bound.to_string())),
    }
}
