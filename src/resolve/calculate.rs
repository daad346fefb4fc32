//! Index-Constraint Resolver
//!
//! Asks the backend which indices behind a wildcard pattern can hold
//! documents in a time range, then orders them.
//!
//! # Pipeline
//!
//! ```text
//! (pattern, time field, start, stop)
//!        ↓
//! field stats request: max_value >= start, min_value <= stop
//!        ↓
//! per-index min/max in backend order
//!        ↓
//! sort: none → as returned | desc → max_value | asc → min_value
//! ```

use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

use crate::backend::{
    FieldStatsClient, FieldStatsRequest, IndexConstraint, IndexStats, LowerBound, UpperBound,
};
use crate::resolve::error::ResolveResult;
use crate::resolve::types::{SortOrder, TimeBound};

/// Computes the concrete indices behind a wildcard pattern
#[derive(Clone)]
pub struct IndexCalculator {
    client: Arc<dyn FieldStatsClient>,
}

impl IndexCalculator {
    /// Create a calculator backed by the given field statistics client
    pub fn new(client: Arc<dyn FieldStatsClient>) -> Self {
        Self { client }
    }

    /// Build the field statistics request for a pattern and range
    ///
    /// With neither bound the constraint is an empty object: no filtering,
    /// but the time field is still requested.
    pub fn build_request(
        pattern_id: &str,
        time_field: &str,
        start: Option<&TimeBound>,
        stop: Option<&TimeBound>,
    ) -> FieldStatsRequest {
        let constraint = IndexConstraint {
            max_value: start.map(|bound| LowerBound {
                gte: bound.to_constraint_value(),
            }),
            min_value: stop.map(|bound| UpperBound {
                lte: bound.to_constraint_value(),
            }),
        };

        FieldStatsRequest::for_field(pattern_id, time_field, constraint)
    }

    /// Resolve a wildcard pattern to ordered index names
    ///
    /// Backend failures are returned unchanged; an empty response is an
    /// empty list, not an error.
    pub async fn calculate_indices(
        &self,
        pattern_id: &str,
        time_field: &str,
        start: Option<&TimeBound>,
        stop: Option<&TimeBound>,
        sort_order: Option<SortOrder>,
    ) -> ResolveResult<Vec<String>> {
        let request = Self::build_request(pattern_id, time_field, start, stop);
        tracing::debug!(
            pattern = pattern_id,
            time_field,
            constrained = request
                .constraint(time_field)
                .map(|c| !c.is_empty())
                .unwrap_or(false),
            "Calculating indices from field stats"
        );

        let response = self.client.fetch_field_stats(&request).await.map_err(|e| {
            tracing::warn!(pattern = pattern_id, error = %e, "Field stats request failed");
            e
        })?;

        let indices = sort_index_stats(&response.indices, time_field, sort_order);
        tracing::debug!(pattern = pattern_id, count = indices.len(), "Calculated indices");
        Ok(indices)
    }
}

/// Order index names by their statistics for `field`
///
/// Indices lacking the sorted statistic go last; ties fall back to name.
pub fn sort_index_stats(
    stats: &IndexStats,
    field: &str,
    sort_order: Option<SortOrder>,
) -> Vec<String> {
    let Some(order) = sort_order else {
        return stats.names().map(str::to_string).collect();
    };

    let mut keyed: Vec<(&str, Option<&Value>)> = stats
        .iter()
        .map(|(name, index)| {
            let field_stats = index.get(field);
            let key = match order {
                SortOrder::Asc => field_stats.and_then(|s| s.min_value.as_ref()),
                SortOrder::Desc => field_stats.and_then(|s| s.max_value.as_ref()),
            };
            (name, key)
        })
        .collect();

    keyed.sort_by(|(a_name, a_key), (b_name, b_key)| {
        let primary = match (a_key, b_key) {
            (Some(a), Some(b)) => match order {
                SortOrder::Asc => compare_values(a, b),
                SortOrder::Desc => compare_values(b, a),
            },
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        primary.then_with(|| a_name.cmp(b_name))
    });

    keyed.into_iter().map(|(name, _)| name.to_string()).collect()
}

/// Numbers compare numerically, strings lexically, numbers before strings
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Number(_), _) => Ordering::Less,
        (_, Value::Number(_)) => Ordering::Greater,
        _ => a.to_string().cmp(&b.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, FieldStats, IndexFieldStats, StaticFieldStats};
    use crate::resolve::error::ResolveError;
    use chrono::Utc;
    use serde_json::json;

    fn time_stats(stats: FieldStats) -> IndexFieldStats {
        IndexFieldStats::default().field("time", stats)
    }

    fn backend(indices: IndexStats) -> Arc<StaticFieldStats> {
        Arc::new(StaticFieldStats::new(indices))
    }

    async fn run(
        start: Option<TimeBound>,
        stop: Option<TimeBound>,
    ) -> (FieldStatsRequest, Option<IndexConstraint>) {
        let fake = backend(IndexStats::new().with_index("mock-*", IndexFieldStats::default()));
        let calc = IndexCalculator::new(fake.clone());
        calc.calculate_indices("wat-*-no", "@something", start.as_ref(), stop.as_ref(), None)
            .await
            .unwrap();

        let request = fake.last_request().await.unwrap();
        let constraint = request.constraint("@something").cloned();
        (request, constraint)
    }

    #[tokio::test]
    async fn test_uses_pattern_as_index() {
        let (request, _) = run(None, None).await;
        assert_eq!(request.index, "wat-*-no");
    }

    #[tokio::test]
    async fn test_has_level_indices() {
        let (request, _) = run(None, None).await;
        assert_eq!(request.level, "indices");
    }

    #[tokio::test]
    async fn test_includes_time_field() {
        let (request, _) = run(None, None).await;
        assert!(request.body.fields.contains(&"@something".to_string()));
    }

    #[tokio::test]
    async fn test_no_constraints_by_default() {
        let (_, constraint) = run(None, None).await;
        assert!(constraint.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_start_sets_max_value_gte() {
        let (_, constraint) = run(Some(TimeBound::raw("1234567890")), None).await;
        let constraint = constraint.unwrap();
        assert_eq!(constraint.max_value.unwrap().gte, json!("1234567890"));
        assert!(constraint.min_value.is_none());
    }

    #[tokio::test]
    async fn test_start_instant_uses_millis() {
        let start = Utc::now();
        let (_, constraint) = run(Some(TimeBound::from(start)), None).await;
        assert_eq!(
            constraint.unwrap().max_value.unwrap().gte,
            json!(start.timestamp_millis())
        );
    }

    #[tokio::test]
    async fn test_stop_sets_min_value_lte() {
        let (_, constraint) = run(None, Some(TimeBound::raw("1234567890"))).await;
        let constraint = constraint.unwrap();
        assert_eq!(constraint.min_value.unwrap().lte, json!("1234567890"));
        assert!(constraint.max_value.is_none());
    }

    #[tokio::test]
    async fn test_stop_instant_uses_millis() {
        let stop = Utc::now();
        let (_, constraint) = run(None, Some(TimeBound::from(stop))).await;
        assert_eq!(
            constraint.unwrap().min_value.unwrap().lte,
            json!(stop.timestamp_millis())
        );
    }

    #[tokio::test]
    async fn test_unsorted_keeps_backend_order() {
        let fake = backend(
            IndexStats::new()
                .with_index("c", time_stats(FieldStats::new()))
                .with_index("a", time_stats(FieldStats::new()))
                .with_index("b", time_stats(FieldStats::new())),
        );
        let calc = IndexCalculator::new(fake);

        let indices = calc.calculate_indices("*", "time", None, None, None).await.unwrap();
        assert_eq!(indices, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_desc_sorts_by_max_value() {
        let fake = backend(
            IndexStats::new()
                .with_index("c", time_stats(FieldStats::new().max(10)))
                .with_index("a", time_stats(FieldStats::new().max(15)))
                .with_index("b", time_stats(FieldStats::new().max(1))),
        );
        let calc = IndexCalculator::new(fake);

        let indices = calc
            .calculate_indices("*", "time", None, None, Some(SortOrder::Desc))
            .await
            .unwrap();
        assert_eq!(indices, vec!["a", "c", "b"]);
    }

    #[tokio::test]
    async fn test_asc_sorts_by_min_value() {
        let fake = backend(
            IndexStats::new()
                .with_index("c", time_stats(FieldStats::new().max(10).min(9)))
                .with_index("a", time_stats(FieldStats::new().max(15).min(5)))
                .with_index("b", time_stats(FieldStats::new().max(1).min(0))),
        );
        let calc = IndexCalculator::new(fake);

        let indices = calc
            .calculate_indices("*", "time", None, None, Some(SortOrder::Asc))
            .await
            .unwrap();
        assert_eq!(indices, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_missing_values_sort_last_and_ties_by_name() {
        let stats = IndexStats::new()
            .with_index("z", time_stats(FieldStats::new()))
            .with_index("y", time_stats(FieldStats::new().max(5)))
            .with_index("x", time_stats(FieldStats::new().max(5)))
            .with_index("w", IndexFieldStats::default());

        assert_eq!(
            sort_index_stats(&stats, "time", Some(SortOrder::Desc)),
            vec!["x", "y", "w", "z"]
        );
    }

    #[test]
    fn test_string_values_sort_lexically() {
        let stats = IndexStats::new()
            .with_index("late", time_stats(FieldStats::new().min("2015-09-22")))
            .with_index("early", time_stats(FieldStats::new().min("2015-09-20")));

        assert_eq!(
            sort_index_stats(&stats, "time", Some(SortOrder::Asc)),
            vec!["early", "late"]
        );
    }

    #[tokio::test]
    async fn test_empty_response_is_empty_list() {
        let calc = IndexCalculator::new(backend(IndexStats::new()));
        let indices = calc
            .calculate_indices("*", "time", None, None, Some(SortOrder::Desc))
            .await
            .unwrap();
        assert!(indices.is_empty());
    }

    #[tokio::test]
    async fn test_backend_failure_propagates() {
        let calc = IndexCalculator::new(Arc::new(StaticFieldStats::failing(503, "busy")));
        let err = calc
            .calculate_indices("*", "time", None, None, None)
            .await
            .unwrap_err();

        match err {
            ResolveError::Backend(BackendError::ApiError { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "busy");
            }
            other => panic!("unexpected error: {}", other),
        }
    }
}
