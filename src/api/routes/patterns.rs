//! Pattern Routes
//!
//! Read, resolve and edit the configured index patterns.
//!
//! - GET /api/v1/patterns - List all patterns
//! - GET /api/v1/patterns/:id - Get a pattern
//! - POST /api/v1/patterns/:id/_resolve - Resolve to concrete indices
//! - POST /api/v1/patterns/:id/scripted_fields - Add a scripted field
//! - DELETE /api/v1/patterns/:id/scripted_fields/:name - Remove a scripted field
//! - POST /api/v1/patterns/:id/fields/:name/_popularize - Bump field popularity

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    FieldResponse, ListPatternsResponse, PatternResponse, PatternSummary, PopularizeRequest,
    PopularizeResponse, ResolveRequest, ResolveResponse, ScriptedFieldRequest,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::pattern::IndexPattern;

/// GET /api/v1/patterns
///
/// List all known patterns, sorted by id.
pub async fn list_patterns(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ListPatternsResponse>> {
    let patterns = state.patterns.read().await;

    let mut summaries: Vec<PatternSummary> = patterns
        .values()
        .map(|p| pattern_to_summary(&state, p))
        .collect();
    summaries.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(Json(ListPatternsResponse {
        total: summaries.len(),
        patterns: summaries,
    }))
}

/// GET /api/v1/patterns/:id
pub async fn get_pattern(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<PatternResponse>> {
    let pattern = state.pattern(&id).await.ok_or_else(|| not_found(&id))?;

    Ok(Json(PatternResponse {
        strategy: state.resolver.strategy(&pattern).as_str().to_string(),
        pattern,
    }))
}

/// POST /api/v1/patterns/:id/_resolve
///
/// Resolve a pattern for an optional time range and sort order.
pub async fn resolve_pattern(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ResolveRequest>,
) -> ApiResult<Json<ResolveResponse>> {
    // Snapshot so the lock is not held across the backend call
    let pattern = state.pattern(&id).await.ok_or_else(|| not_found(&id))?;
    let strategy = state.resolver.strategy(&pattern);

    let indices = state
        .resolver
        .to_index_list(
            &pattern,
            req.start.as_ref(),
            req.stop.as_ref(),
            req.sort_order,
        )
        .await?;

    tracing::info!(
        pattern = %id,
        strategy = strategy.as_str(),
        count = indices.len(),
        "Resolved index pattern"
    );

    Ok(Json(ResolveResponse {
        pattern: id,
        strategy: strategy.as_str().to_string(),
        indices,
    }))
}

/// POST /api/v1/patterns/:id/scripted_fields
pub async fn add_scripted_field(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ScriptedFieldRequest>,
) -> ApiResult<(StatusCode, Json<FieldResponse>)> {
    if req.name.trim().is_empty() {
        return Err(ApiError::Validation("Field name cannot be empty".to_string()));
    }
    if req.script.trim().is_empty() {
        return Err(ApiError::Validation("Script cannot be empty".to_string()));
    }

    let mut patterns = state.patterns.write().await;
    let pattern = patterns.get_mut(&id).ok_or_else(|| not_found(&id))?;

    let field = pattern
        .add_scripted_field(&req.name, &req.script, &req.field_type)?
        .clone();

    tracing::info!(pattern = %id, field = %field.name, "Added scripted field");

    Ok((StatusCode::CREATED, Json(FieldResponse { pattern: id, field })))
}

/// DELETE /api/v1/patterns/:id/scripted_fields/:name
pub async fn remove_scripted_field(
    State(state): State<Arc<AppState>>,
    Path((id, name)): Path<(String, String)>,
) -> ApiResult<Json<FieldResponse>> {
    let mut patterns = state.patterns.write().await;
    let pattern = patterns.get_mut(&id).ok_or_else(|| not_found(&id))?;

    let field = pattern.remove_scripted_field(&name)?;

    tracing::info!(pattern = %id, field = %name, "Removed scripted field");

    Ok(Json(FieldResponse { pattern: id, field }))
}

/// POST /api/v1/patterns/:id/fields/:name/_popularize
pub async fn popularize_field(
    State(state): State<Arc<AppState>>,
    Path((id, name)): Path<(String, String)>,
    Json(req): Json<PopularizeRequest>,
) -> ApiResult<Json<PopularizeResponse>> {
    let mut patterns = state.patterns.write().await;
    let pattern = patterns.get_mut(&id).ok_or_else(|| not_found(&id))?;

    let count = pattern.popularize_field(&name, req.delta)?;

    Ok(Json(PopularizeResponse { field: name, count }))
}

fn not_found(id: &str) -> ApiError {
    ApiError::NotFound(format!("Index pattern '{}' not found", id))
}

fn pattern_to_summary(state: &AppState, pattern: &IndexPattern) -> PatternSummary {
    PatternSummary {
        id: pattern.id.clone(),
        time_field_name: pattern.time_field_name.clone(),
        interval: pattern.get_interval().map(str::to_string),
        strategy: state.resolver.strategy(pattern).as_str().to_string(),
        field_count: pattern.fields.len(),
        scripted_field_count: pattern.scripted_fields().len(),
    }
}
