//! Metrics snapshot handler

use axum::{extract::State, Json};

use crate::metrics::MetricsSnapshot;
use crate::AppState;

/// Read-only counter snapshot. No side effects, no filtering.
pub async fn snapshot(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.metrics.snapshot())
}
