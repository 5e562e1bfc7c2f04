//! Prediction handler

use axum::extract::rejection::JsonRejection;
use axum::{extract::State, Json};
use serde_json::Value;
use uuid::Uuid;

use crate::schema::{self, PredictionResponse};
use crate::{AppError, AppResult, AppState};

/// Classify a batch of feature records.
///
/// Body rejections (wrong content type, unparseable JSON) surface as
/// structural errors and never touch the validation counter; record-level
/// failures count against it and never reach the model. The request counter
/// moves once per successful request, not per row.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<PredictionResponse>> {
    let request_id = Uuid::new_v4();

    let Json(raw) = payload.map_err(|rejection| {
        let err = AppError::Structural(rejection.body_text());
        tracing::error!(%request_id, "{}", err);
        err
    })?;

    tracing::info!(%request_id, "Received request: {}", raw);

    let request = match schema::parse_request(&raw) {
        Ok(request) => request,
        Err(err) => {
            if matches!(err, AppError::Validation(_)) {
                state.metrics.record_validation_error();
            }
            tracing::error!(%request_id, "{}", err);
            return Err(err);
        }
    };

    let rows = request.to_matrix();
    let prediction = state
        .model
        .predict(rows.view())
        .map_err(|e| AppError::Processing(e.to_string()))?;

    // A label outside the pre-seeded classes is a broken artifact; surface
    // it without moving any counter.
    state
        .metrics
        .record_success(&prediction)
        .map_err(|e| AppError::Processing(e.to_string()))?;

    tracing::info!(%request_id, "Prediction: {:?}", prediction);

    Ok(Json(PredictionResponse { prediction }))
}
