//! Request and response schemas

use ndarray::Array2;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::AppError;

/// Feature column names, in the order the model expects them.
pub const FEATURE_NAMES: [&str; 4] = [
    "sepal_length",
    "sepal_width",
    "petal_length",
    "petal_width",
];

/// One iris measurement. All four values must be strictly positive; a
/// non-positive value is a validation failure, never a clamp.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeatureRecord {
    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub sepal_length: f64,

    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub sepal_width: f64,

    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub petal_length: f64,

    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub petal_width: f64,
}

impl FeatureRecord {
    /// Values in `FEATURE_NAMES` order.
    pub fn as_row(&self) -> [f64; 4] {
        [
            self.sepal_length,
            self.sepal_width,
            self.petal_length,
            self.petal_width,
        ]
    }
}

/// A batch of records to classify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub data: Vec<FeatureRecord>,
}

impl PredictionRequest {
    /// Feature matrix with one row per record, columns in `FEATURE_NAMES`
    /// order, rows preserving input order.
    pub fn to_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::zeros((self.data.len(), FEATURE_NAMES.len()));
        for (mut row, record) in matrix.rows_mut().into_iter().zip(&self.data) {
            for (slot, value) in row.iter_mut().zip(record.as_row()) {
                *slot = value;
            }
        }
        matrix
    }
}

#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub prediction: Vec<i64>,
}

/// Check a parsed body against the request contract.
///
/// Top-level shape problems (not an object, no "data" array) are
/// `Structural`; record-level problems (missing field, wrong type,
/// non-positive value, empty batch) are `Validation`. Records are checked in
/// order and the first failing record aborts the whole request.
pub fn parse_request(raw: &Value) -> Result<PredictionRequest, AppError> {
    let body = raw
        .as_object()
        .ok_or_else(|| AppError::Structural("request body must be a JSON object".to_string()))?;

    let data = body
        .get("data")
        .ok_or_else(|| AppError::Structural("missing \"data\" field".to_string()))?;

    let entries = data
        .as_array()
        .ok_or_else(|| AppError::Structural("\"data\" must be an array of records".to_string()))?;

    if entries.is_empty() {
        return Err(AppError::Validation(
            "\"data\" must contain at least one record".to_string(),
        ));
    }

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let record: FeatureRecord = serde_json::from_value(entry.clone())
            .map_err(|e| AppError::Validation(format!("record {}: {}", index, e)))?;

        record.validate().map_err(|e| {
            AppError::Validation(format!("record {}: {}", index, first_violation(&e)))
        })?;

        records.push(record);
    }

    Ok(PredictionRequest { data: records })
}

/// First failing field in canonical column order, for a stable message.
fn first_violation(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    for name in FEATURE_NAMES {
        if let Some(list) = fields.get(name) {
            if let Some(error) = list.first() {
                let message = error.message.as_deref().unwrap_or("is invalid");
                return format!("{} {}", name, message);
            }
        }
    }
    errors.to_string()
}
