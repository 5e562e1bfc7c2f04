//! Linear classifier artifact
//!
//! The serialized-model format shared by the registry and local-file tiers:
//! a one-vs-rest linear classifier with one coefficient row and one
//! intercept per class. Scoring is argmax over the per-class linear scores;
//! ties resolve to the lowest class index.

use std::path::Path;

use anyhow::{bail, Context};
use ndarray::{Array1, Array2, ArrayView2};
use serde::{Deserialize, Serialize};

use super::ModelError;

/// On-disk / on-wire model representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub model_type: String,
    pub feature_names: Vec<String>,
    pub classes: Vec<i64>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// A deserialized, shape-checked linear classifier.
#[derive(Debug, Clone)]
pub struct LinearClassifier {
    classes: Vec<i64>,
    weights: Array2<f64>,
    intercepts: Array1<f64>,
}

impl LinearClassifier {
    /// Build a classifier from an artifact, rejecting inconsistent shapes.
    pub fn from_artifact(artifact: ModelArtifact) -> anyhow::Result<Self> {
        let n_classes = artifact.classes.len();
        let n_features = artifact.feature_names.len();

        if n_classes == 0 {
            bail!("artifact lists no classes");
        }
        if n_features == 0 {
            bail!("artifact lists no feature names");
        }
        if artifact.coefficients.len() != n_classes {
            bail!(
                "artifact has {} coefficient rows for {} classes",
                artifact.coefficients.len(),
                n_classes
            );
        }
        if artifact.intercepts.len() != n_classes {
            bail!(
                "artifact has {} intercepts for {} classes",
                artifact.intercepts.len(),
                n_classes
            );
        }

        let mut weights = Array2::zeros((n_classes, n_features));
        for (class, row) in artifact.coefficients.iter().enumerate() {
            if row.len() != n_features {
                bail!(
                    "coefficient row {} has {} values for {} features",
                    class,
                    row.len(),
                    n_features
                );
            }
            for (slot, &value) in weights.row_mut(class).iter_mut().zip(row) {
                *slot = value;
            }
        }

        Ok(Self {
            classes: artifact.classes,
            weights,
            intercepts: Array1::from(artifact.intercepts),
        })
    }

    /// Parse an artifact from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> anyhow::Result<Self> {
        let artifact: ModelArtifact =
            serde_json::from_slice(bytes).context("artifact is not valid model JSON")?;
        Self::from_artifact(artifact)
    }

    /// Read and parse an artifact file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_slice(&bytes)
    }

    /// One label per input row, argmax over per-class scores.
    pub fn predict_labels(&self, rows: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError> {
        if rows.ncols() != self.weights.ncols() {
            return Err(ModelError::ShapeMismatch {
                expected: self.weights.ncols(),
                got: rows.ncols(),
            });
        }

        let scores = rows.dot(&self.weights.t()) + &self.intercepts;

        let mut labels = Vec::with_capacity(scores.nrows());
        for row in scores.rows() {
            let mut best = 0;
            let mut best_score = f64::NEG_INFINITY;
            for (class, &score) in row.iter().enumerate() {
                if score > best_score {
                    best = class;
                    best_score = score;
                }
            }
            labels.push(self.classes[best]);
        }
        Ok(labels)
    }
}
