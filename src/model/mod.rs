//! Model resolution and prediction
//!
//! One classifier is resolved at startup and held for the process lifetime.
//! Resolution walks three tiers in fixed priority order: the remote model
//! registry, then the local serialized artifact, then a stub that keeps the
//! service answering for testing. Each tier is an ordinary `Result`-returning
//! call; failures are logged and fall through, never fatal.

pub mod linear;
pub mod local;
pub mod registry;
pub mod stub;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use ndarray::ArrayView2;
use thiserror::Error;

use crate::config::Config;

pub use linear::{LinearClassifier, ModelArtifact};
pub use local::LocalFileModel;
pub use registry::RegistryModel;
pub use stub::StubModel;

/// A loaded classifier: N feature rows in, N class labels out.
pub trait Classifier: Send + Sync {
    /// Predict one class label per input row, preserving row order.
    fn predict(&self, rows: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError>;

    /// Where the model came from, for logs and health reporting.
    fn source(&self) -> &'static str;
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("input has {got} feature columns, model expects {expected}")]
    ShapeMismatch { expected: usize, got: usize },
}

/// Produce exactly one classifier before the service accepts traffic.
///
/// No retries and no periodic re-attempt; the stub tier always succeeds.
pub async fn resolve(config: &Config) -> Arc<dyn Classifier> {
    match RegistryModel::fetch(config).await {
        Ok(model) => {
            tracing::info!(
                "Loaded model {}/{} from registry {}",
                config.model_name,
                config.model_stage,
                config.registry_url
            );
            return Arc::new(model);
        }
        Err(e) => tracing::warn!("Registry model unavailable: {}", e),
    }

    match LocalFileModel::load(&config.model_path) {
        Ok(model) => {
            tracing::info!("Loaded local model from {}", config.model_path.display());
            return Arc::new(model);
        }
        Err(e) => tracing::warn!("Local model unavailable: {:#}", e),
    }

    tracing::warn!("No trained model available, falling back to stub classifier");
    Arc::new(StubModel)
}
