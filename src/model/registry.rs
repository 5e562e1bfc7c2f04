//! Model registry client
//!
//! HTTP client for the model registry. The registry is a black box: given a
//! model name and stage it returns a serialized artifact, or fails.

use std::time::Duration;

use ndarray::ArrayView2;
use thiserror::Error;

use super::{Classifier, LinearClassifier, ModelArtifact, ModelError};
use crate::config::Config;

/// Registry client errors
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("network error: {0}")]
    Network(String),

    #[error("registry returned status {0}")]
    Server(u16),

    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),
}

/// Registry API client
pub struct RegistryClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl RegistryClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, RegistryError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| RegistryError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client,
        })
    }

    /// Fetch the serialized artifact for a registered model at a stage.
    pub async fn fetch_artifact(
        &self,
        name: &str,
        stage: &str,
    ) -> Result<ModelArtifact, RegistryError> {
        let url = format!("{}/api/models/{}/{}/artifact", self.base_url, name, stage);

        tracing::debug!("Fetching model artifact from {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| RegistryError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(RegistryError::Server(response.status().as_u16()));
        }

        response
            .json()
            .await
            .map_err(|e| RegistryError::InvalidArtifact(e.to_string()))
    }
}

/// Classifier fetched from the model registry at startup.
#[derive(Debug)]
pub struct RegistryModel {
    inner: LinearClassifier,
}

impl RegistryModel {
    /// Load the configured model from the registry. Any failure here falls
    /// through to the local-file tier.
    pub async fn fetch(config: &Config) -> Result<Self, RegistryError> {
        let client = RegistryClient::new(&config.registry_url, config.registry_timeout_secs)?;
        let artifact = client
            .fetch_artifact(&config.model_name, &config.model_stage)
            .await?;
        let inner = LinearClassifier::from_artifact(artifact)
            .map_err(|e| RegistryError::InvalidArtifact(e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Classifier for RegistryModel {
    fn predict(&self, rows: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError> {
        self.inner.predict_labels(rows)
    }

    fn source(&self) -> &'static str {
        "registry"
    }
}
