//! Configuration module

use std::env;
use std::path::PathBuf;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Model registry base URL
    pub registry_url: String,

    /// Registered model name
    pub model_name: String,

    /// Registry stage to load
    pub model_stage: String,

    /// Local serialized-model artifact path
    pub model_path: PathBuf,

    /// Registry request timeout in seconds
    pub registry_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5001),

            registry_url: env::var("MODEL_REGISTRY_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string()),

            model_name: env::var("MODEL_NAME")
                .unwrap_or_else(|_| "IrisClassifier".to_string()),

            model_stage: env::var("MODEL_STAGE")
                .unwrap_or_else(|_| "Production".to_string()),

            model_path: env::var("MODEL_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models/iris_classifier.json")),

            registry_timeout_secs: env::var("REGISTRY_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(10),
        }
    }
}
