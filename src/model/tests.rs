//! Model resolution tests
//!
//! Drives the three-tier fallback against a stub registry served from an
//! ephemeral listener, real artifact files, and dead endpoints.

#[cfg(test)]
mod resolution_tests {
    use std::net::SocketAddr;
    use std::path::PathBuf;

    use axum::{routing::get, Json, Router};

    use crate::config::Config;
    use crate::model::{self, Classifier, LocalFileModel, ModelArtifact, RegistryModel};
    use crate::model::registry::RegistryError;

    fn test_artifact() -> ModelArtifact {
        ModelArtifact {
            model_type: "logistic_regression".to_string(),
            feature_names: vec![
                "sepal_length".to_string(),
                "sepal_width".to_string(),
                "petal_length".to_string(),
                "petal_width".to_string(),
            ],
            classes: vec![0, 1, 2],
            coefficients: vec![
                vec![0.0, 0.0, -1.0, -1.0],
                vec![0.0, 0.0, 0.1, 0.1],
                vec![0.0, 0.0, 1.0, 1.0],
            ],
            intercepts: vec![3.0, 0.5, -4.0],
        }
    }

    fn config(registry_url: &str, model_path: PathBuf) -> Config {
        Config {
            port: 0,
            registry_url: registry_url.to_string(),
            model_name: "IrisClassifier".to_string(),
            model_stage: "Production".to_string(),
            model_path,
            registry_timeout_secs: 1,
        }
    }

    /// Serve routes on an ephemeral port, returning the bound address.
    async fn spawn_server(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    async fn spawn_stub_registry(artifact: ModelArtifact) -> SocketAddr {
        let app = Router::new().route(
            "/api/models/IrisClassifier/Production/artifact",
            get(move || {
                let artifact = artifact.clone();
                async move { Json(artifact) }
            }),
        );
        spawn_server(app).await
    }

    #[tokio::test]
    async fn test_resolve_prefers_registry() {
        let addr = spawn_stub_registry(test_artifact()).await;
        let cfg = config(
            &format!("http://{}", addr),
            PathBuf::from("/nonexistent/model.json"),
        );
        let resolved = model::resolve(&cfg).await;
        assert_eq!(resolved.source(), "registry");
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iris_classifier.json");
        std::fs::write(&path, serde_json::to_vec(&test_artifact()).unwrap()).unwrap();

        let cfg = config("http://127.0.0.1:1", path);
        let resolved = model::resolve(&cfg).await;
        assert_eq!(resolved.source(), "local-file");
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_stub() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config("http://127.0.0.1:1", dir.path().join("missing.json"));
        let resolved = model::resolve(&cfg).await;
        assert_eq!(resolved.source(), "stub");
    }

    #[tokio::test]
    async fn test_corrupt_local_artifact_falls_through_to_stub() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iris_classifier.json");
        std::fs::write(&path, b"{ not a model").unwrap();

        let cfg = config("http://127.0.0.1:1", path);
        let resolved = model::resolve(&cfg).await;
        assert_eq!(resolved.source(), "stub");
    }

    #[tokio::test]
    async fn test_registry_model_predicts_from_fetched_artifact() {
        let addr = spawn_stub_registry(test_artifact()).await;
        let cfg = config(&format!("http://{}", addr), PathBuf::from("/nonexistent"));

        let fetched = RegistryModel::fetch(&cfg).await.unwrap();
        let rows = ndarray::array![[5.1, 3.5, 1.4, 0.2], [6.9, 3.1, 5.4, 2.1]];
        assert_eq!(fetched.predict(rows.view()).unwrap(), vec![0, 2]);
    }

    #[tokio::test]
    async fn test_registry_missing_model_is_server_error() {
        let addr = spawn_server(Router::new()).await;
        let cfg = config(&format!("http://{}", addr), PathBuf::from("/nonexistent"));

        let err = RegistryModel::fetch(&cfg).await.unwrap_err();
        assert!(matches!(err, RegistryError::Server(404)));
    }

    #[tokio::test]
    async fn test_local_file_model_loads_and_predicts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("iris_classifier.json");
        std::fs::write(&path, serde_json::to_vec(&test_artifact()).unwrap()).unwrap();

        let loaded = LocalFileModel::load(&path).unwrap();
        let rows = ndarray::array![[5.1, 3.5, 1.4, 0.2]];
        assert_eq!(loaded.predict(rows.view()).unwrap(), vec![0]);
    }
}
