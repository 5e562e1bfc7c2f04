//! Local artifact tier

use std::path::Path;

use ndarray::ArrayView2;

use super::{Classifier, LinearClassifier, ModelError};

/// Classifier deserialized from a serialized-model file on disk.
pub struct LocalFileModel {
    inner: LinearClassifier,
}

impl LocalFileModel {
    /// Deserialize the artifact at `path`. Absence or corruption is an
    /// error the caller falls through on.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let inner = LinearClassifier::from_file(path)?;
        Ok(Self { inner })
    }
}

impl Classifier for LocalFileModel {
    fn predict(&self, rows: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError> {
        self.inner.predict_labels(rows)
    }

    fn source(&self) -> &'static str {
        "local-file"
    }
}
