//! Stub classifier

use ndarray::ArrayView2;

use super::{Classifier, ModelError};

/// Class the stub predicts for every row.
pub const STUB_CLASS: i64 = 0;

/// Last-resort classifier. Keeps the service operational for testing when
/// neither the registry nor the local artifact yields a model.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubModel;

impl Classifier for StubModel {
    fn predict(&self, rows: ArrayView2<'_, f64>) -> Result<Vec<i64>, ModelError> {
        Ok(vec![STUB_CLASS; rows.nrows()])
    }

    fn source(&self) -> &'static str {
        "stub"
    }
}
