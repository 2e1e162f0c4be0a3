use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use netfeas_core::{AddressInput, BatchPredictItem, ClassifierPrediction};

use crate::error::ClassifierError;
use crate::model::{ClassifierModel, TrainingSummary};

/// Owns the current [`ClassifierModel`] behind a single swappable reference.
///
/// Training is serialized and fits the new model without holding the read
/// lock, so predictions never block on a training run and never observe a
/// half-built model.
#[derive(Debug, Default)]
pub struct ClassifierService {
    current: RwLock<Option<Arc<ClassifierModel>>>,
    training: Mutex<()>,
}

impl ClassifierService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fit a model on `content` and make it the current one.
    ///
    /// On failure the previous model, if any, stays in place.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] if the table is unusable.
    pub fn train(&self, content: &str) -> Result<TrainingSummary, ClassifierError> {
        let _guard = self.training.lock();
        let model = ClassifierModel::train(content)?;
        let summary = model.summary().clone();
        self.install(model);

        tracing::info!(
            rows = summary.row_count,
            skipped = summary.skipped_rows,
            feasible = summary.class_counts[0],
            not_feasible = summary.class_counts[1],
            requires_study = summary.class_counts[2],
            "classifier trained"
        );
        Ok(summary)
    }

    /// Replace the current model.
    pub fn install(&self, model: ClassifierModel) {
        *self.current.write() = Some(Arc::new(model));
    }

    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.current.read().is_some()
    }

    #[must_use]
    pub fn current_model(&self) -> Option<Arc<ClassifierModel>> {
        self.current.read().clone()
    }

    /// # Errors
    ///
    /// Returns [`ClassifierError::NotTrained`] before the first successful training.
    pub fn predict(&self, input: &AddressInput) -> Result<ClassifierPrediction, ClassifierError> {
        let model = self.current_model().ok_or(ClassifierError::NotTrained)?;
        Ok(model.predict(input))
    }

    /// Predict every input against one snapshot of the model.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::NotTrained`] before the first successful training.
    pub fn predict_batch(
        &self,
        inputs: Vec<AddressInput>,
    ) -> Result<Vec<BatchPredictItem>, ClassifierError> {
        let model = self.current_model().ok_or(ClassifierError::NotTrained)?;
        Ok(inputs
            .into_iter()
            .map(|input| {
                let prediction = model.predict(&input);
                BatchPredictItem {
                    input,
                    prediction: Some(prediction),
                    error: None,
                }
            })
            .collect())
    }
}
