use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// `predict` was called before any model was trained.
    #[error("classifier model has not been trained")]
    NotTrained,

    #[error("training table parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("training table is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("training table has no usable rows ({skipped} rows skipped)")]
    EmptyTrainingSet { skipped: usize },
}
