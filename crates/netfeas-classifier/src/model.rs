//! Three-class softmax regression over sparse address features.

use std::collections::HashMap;

use netfeas_core::{AddressInput, ClassifierPrediction, FeasibilityClass, MatchMethod};

use crate::error::ClassifierError;
use crate::features::FeatureSpace;
use crate::normalize::record_key;
use crate::table::{parse_training_table, TrainingRow};

const CLASSES: usize = 3;
const EPOCHS: usize = 30;
const LEARNING_RATE: f64 = 0.2;
const L2_PENALTY: f64 = 1e-4;

/// Outcome of one training run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSummary {
    pub row_count: usize,
    pub skipped_rows: usize,
    /// Usable rows per class, indexed by [`FeasibilityClass::index`].
    pub class_counts: [usize; CLASSES],
}

impl TrainingSummary {
    #[must_use]
    pub fn count_of(&self, class: FeasibilityClass) -> usize {
        self.class_counts[class.index()]
    }
}

#[derive(Debug, Clone, Default)]
struct ExactEntry {
    counts: [usize; CLASSES],
    /// First raw label seen for each class.
    labels: [Option<String>; CLASSES],
}

/// A fitted classifier. Immutable once built.
#[derive(Debug, Clone)]
pub struct ClassifierModel {
    space: FeatureSpace,
    /// Row-major `CLASSES x (dim + 1)`; the last column of each row is the bias.
    weights: Vec<f64>,
    exact: HashMap<String, ExactEntry>,
    summary: TrainingSummary,
}

impl ClassifierModel {
    /// Parse `content` as a training table and fit a model on it.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError`] if the table cannot be parsed or has no usable rows.
    pub fn train(content: &str) -> Result<Self, ClassifierError> {
        let table = parse_training_table(content)?;
        Self::fit(&table.rows, table.skipped)
    }

    /// Fit a model on already-parsed rows.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifierError::EmptyTrainingSet`] if `rows` is empty.
    pub fn fit(rows: &[TrainingRow], skipped: usize) -> Result<Self, ClassifierError> {
        if rows.is_empty() {
            return Err(ClassifierError::EmptyTrainingSet { skipped });
        }

        let space = FeatureSpace::fit(rows);
        let stride = space.dim() + 1;
        let mut weights = vec![0.0; CLASSES * stride];

        let encoded: Vec<(Vec<(usize, f64)>, usize)> = rows
            .iter()
            .map(|r| (space.encode(&r.input), r.class.index()))
            .collect();

        for _ in 0..EPOCHS {
            for (features, target) in &encoded {
                let probs = softmax(&logits(&weights, stride, features));
                for (class, prob) in probs.iter().enumerate() {
                    let indicator = if class == *target { 1.0 } else { 0.0 };
                    let grad = prob - indicator;
                    let row = &mut weights[class * stride..(class + 1) * stride];
                    for &(idx, value) in features {
                        row[idx] -= LEARNING_RATE * (grad * value + L2_PENALTY * row[idx]);
                    }
                    row[stride - 1] -= LEARNING_RATE * grad;
                }
            }
        }

        let mut exact: HashMap<String, ExactEntry> = HashMap::new();
        let mut class_counts = [0usize; CLASSES];
        for row in rows {
            let idx = row.class.index();
            class_counts[idx] += 1;
            let entry = exact.entry(record_key(&row.input)).or_default();
            entry.counts[idx] += 1;
            if entry.labels[idx].is_none() {
                entry.labels[idx] = Some(row.label.clone());
            }
        }

        Ok(Self {
            space,
            weights,
            exact,
            summary: TrainingSummary {
                row_count: rows.len(),
                skipped_rows: skipped,
                class_counts,
            },
        })
    }

    #[must_use]
    pub fn summary(&self) -> &TrainingSummary {
        &self.summary
    }

    /// Predict the feasibility class of `input`.
    ///
    /// An input whose normalized province, commune, quarter and way match a
    /// training record is answered from the table; anything else goes
    /// through the linear model.
    #[must_use]
    pub fn predict(&self, input: &AddressInput) -> ClassifierPrediction {
        if let Some(entry) = self.exact.get(&record_key(input)) {
            let total: usize = entry.counts.iter().sum();
            let best = argmax_counts(&entry.counts);
            #[allow(clippy::cast_precision_loss)]
            let confidence = entry.counts[best] as f64 / total as f64;
            return ClassifierPrediction {
                feasibility_class: FeasibilityClass::ALL[best],
                confidence,
                match_method: MatchMethod::ExactMatch,
                matched_status: entry.labels[best].clone(),
            };
        }

        let stride = self.space.dim() + 1;
        let probs = softmax(&logits(&self.weights, stride, &self.space.encode(input)));
        let best = argmax(&probs);
        ClassifierPrediction {
            feasibility_class: FeasibilityClass::ALL[best],
            confidence: probs[best],
            match_method: MatchMethod::ModelInference,
            matched_status: None,
        }
    }
}

fn logits(weights: &[f64], stride: usize, features: &[(usize, f64)]) -> [f64; CLASSES] {
    let mut out = [0.0; CLASSES];
    for (class, logit) in out.iter_mut().enumerate() {
        let row = &weights[class * stride..(class + 1) * stride];
        *logit = row[stride - 1] + features.iter().map(|&(i, v)| row[i] * v).sum::<f64>();
    }
    out
}

fn softmax(logits: &[f64; CLASSES]) -> [f64; CLASSES] {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps = logits.map(|l| (l - max).exp());
    let total: f64 = exps.iter().sum();
    exps.map(|e| e / total)
}

/// Index of the largest value; the first one wins ties.
fn argmax(values: &[f64; CLASSES]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}

fn argmax_counts(counts: &[usize; CLASSES]) -> usize {
    let mut best = 0;
    for (i, c) in counts.iter().enumerate().skip(1) {
        if *c > counts[best] {
            best = i;
        }
    }
    best
}
