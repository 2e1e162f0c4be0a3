//! Sparse feature encoding for address rows.

use std::collections::HashMap;

use netfeas_core::AddressInput;

use crate::keywords::geographic_keyword_score;
use crate::normalize::normalize_text;
use crate::table::TrainingRow;

/// Category value → slot, in first-seen order.
#[derive(Debug, Clone, Default)]
pub(crate) struct Vocabulary {
    slots: HashMap<String, usize>,
}

impl Vocabulary {
    fn build<'a>(values: impl Iterator<Item = &'a str>) -> Self {
        let mut slots = HashMap::new();
        for value in values {
            let key = normalize_text(value);
            if key.is_empty() {
                continue;
            }
            let next = slots.len();
            slots.entry(key).or_insert(next);
        }
        Self { slots }
    }

    fn slot(&self, value: &str) -> Option<usize> {
        self.slots.get(&normalize_text(value)).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Layout of the feature vector fitted on a training table.
///
/// `[province | commune | quarter | way | zone | capacity | keyword]`, where
/// each categorical block is one-hot and the last two entries are scalars.
#[derive(Debug, Clone)]
pub(crate) struct FeatureSpace {
    pub(crate) province: Vocabulary,
    pub(crate) commune: Vocabulary,
    pub(crate) quarter: Vocabulary,
    pub(crate) way: Vocabulary,
    pub(crate) zone: Vocabulary,
    capacity_scale: f64,
}

impl FeatureSpace {
    pub(crate) fn fit(rows: &[TrainingRow]) -> Self {
        let capacity_scale = rows
            .iter()
            .filter_map(|r| r.input.capacity.as_ref().and_then(|c| c.as_f64()))
            .map(f64::abs)
            .fold(0.0_f64, f64::max);

        Self {
            province: Vocabulary::build(rows.iter().map(|r| r.input.province.as_str())),
            commune: Vocabulary::build(rows.iter().map(|r| r.input.commune.as_str())),
            quarter: Vocabulary::build(rows.iter().map(|r| r.input.quarter.as_str())),
            way: Vocabulary::build(rows.iter().map(|r| r.input.way.as_str())),
            zone: Vocabulary::build(rows.iter().filter_map(|r| r.input.zone.as_deref())),
            capacity_scale: if capacity_scale > 0.0 {
                capacity_scale
            } else {
                1.0
            },
        }
    }

    fn blocks(&self) -> [&Vocabulary; 5] {
        [
            &self.province,
            &self.commune,
            &self.quarter,
            &self.way,
            &self.zone,
        ]
    }

    pub(crate) fn dim(&self) -> usize {
        self.blocks().iter().map(|v| v.len()).sum::<usize>() + 2
    }

    /// Encode `input` as `(index, value)` pairs. Unknown categories encode to nothing.
    pub(crate) fn encode(&self, input: &AddressInput) -> Vec<(usize, f64)> {
        let values = [
            input.province.as_str(),
            input.commune.as_str(),
            input.quarter.as_str(),
            input.way.as_str(),
            input.zone.as_deref().unwrap_or_default(),
        ];

        let mut features = Vec::with_capacity(7);
        let mut offset = 0;
        for (vocab, value) in self.blocks().into_iter().zip(values) {
            if let Some(slot) = vocab.slot(value) {
                features.push((offset + slot, 1.0));
            }
            offset += vocab.len();
        }

        if let Some(capacity) = input.capacity.as_ref().and_then(|c| c.as_f64()) {
            let scaled = (capacity / self.capacity_scale).clamp(-1.0, 1.0);
            if scaled.abs() > f64::EPSILON {
                features.push((offset, scaled));
            }
        }

        let text = format!("{} {} {}", input.quarter, input.way, input.commune);
        let keyword = geographic_keyword_score(&text);
        if keyword.abs() > f64::EPSILON {
            features.push((offset + 1, keyword));
        }

        features
    }
}
