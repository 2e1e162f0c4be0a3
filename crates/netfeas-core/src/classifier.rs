//! Request and response shapes of the address classifier boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeasibilityClass {
    #[serde(alias = "Feasible")]
    Feasible,
    #[serde(alias = "NotFeasible")]
    NotFeasible,
    #[serde(alias = "RequiresStudy")]
    RequiresStudy,
}

impl FeasibilityClass {
    pub const ALL: [FeasibilityClass; 3] = [
        FeasibilityClass::Feasible,
        FeasibilityClass::NotFeasible,
        FeasibilityClass::RequiresStudy,
    ];

    /// Position of this class in [`FeasibilityClass::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            FeasibilityClass::Feasible => 0,
            FeasibilityClass::NotFeasible => 1,
            FeasibilityClass::RequiresStudy => 2,
        }
    }
}

impl std::fmt::Display for FeasibilityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FeasibilityClass::Feasible => write!(f, "feasible"),
            FeasibilityClass::NotFeasible => write!(f, "not_feasible"),
            FeasibilityClass::RequiresStudy => write!(f, "requires_study"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    #[serde(alias = "ExactMatch")]
    ExactMatch,
    #[serde(alias = "ModelInference")]
    ModelInference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifierPrediction {
    pub feasibility_class: FeasibilityClass,
    /// Expected in `[0, 1]`; see [`ClassifierPrediction::is_well_formed`].
    pub confidence: f64,
    pub match_method: MatchMethod,
    /// Raw label text of the matched training rows, for exact matches.
    #[serde(default)]
    pub matched_status: Option<String>,
}

impl ClassifierPrediction {
    /// Whether the confidence is a finite value inside `[0, 1]`.
    ///
    /// Predictions failing this check come from a misbehaving classifier and
    /// must not be mapped into an assessment.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.confidence.is_finite() && (0.0..=1.0).contains(&self.confidence)
    }
}

/// Declared capacity as sent by callers: either a JSON number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapacityValue {
    Number(f64),
    Text(String),
}

impl CapacityValue {
    /// Numeric value, tolerating spaces and a decimal comma in text form.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CapacityValue::Number(n) => n.is_finite().then_some(*n),
            CapacityValue::Text(s) => {
                let cleaned: String = s
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| if c == ',' { '.' } else { c })
                    .collect();
                cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
            }
        }
    }
}

/// A partial structured address; every field may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub commune: String,
    #[serde(default, alias = "quartier")]
    pub quarter: String,
    #[serde(default, alias = "voie")]
    pub way: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(
        default,
        alias = "capacite",
        alias = "capacité",
        skip_serializing_if = "Option::is_none"
    )]
    pub capacity: Option<CapacityValue>,
}

/// Single predict response: `{ success, prediction?, error? }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<ClassifierPrediction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PredictResponse {
    #[must_use]
    pub fn ok(prediction: ClassifierPrediction) -> Self {
        Self {
            success: true,
            prediction: Some(prediction),
            error: None,
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            prediction: None,
            error: Some(message.into()),
        }
    }
}

/// One element of a batch predict response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchPredictItem {
    pub input: AddressInput,
    pub prediction: Option<ClassifierPrediction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainRequest {
    /// Delimiter-separated table, header row first.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainResponse {
    pub success: bool,
    pub message: String,
    pub row_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_input_accepts_french_field_names() {
        let input: AddressInput = serde_json::from_str(
            r#"{"province":"Dakar","commune":"Plateau","quartier":"Centre","voie":"Rue 10","capacite":"12"}"#,
        )
        .unwrap();
        assert_eq!(input.quarter, "Centre");
        assert_eq!(input.way, "Rue 10");
        assert_eq!(input.capacity.and_then(|c| c.as_f64()), Some(12.0));
    }

    #[test]
    fn address_input_missing_fields_default_to_empty() {
        let input: AddressInput = serde_json::from_str(r#"{"province":"Thiès"}"#).unwrap();
        assert_eq!(input.commune, "");
        assert!(input.zone.is_none());
        assert!(input.capacity.is_none());
    }

    #[test]
    fn capacity_accepts_number_or_text() {
        let as_number: CapacityValue = serde_json::from_str("24").unwrap();
        assert_eq!(as_number.as_f64(), Some(24.0));
        assert_eq!(
            CapacityValue::Text("1 024,5".to_string()).as_f64(),
            Some(1024.5)
        );
        assert_eq!(CapacityValue::Text("n/a".to_string()).as_f64(), None);
    }

    #[test]
    fn prediction_wire_names_are_camel_case() {
        let prediction = ClassifierPrediction {
            feasibility_class: FeasibilityClass::RequiresStudy,
            confidence: 0.5,
            match_method: MatchMethod::ModelInference,
            matched_status: None,
        };
        let json = serde_json::to_value(&prediction).unwrap();
        assert_eq!(json["feasibilityClass"], "requires_study");
        assert_eq!(json["matchMethod"], "model_inference");
        assert!(json["matchedStatus"].is_null());
    }

    #[test]
    fn prediction_accepts_pascal_case_class_names() {
        let prediction: ClassifierPrediction = serde_json::from_str(
            r#"{"feasibilityClass":"NotFeasible","confidence":0.8,"matchMethod":"ExactMatch"}"#,
        )
        .unwrap();
        assert_eq!(prediction.feasibility_class, FeasibilityClass::NotFeasible);
        assert_eq!(prediction.match_method, MatchMethod::ExactMatch);
    }

    #[test]
    fn out_of_range_confidence_is_not_well_formed() {
        let mut prediction = ClassifierPrediction {
            feasibility_class: FeasibilityClass::Feasible,
            confidence: 1.2,
            match_method: MatchMethod::ModelInference,
            matched_status: None,
        };
        assert!(!prediction.is_well_formed());
        prediction.confidence = f64::NAN;
        assert!(!prediction.is_well_formed());
        prediction.confidence = 1.0;
        assert!(prediction.is_well_formed());
    }

    #[test]
    fn train_response_uses_row_count_key() {
        let json = serde_json::to_value(TrainResponse {
            success: true,
            message: "trained".to_string(),
            row_count: 3,
        })
        .unwrap();
        assert_eq!(json["rowCount"], 3);
    }
}
