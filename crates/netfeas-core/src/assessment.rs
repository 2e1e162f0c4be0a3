//! Assessment results returned by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::network::NetworkNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}

/// Score and diagnostic narrative for one assessment.
///
/// `factors` and `recommendations` are meaningful only in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// 0–100.
    pub score: u8,
    pub factors: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk_level: RiskLevel,
}

/// Which path produced a [`FeasibilityResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentSource {
    Classifier,
    NetworkAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeasibilityResult {
    pub is_feasible: bool,
    pub assigned_primary_node: Option<NetworkNode>,
    pub assigned_access_node: Option<NetworkNode>,
    /// Kilometres to the assigned primary concentration point.
    pub distance_to_primary: Option<f64>,
    /// Kilometres to the assigned access node.
    pub distance_to_access: Option<f64>,
    pub analysis: Analysis,
    pub source: AssessmentSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feasibility_result_serializes_nulls_for_missing_assignments() {
        let result = FeasibilityResult {
            is_feasible: false,
            assigned_primary_node: None,
            assigned_access_node: None,
            distance_to_primary: None,
            distance_to_access: None,
            analysis: Analysis {
                score: 60,
                factors: vec!["Technical study required".to_string()],
                recommendations: vec![],
                risk_level: RiskLevel::Medium,
            },
            source: AssessmentSource::Classifier,
        };
        let json = serde_json::to_value(&result).expect("serialize");
        assert_eq!(json["isFeasible"], false);
        assert!(json["assignedPrimaryNode"].is_null());
        assert!(json["distanceToAccess"].is_null());
        assert_eq!(json["analysis"]["riskLevel"], "medium");
        assert_eq!(json["source"], "classifier");
    }
}
