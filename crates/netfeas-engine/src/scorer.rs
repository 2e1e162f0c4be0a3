//! Additive-penalty feasibility score.
//!
//! Two threshold sets exist side by side. The soft distances (2 km / 5 km)
//! only cost points in [`score`]; the hard distances (3 km / 10 km) decide
//! the verdict in [`is_feasible`]. A pair can therefore lose points and
//! still be feasible.

use netfeas_core::{Analysis, RiskLevel};

use crate::capacity::CapacityReport;

pub const PRIMARY_SOFT_LIMIT_KM: f64 = 2.0;
pub const ACCESS_SOFT_LIMIT_KM: f64 = 5.0;
pub const PRIMARY_HARD_LIMIT_KM: f64 = 3.0;
pub const ACCESS_HARD_LIMIT_KM: f64 = 10.0;

const PRIMARY_DISTANCE_PENALTY: i32 = 15;
const ACCESS_DISTANCE_PENALTY: i32 = 20;
const PRIMARY_CAPACITY_PENALTY: i32 = 25;
const ACCESS_CAPACITY_PENALTY: i32 = 30;

/// Distance and capacity findings for one assigned node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeAssessment {
    pub distance_km: f64,
    pub capacity: CapacityReport,
}

/// Score a primary/access pair. Either side may be missing.
///
/// Rules run in a fixed order and each triggered rule overwrites the risk
/// level. The score never drops below zero.
#[must_use]
pub fn score(primary: Option<&NodeAssessment>, access: Option<&NodeAssessment>) -> Analysis {
    let mut points: i32 = 100;
    let mut risk_level = RiskLevel::Low;
    let mut factors = Vec::new();
    let mut recommendations = Vec::new();

    if let Some(p) = primary.filter(|p| p.distance_km > PRIMARY_SOFT_LIMIT_KM) {
        factors.push(format!(
            "Primary concentration point is {:.2} km away (over {PRIMARY_SOFT_LIMIT_KM:.1} km)",
            p.distance_km
        ));
        points -= PRIMARY_DISTANCE_PENALTY;
        risk_level = RiskLevel::Medium;
    }

    if let Some(a) = access.filter(|a| a.distance_km > ACCESS_SOFT_LIMIT_KM) {
        factors.push(format!(
            "Access node is {:.2} km away (over {ACCESS_SOFT_LIMIT_KM:.1} km)",
            a.distance_km
        ));
        points -= ACCESS_DISTANCE_PENALTY;
        risk_level = RiskLevel::High;
    }

    if let Some(p) = primary.filter(|p| !p.capacity.has_spare_capacity) {
        factors.push(format!(
            "Primary concentration point utilization is {:.0}%",
            p.capacity.utilization_rate * 100.0
        ));
        points -= PRIMARY_CAPACITY_PENALTY;
        risk_level = RiskLevel::High;
        recommendations.push(
            "Assign an alternate primary concentration point or increase its capacity".to_string(),
        );
    }

    if let Some(a) = access.filter(|a| !a.capacity.has_spare_capacity) {
        factors.push(format!(
            "Access node utilization is {:.0}%",
            a.capacity.utilization_rate * 100.0
        ));
        points -= ACCESS_CAPACITY_PENALTY;
        risk_level = RiskLevel::High;
        recommendations
            .push("Assign an alternate access node or increase its capacity".to_string());
    }

    let points = points.clamp(0, 100);
    recommendations.push(closing_recommendation(points).to_string());

    Analysis {
        score: u8::try_from(points).unwrap_or_default(),
        factors,
        recommendations,
        risk_level,
    }
}

fn closing_recommendation(points: i32) -> &'static str {
    if points >= 80 {
        "Connection recommended: optimal conditions"
    } else if points >= 60 {
        "Connection possible with constraint monitoring"
    } else {
        "Connection risky: detailed evaluation required"
    }
}

/// Hard feasibility gate: both nodes assigned, within the hard distance
/// limits, and both with spare capacity.
#[must_use]
pub fn is_feasible(primary: Option<&NodeAssessment>, access: Option<&NodeAssessment>) -> bool {
    match (primary, access) {
        (Some(p), Some(a)) => {
            p.distance_km <= PRIMARY_HARD_LIMIT_KM
                && a.distance_km <= ACCESS_HARD_LIMIT_KM
                && p.capacity.has_spare_capacity
                && a.capacity.has_spare_capacity
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(distance_km: f64, utilization_rate: f64) -> NodeAssessment {
        NodeAssessment {
            distance_km,
            capacity: CapacityReport {
                has_spare_capacity: utilization_rate < crate::SPARE_CAPACITY_THRESHOLD,
                utilization_rate,
            },
        }
    }

    #[test]
    fn no_nodes_scores_full_marks() {
        let analysis = score(None, None);
        assert_eq!(analysis.score, 100);
        assert!(analysis.factors.is_empty());
        assert_eq!(analysis.risk_level, RiskLevel::Low);
        assert_eq!(
            analysis.recommendations,
            vec!["Connection recommended: optimal conditions".to_string()]
        );
        assert!(!is_feasible(None, None));
    }

    #[test]
    fn close_nodes_with_room_are_optimal() {
        let (p, a) = (at(1.0, 0.5), at(3.0, 0.5));
        let analysis = score(Some(&p), Some(&a));
        assert_eq!(analysis.score, 100);
        assert_eq!(analysis.risk_level, RiskLevel::Low);
        assert!(is_feasible(Some(&p), Some(&a)));
    }

    #[test]
    fn soft_primary_distance_costs_points_but_stays_feasible() {
        let (p, a) = (at(2.5, 0.5), at(4.0, 0.5));
        let analysis = score(Some(&p), Some(&a));
        assert_eq!(analysis.score, 85);
        assert_eq!(analysis.risk_level, RiskLevel::Medium);
        assert_eq!(analysis.factors.len(), 1);
        assert!(analysis.factors[0].contains("2.50 km"));
        assert!(is_feasible(Some(&p), Some(&a)));
    }

    #[test]
    fn saturated_primary_is_high_risk_and_not_feasible() {
        let (p, a) = (at(1.0, 0.97), at(3.0, 0.5));
        let analysis = score(Some(&p), Some(&a));
        assert_eq!(analysis.score, 75);
        assert_eq!(analysis.risk_level, RiskLevel::High);
        assert!(analysis.factors[0].contains("97%"));
        assert_eq!(analysis.recommendations.len(), 2);
        assert_eq!(
            analysis.recommendations[1],
            "Connection possible with constraint monitoring"
        );
        assert!(!is_feasible(Some(&p), Some(&a)));
    }

    #[test]
    fn all_penalties_stack_in_rule_order() {
        let (p, a) = (at(2.1, 1.0), at(5.1, 1.0));
        let analysis = score(Some(&p), Some(&a));
        assert_eq!(analysis.score, 10);
        assert_eq!(analysis.risk_level, RiskLevel::High);
        assert_eq!(analysis.factors.len(), 4);
        assert!(analysis.factors[0].starts_with("Primary concentration point is"));
        assert!(analysis.factors[1].starts_with("Access node is"));
        assert!(analysis.factors[2].contains("utilization"));
        assert!(analysis.factors[3].starts_with("Access node utilization"));
        assert_eq!(
            analysis.recommendations.last().map(String::as_str),
            Some("Connection risky: detailed evaluation required")
        );
    }

    #[test]
    fn hard_gate_uses_its_own_limits() {
        let a = at(9.9, 0.5);
        assert!(is_feasible(Some(&at(3.0, 0.5)), Some(&a)));
        assert!(!is_feasible(Some(&at(3.01, 0.5)), Some(&a)));
        assert!(!is_feasible(Some(&at(1.0, 0.5)), Some(&at(10.5, 0.5))));
        assert!(!is_feasible(Some(&at(1.0, 0.5)), None));
    }

    #[test]
    fn soft_access_distance_alone_is_high_risk() {
        let (p, a) = (at(1.0, 0.5), at(6.0, 0.5));
        let analysis = score(Some(&p), Some(&a));
        assert_eq!(analysis.score, 80);
        assert_eq!(analysis.risk_level, RiskLevel::High);
        assert_eq!(
            analysis.recommendations,
            vec!["Connection recommended: optimal conditions".to_string()]
        );
    }
}
