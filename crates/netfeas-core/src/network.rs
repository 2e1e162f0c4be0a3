//! Network equipment as seen by the feasibility engine.

use serde::{Deserialize, Serialize};

/// A WGS84 position. Values are not range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Operational status of a node. Only [`NodeStatus::Active`] nodes can be
/// assigned to a new connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    #[serde(alias = "actif", alias = "ACTIVE")]
    Active,
    #[serde(alias = "sature", alias = "saturé", alias = "SATURATED")]
    Saturated,
    #[serde(alias = "en_panne", alias = "hors_service", alias = "DOWN")]
    Down,
    #[serde(alias = "MAINTENANCE")]
    Maintenance,
}

impl std::fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeStatus::Active => write!(f, "active"),
            NodeStatus::Saturated => write!(f, "saturated"),
            NodeStatus::Down => write!(f, "down"),
            NodeStatus::Maintenance => write!(f, "maintenance"),
        }
    }
}

/// The two equipment classes a connection is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeClass {
    /// First-level optical aggregation point (PCO).
    PrimaryConcentrationPoint,
    /// Multi-service access node further upstream (MSAN).
    AccessNode,
}

impl NodeClass {
    /// Short equipment code used in logs and operator-facing text.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            NodeClass::PrimaryConcentrationPoint => "PCO",
            NodeClass::AccessNode => "MSAN",
        }
    }
}

impl std::fmt::Display for NodeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeClass::PrimaryConcentrationPoint => write!(f, "primary concentration point"),
            NodeClass::AccessNode => write!(f, "access node"),
        }
    }
}

/// One piece of network equipment from the inventory backend.
///
/// `used_capacity <= total_capacity` is expected but not enforced upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    pub id: String,
    pub name: String,
    pub address: String,
    /// `None` when the inventory row has no usable position.
    pub coordinate: Option<Coordinate>,
    pub status: NodeStatus,
    pub total_capacity: i64,
    pub used_capacity: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_status_accepts_french_aliases() {
        let status: NodeStatus = serde_json::from_str("\"actif\"").unwrap();
        assert_eq!(status, NodeStatus::Active);
        let status: NodeStatus = serde_json::from_str("\"saturé\"").unwrap();
        assert_eq!(status, NodeStatus::Saturated);
    }

    #[test]
    fn node_status_rejects_unknown_value() {
        assert!(serde_json::from_str::<NodeStatus>("\"retired\"").is_err());
    }

    #[test]
    fn network_node_serializes_camel_case() {
        let node = NetworkNode {
            id: "pco-1".to_string(),
            name: "PCO Plateau 01".to_string(),
            address: "Avenue Pompidou".to_string(),
            coordinate: Some(Coordinate::new(14.67, -17.43)),
            status: NodeStatus::Active,
            total_capacity: 64,
            used_capacity: 12,
        };
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["totalCapacity"], 64);
        assert_eq!(json["usedCapacity"], 12);
        assert_eq!(json["status"], "active");
    }

    #[test]
    fn node_class_codes() {
        assert_eq!(NodeClass::PrimaryConcentrationPoint.code(), "PCO");
        assert_eq!(NodeClass::AccessNode.code(), "MSAN");
    }
}
