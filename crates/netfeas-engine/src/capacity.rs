use netfeas_core::NetworkNode;

/// Utilization at or above which a node is considered full.
pub const SPARE_CAPACITY_THRESHOLD: f64 = 0.95;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapacityReport {
    pub has_spare_capacity: bool,
    /// `used / total`. May exceed 1.0 when the inventory over-reports usage.
    pub utilization_rate: f64,
}

/// Utilization of `node`. A node with no declared capacity counts as full.
#[must_use]
pub fn analyze(node: &NetworkNode) -> CapacityReport {
    if node.total_capacity <= 0 {
        return CapacityReport {
            has_spare_capacity: false,
            utilization_rate: 1.0,
        };
    }

    #[allow(clippy::cast_precision_loss)]
    let utilization_rate = node.used_capacity as f64 / node.total_capacity as f64;
    CapacityReport {
        has_spare_capacity: utilization_rate < SPARE_CAPACITY_THRESHOLD,
        utilization_rate,
    }
}
