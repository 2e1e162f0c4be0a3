use netfeas_core::{Coordinate, NetworkNode, NodeStatus};

use crate::distance::distance_km;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearestNode<'a> {
    pub node: &'a NetworkNode,
    pub distance_km: f64,
}

/// Nearest active, positioned node to `origin`.
///
/// Nodes that are not [`NodeStatus::Active`], have no coordinate, or sit at a
/// non-finite distance are ignored. On equal distances the earlier node wins.
#[must_use]
pub fn find_nearest(nodes: &[NetworkNode], origin: Coordinate) -> Option<NearestNode<'_>> {
    let mut best: Option<NearestNode<'_>> = None;

    for node in nodes {
        if node.status != NodeStatus::Active {
            continue;
        }
        let Some(coordinate) = node.coordinate else {
            continue;
        };
        let distance = distance_km(origin, coordinate);
        if !distance.is_finite() {
            continue;
        }
        if best.is_none_or(|b| distance < b.distance_km) {
            best = Some(NearestNode {
                node,
                distance_km: distance,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: Coordinate = Coordinate::new(14.70, -17.45);

    fn node(id: &str, status: NodeStatus, coordinate: Option<Coordinate>) -> NetworkNode {
        NetworkNode {
            id: id.to_string(),
            name: id.to_string(),
            address: String::new(),
            coordinate,
            status,
            total_capacity: 10,
            used_capacity: 1,
        }
    }

    /// A point due north of `ORIGIN`.
    fn at(latitude: f64) -> Option<Coordinate> {
        Some(Coordinate::new(latitude, ORIGIN.longitude))
    }

    #[test]
    fn empty_list_has_no_nearest() {
        assert!(find_nearest(&[], ORIGIN).is_none());
    }

    #[test]
    fn inactive_nodes_are_never_returned() {
        let nodes = vec![
            node("down", NodeStatus::Down, Some(ORIGIN)),
            node("sat", NodeStatus::Saturated, Some(ORIGIN)),
            node("maint", NodeStatus::Maintenance, Some(ORIGIN)),
        ];
        assert!(find_nearest(&nodes, ORIGIN).is_none());
    }

    #[test]
    fn uncoordinated_nodes_are_ignored() {
        let nodes = vec![
            node("nowhere", NodeStatus::Active, None),
            node("far", NodeStatus::Active, at(14.80)),
        ];
        let nearest = find_nearest(&nodes, ORIGIN).expect("eligible node");
        assert_eq!(nearest.node.id, "far");
    }

    #[test]
    fn picks_the_closest_active_node() {
        let nodes = vec![
            node("a", NodeStatus::Active, at(14.75)),
            node("b", NodeStatus::Down, at(14.7001)),
            node("c", NodeStatus::Active, at(14.71)),
        ];
        let nearest = find_nearest(&nodes, ORIGIN).expect("eligible node");
        assert_eq!(nearest.node.id, "c");
        assert!(nearest.distance_km > 1.0 && nearest.distance_km < 1.2);
    }

    #[test]
    fn ties_keep_input_order() {
        let here = at(14.71);
        let nodes = vec![
            node("first", NodeStatus::Active, here),
            node("second", NodeStatus::Active, here),
        ];
        assert_eq!(find_nearest(&nodes, ORIGIN).expect("node").node.id, "first");
    }
}
