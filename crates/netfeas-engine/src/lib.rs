//! FTTH feasibility assessment.
//!
//! Given a client address, [`FeasibilityOrchestrator::assess`] first asks an
//! [`AddressClassifier`] for a verdict. When none is usable it resolves the
//! address to a coordinate, finds the nearest active primary concentration
//! point and access node, and scores the pair on distance and capacity.

pub mod capacity;
pub mod distance;
pub mod error;
pub mod geo;
pub mod locator;
pub mod orchestrator;
pub mod scorer;
pub mod traits;

pub use capacity::{analyze, CapacityReport, SPARE_CAPACITY_THRESHOLD};
pub use distance::distance_km;
pub use error::{ClassifyError, FeasibilityError, InventoryError};
pub use geo::{FixedGeoResolver, GeoResolver, SimulatedGeoResolver};
pub use locator::{find_nearest, NearestNode};
pub use orchestrator::{parse_address, FeasibilityOrchestrator};
pub use scorer::{is_feasible, score, NodeAssessment};
pub use traits::{AddressClassifier, EquipmentInventory};
