use std::time::Duration;

use thiserror::Error;

use netfeas_core::NodeClass;

/// Why a classifier could not produce a usable prediction.
///
/// Every variant sends the orchestrator down the network-analysis path.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("classifier unavailable: {0}")]
    Unavailable(String),

    #[error("classifier returned a malformed prediction: {0}")]
    Malformed(String),

    #[error("classifier model has not been trained")]
    NotTrained,

    #[error("classifier did not answer within {0:?}")]
    Timeout(Duration),
}

/// Failure reading the equipment inventory.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error(transparent)]
    Client(#[from] netfeas_client::ClientError),

    #[error("inventory backend unavailable: {0}")]
    Unavailable(String),
}

/// An assessment that could not be completed.
///
/// Distinct from a completed assessment whose verdict is "not feasible".
#[derive(Debug, Error)]
pub enum FeasibilityError {
    #[error("failed to fetch {class} inventory: {source}")]
    Inventory {
        class: NodeClass,
        #[source]
        source: InventoryError,
    },

    #[error("{class} inventory did not answer within {timeout:?}")]
    InventoryTimeout { class: NodeClass, timeout: Duration },
}
