//! Seams between the orchestrator and its I/O collaborators.

use async_trait::async_trait;

use netfeas_classifier::{ClassifierError, ClassifierService};
use netfeas_client::{ClassifierClient, ClientError, InventoryClient};
use netfeas_core::{AddressInput, ClassifierPrediction, NetworkNode, NodeClass};

use crate::error::{ClassifyError, InventoryError};

#[async_trait]
pub trait AddressClassifier: Send + Sync {
    async fn classify(&self, input: &AddressInput) -> Result<ClassifierPrediction, ClassifyError>;
}

/// Read-only access to the equipment inventory.
#[async_trait]
pub trait EquipmentInventory: Send + Sync {
    async fn list_nodes(&self, class: NodeClass) -> Result<Vec<NetworkNode>, InventoryError>;
}

#[async_trait]
impl AddressClassifier for ClassifierService {
    async fn classify(&self, input: &AddressInput) -> Result<ClassifierPrediction, ClassifyError> {
        self.predict(input).map_err(|e| match e {
            ClassifierError::NotTrained => ClassifyError::NotTrained,
            other => ClassifyError::Unavailable(other.to_string()),
        })
    }
}

#[async_trait]
impl AddressClassifier for ClassifierClient {
    async fn classify(&self, input: &AddressInput) -> Result<ClassifierPrediction, ClassifyError> {
        self.predict(input).await.map_err(|e| match e {
            ClientError::Deserialize { .. } => ClassifyError::Malformed(e.to_string()),
            other => ClassifyError::Unavailable(other.to_string()),
        })
    }
}

#[async_trait]
impl EquipmentInventory for InventoryClient {
    async fn list_nodes(&self, class: NodeClass) -> Result<Vec<NetworkNode>, InventoryError> {
        Ok(self.fetch_nodes(class).await?)
    }
}
