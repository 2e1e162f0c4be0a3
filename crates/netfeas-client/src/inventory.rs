//! Read-only client for the equipment inventory tables.
//!
//! The inventory lives in a hosted Postgres exposed through a PostgREST-style
//! API: `GET {base}/rest/v1/{table}?select=*` returns a JSON array of rows.
//! Rows are decoded one at a time so a single malformed row does not hide
//! the rest of the table.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;

use netfeas_core::{AppConfig, Coordinate, NetworkNode, NodeClass, NodeStatus};

use crate::error::ClientError;
use crate::http::{build_client, join, parse_base_url, send_json};

const DEFAULT_PRIMARY_TABLE: &str = "pco";
const DEFAULT_ACCESS_TABLE: &str = "msan";
const DEFAULT_USER_AGENT: &str = "netfeas/0.1 (feasibility)";

pub struct InventoryClient {
    client: Client,
    api_key: String,
    base_url: Url,
    primary_table: String,
    access_table: String,
}

impl InventoryClient {
    /// Creates a client for the backend at `base_url` using the default
    /// `pco` and `msan` tables.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(timeout, DEFAULT_USER_AGENT)?,
            api_key: api_key.to_owned(),
            base_url: parse_base_url(base_url)?,
            primary_table: DEFAULT_PRIMARY_TABLE.to_string(),
            access_table: DEFAULT_ACCESS_TABLE.to_string(),
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`InventoryClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(
                Duration::from_secs(config.inventory_timeout_secs),
                &config.user_agent,
            )?,
            api_key: config.inventory_api_key.clone(),
            base_url: parse_base_url(&config.inventory_url)?,
            primary_table: config.primary_table.clone(),
            access_table: config.access_table.clone(),
        })
    }

    fn table_for(&self, class: NodeClass) -> &str {
        match class {
            NodeClass::PrimaryConcentrationPoint => &self.primary_table,
            NodeClass::AccessNode => &self.access_table,
        }
    }

    /// Fetches every node of `class`.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ClientError::Deserialize`] if the body is not a JSON array.
    pub async fn fetch_nodes(&self, class: NodeClass) -> Result<Vec<NetworkNode>, ClientError> {
        let table = self.table_for(class);
        let mut url = join(&self.base_url, &format!("rest/v1/{table}"))?;
        url.query_pairs_mut().append_pair("select", "*");

        let request = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::ACCEPT, "application/json");

        let context = format!("inventory table '{table}'");
        let body = send_json(request, &context).await?;
        let rows: Vec<serde_json::Value> =
            serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
                context: context.clone(),
                source: e,
            })?;

        let total = rows.len();
        let nodes: Vec<NetworkNode> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<InventoryRow>(row) {
                Ok(row) => Some(row.into_node()),
                Err(e) => {
                    tracing::warn!(table, error = %e, "skipping malformed inventory row");
                    None
                }
            })
            .collect();

        tracing::debug!(
            class = class.code(),
            table,
            rows = total,
            nodes = nodes.len(),
            "fetched inventory"
        );
        Ok(nodes)
    }
}

/// Inventory ids come back as integers or text depending on the table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RowId {
    Int(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct InventoryRow {
    id: RowId,
    #[serde(default, alias = "nom")]
    name: Option<String>,
    #[serde(default, alias = "adresse")]
    address: Option<String>,
    #[serde(default, alias = "lat")]
    latitude: Option<f64>,
    #[serde(default, alias = "lng", alias = "lon")]
    longitude: Option<f64>,
    #[serde(alias = "statut", alias = "etat")]
    status: NodeStatus,
    #[serde(
        alias = "capacite_totale",
        alias = "capacity",
        alias = "capacite",
        alias = "totalCapacity"
    )]
    total_capacity: i64,
    #[serde(default, alias = "capacite_utilisee", alias = "usedCapacity")]
    used_capacity: Option<i64>,
}

impl InventoryRow {
    fn into_node(self) -> NetworkNode {
        let coordinate = match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        };
        NetworkNode {
            id: match self.id {
                RowId::Int(n) => n.to_string(),
                RowId::Text(s) => s,
            },
            name: self.name.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            coordinate,
            status: self.status,
            total_capacity: self.total_capacity,
            used_capacity: self.used_capacity.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_with_french_columns_maps_to_node() {
        let row: InventoryRow = serde_json::from_value(serde_json::json!({
            "id": 7,
            "nom": "PCO Médina 02",
            "adresse": "Rue 6 x Blaise Diagne",
            "latitude": 14.684,
            "longitude": -17.451,
            "statut": "actif",
            "capacite_totale": 48,
            "capacite_utilisee": 30
        }))
        .expect("row");
        let node = row.into_node();
        assert_eq!(node.id, "7");
        assert_eq!(node.status, NodeStatus::Active);
        assert_eq!(node.coordinate, Some(Coordinate::new(14.684, -17.451)));
        assert_eq!(node.used_capacity, 30);
    }

    #[test]
    fn coordinate_requires_both_axes() {
        let row: InventoryRow = serde_json::from_value(serde_json::json!({
            "id": "msan-3",
            "name": "MSAN Yoff",
            "latitude": 14.75,
            "longitude": null,
            "status": "active",
            "total_capacity": 512
        }))
        .expect("row");
        let node = row.into_node();
        assert!(node.coordinate.is_none());
        assert_eq!(node.used_capacity, 0);
        assert_eq!(node.address, "");
    }

    #[test]
    fn table_names_come_from_config() {
        let config = AppConfig {
            env: netfeas_core::Environment::Test,
            bind_addr: "127.0.0.1:3000".parse().expect("socket addr"),
            log_level: "info".to_string(),
            inventory_url: "https://inv.example.com".to_string(),
            inventory_api_key: "k".to_string(),
            primary_table: "equipements_pco".to_string(),
            access_table: "equipements_msan".to_string(),
            inventory_timeout_secs: 5,
            classifier_url: None,
            classifier_timeout_ms: 3000,
            training_data_path: None,
            localities_path: None,
            user_agent: "netfeas-test".to_string(),
        };
        let client = InventoryClient::from_config(&config).expect("client");
        assert_eq!(
            client.table_for(NodeClass::PrimaryConcentrationPoint),
            "equipements_pco"
        );
        assert_eq!(client.table_for(NodeClass::AccessNode), "equipements_msan");
    }

    #[test]
    fn new_uses_default_tables() {
        let client = InventoryClient::new("https://inv.example.com", "k", Duration::from_secs(5))
            .expect("client");
        assert_eq!(
            client.table_for(NodeClass::PrimaryConcentrationPoint),
            "pco"
        );
        assert_eq!(client.table_for(NodeClass::AccessNode), "msan");
    }
}
