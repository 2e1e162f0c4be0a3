//! HTTP clients for the services the feasibility engine depends on.
//!
//! [`InventoryClient`] reads equipment tables from the hosted REST backend.
//! [`ClassifierClient`] talks to a remote address classifier exposing the
//! predict, batch and training routes.

pub mod classifier;
pub mod error;
mod http;
pub mod inventory;

pub use classifier::ClassifierClient;
pub use error::ClientError;
pub use inventory::InventoryClient;
