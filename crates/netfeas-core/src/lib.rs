//! Shared domain types and configuration for the feasibility engine.
//!
//! Everything here is plain data: network nodes as read from the inventory
//! backend, assessment results handed back to callers, and the request and
//! response shapes of the classifier service boundary.

mod app_config;
pub mod assessment;
pub mod classifier;
mod config;
mod error;
pub mod localities;
pub mod network;
pub mod text;

pub use app_config::{AppConfig, Environment};
pub use assessment::{Analysis, AssessmentSource, FeasibilityResult, RiskLevel};
pub use classifier::{
    AddressInput, BatchPredictItem, CapacityValue, ClassifierPrediction, FeasibilityClass,
    MatchMethod, PredictResponse, TrainRequest, TrainResponse,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use localities::{load_localities, LocalitiesFile, Locality};
pub use network::{Coordinate, NetworkNode, NodeClass, NodeStatus};
pub use text::normalize_text;
