//! Address feasibility classifier.
//!
//! Fits a small three-class linear model from an address → feasibility table
//! and answers predictions for partial addresses. Rows that match a training
//! record exactly are answered from the table itself and flagged as
//! [`MatchMethod::ExactMatch`](netfeas_core::MatchMethod::ExactMatch).

pub mod error;
mod features;
pub mod keywords;
pub mod model;
mod normalize;
pub mod service;
pub mod table;

pub use error::ClassifierError;
pub use keywords::geographic_keyword_score;
pub use model::{ClassifierModel, TrainingSummary};
pub use service::ClassifierService;
pub use table::{parse_training_table, ParsedTable, TrainingRow};
