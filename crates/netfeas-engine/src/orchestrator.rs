//! Entry point of an assessment.
//!
//! The classifier is consulted first. A usable prediction is mapped straight
//! into a result and the inventory is never read. Anything else (no
//! classifier, an error, a timeout, an out-of-range confidence) is logged and
//! the assessment falls back to network analysis, where inventory failures do
//! surface to the caller.

use std::sync::Arc;
use std::time::Duration;

use netfeas_classifier::ClassifierService;
use netfeas_client::{ClassifierClient, ClientError, InventoryClient};
use netfeas_core::{
    AddressInput, Analysis, AppConfig, AssessmentSource, ClassifierPrediction, FeasibilityClass,
    FeasibilityResult, LocalitiesFile, MatchMethod, NetworkNode, NodeClass, RiskLevel,
};

use crate::capacity::analyze;
use crate::error::{ClassifyError, FeasibilityError};
use crate::geo::{GeoResolver, SimulatedGeoResolver};
use crate::locator::find_nearest;
use crate::scorer::{is_feasible, score, NodeAssessment};
use crate::traits::{AddressClassifier, EquipmentInventory};

const DEFAULT_CLASSIFIER_TIMEOUT: Duration = Duration::from_secs(3);
const DEFAULT_INVENTORY_TIMEOUT: Duration = Duration::from_secs(10);
const REQUIRES_STUDY_SCORE: u8 = 60;

/// Split a comma-separated address into classifier fields.
///
/// Parts are `province, commune, quarter, way`. Missing parts are empty.
/// With fewer than four parts the way is the whole address.
#[must_use]
pub fn parse_address(address: &str) -> AddressInput {
    let parts: Vec<&str> = address.split(',').map(str::trim).collect();
    let part = |i: usize| parts.get(i).copied().unwrap_or_default().to_string();

    AddressInput {
        province: part(0),
        commune: part(1),
        quarter: part(2),
        way: if parts.len() >= 4 {
            part(3)
        } else {
            address.trim().to_string()
        },
        zone: None,
        capacity: None,
    }
}

pub struct FeasibilityOrchestrator {
    classifier: Option<Arc<dyn AddressClassifier>>,
    inventory: Arc<dyn EquipmentInventory>,
    geo: Arc<dyn GeoResolver>,
    classifier_timeout: Duration,
    inventory_timeout: Duration,
}

impl FeasibilityOrchestrator {
    /// Orchestrator without a classifier: every call runs network analysis.
    #[must_use]
    pub fn new(inventory: Arc<dyn EquipmentInventory>, geo: Arc<dyn GeoResolver>) -> Self {
        Self {
            classifier: None,
            inventory,
            geo,
            classifier_timeout: DEFAULT_CLASSIFIER_TIMEOUT,
            inventory_timeout: DEFAULT_INVENTORY_TIMEOUT,
        }
    }

    /// Production wiring: inventory over HTTP, simulated geocoding over
    /// `localities`, and either the remote classifier named by
    /// `classifier_url` or the in-process `local_classifier`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if an HTTP client cannot be built.
    pub fn from_config(
        config: &AppConfig,
        localities: &LocalitiesFile,
        local_classifier: Arc<ClassifierService>,
    ) -> Result<Self, ClientError> {
        let classifier_timeout = Duration::from_millis(config.classifier_timeout_ms);
        let inventory = Arc::new(InventoryClient::from_config(config)?);
        let geo = Arc::new(SimulatedGeoResolver::new(localities));

        let classifier: Arc<dyn AddressClassifier> = match &config.classifier_url {
            Some(url) => Arc::new(ClassifierClient::with_user_agent(
                url,
                classifier_timeout,
                &config.user_agent,
            )?),
            None => local_classifier,
        };

        Ok(Self::new(inventory, geo)
            .with_classifier(classifier)
            .with_classifier_timeout(classifier_timeout)
            .with_inventory_timeout(Duration::from_secs(config.inventory_timeout_secs)))
    }

    #[must_use]
    pub fn with_classifier(mut self, classifier: Arc<dyn AddressClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    #[must_use]
    pub fn with_classifier_timeout(mut self, timeout: Duration) -> Self {
        self.classifier_timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_inventory_timeout(mut self, timeout: Duration) -> Self {
        self.inventory_timeout = timeout;
        self
    }

    /// Assess one client address.
    ///
    /// # Errors
    ///
    /// - [`FeasibilityError::Inventory`] if an inventory fetch fails on the
    ///   network-analysis path.
    /// - [`FeasibilityError::InventoryTimeout`] if a fetch exceeds its timeout.
    ///
    /// Classifier problems never surface here.
    pub async fn assess(&self, address: &str) -> Result<FeasibilityResult, FeasibilityError> {
        let input = parse_address(address);

        match self.try_classifier(&input).await {
            Ok(Some(prediction)) => {
                tracing::debug!(
                    class = %prediction.feasibility_class,
                    confidence = prediction.confidence,
                    "assessment answered by classifier"
                );
                return Ok(from_prediction(&prediction));
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "classifier unusable, falling back to network analysis");
            }
        }

        self.analyze_network(address).await
    }

    async fn try_classifier(
        &self,
        input: &AddressInput,
    ) -> Result<Option<ClassifierPrediction>, ClassifyError> {
        let Some(classifier) = &self.classifier else {
            return Ok(None);
        };

        let prediction = tokio::time::timeout(self.classifier_timeout, classifier.classify(input))
            .await
            .map_err(|_| ClassifyError::Timeout(self.classifier_timeout))??;

        if !prediction.is_well_formed() {
            return Err(ClassifyError::Malformed(format!(
                "confidence {} outside [0, 1]",
                prediction.confidence
            )));
        }
        Ok(Some(prediction))
    }

    async fn analyze_network(&self, address: &str) -> Result<FeasibilityResult, FeasibilityError> {
        let origin = self.geo.resolve(address);

        let (primaries, accesses) = tokio::try_join!(
            self.fetch(NodeClass::PrimaryConcentrationPoint),
            self.fetch(NodeClass::AccessNode),
        )?;

        let primary = find_nearest(&primaries, origin);
        let access = find_nearest(&accesses, origin);

        let primary_eval = primary.map(|n| NodeAssessment {
            distance_km: n.distance_km,
            capacity: analyze(n.node),
        });
        let access_eval = access.map(|n| NodeAssessment {
            distance_km: n.distance_km,
            capacity: analyze(n.node),
        });

        let analysis = score(primary_eval.as_ref(), access_eval.as_ref());
        let feasible = is_feasible(primary_eval.as_ref(), access_eval.as_ref());

        tracing::debug!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            primary = primary.map(|n| n.node.id.as_str()),
            access = access.map(|n| n.node.id.as_str()),
            score = analysis.score,
            feasible,
            "network analysis complete"
        );

        Ok(FeasibilityResult {
            is_feasible: feasible,
            assigned_primary_node: primary.map(|n| n.node.clone()),
            assigned_access_node: access.map(|n| n.node.clone()),
            distance_to_primary: primary.map(|n| n.distance_km),
            distance_to_access: access.map(|n| n.distance_km),
            analysis,
            source: AssessmentSource::NetworkAnalysis,
        })
    }

    async fn fetch(&self, class: NodeClass) -> Result<Vec<NetworkNode>, FeasibilityError> {
        tokio::time::timeout(self.inventory_timeout, self.inventory.list_nodes(class))
            .await
            .map_err(|_| FeasibilityError::InventoryTimeout {
                class,
                timeout: self.inventory_timeout,
            })?
            .map_err(|source| FeasibilityError::Inventory { class, source })
    }
}

/// Map a well-formed prediction into a result with no equipment assigned.
fn from_prediction(prediction: &ClassifierPrediction) -> FeasibilityResult {
    let percent = confidence_percent(prediction.confidence);
    let mut factors = Vec::new();

    let (is_feasible, score, risk_level) = match prediction.feasibility_class {
        FeasibilityClass::Feasible => {
            factors.push(format!("Validated by ML system ({percent}% confidence)"));
            (true, percent, RiskLevel::Low)
        }
        FeasibilityClass::NotFeasible => {
            factors.push(format!("Rejected by ML system ({percent}% confidence)"));
            (
                false,
                confidence_percent(1.0 - prediction.confidence),
                RiskLevel::High,
            )
        }
        FeasibilityClass::RequiresStudy => {
            factors.push("Technical study required".to_string());
            (false, REQUIRES_STUDY_SCORE, RiskLevel::Medium)
        }
    };

    if prediction.match_method == MatchMethod::ExactMatch {
        factors.push(match &prediction.matched_status {
            Some(status) => format!("Exact match with a training record (status: {status})"),
            None => "Exact match with a training record".to_string(),
        });
    }

    FeasibilityResult {
        is_feasible,
        assigned_primary_node: None,
        assigned_access_node: None,
        distance_to_primary: None,
        distance_to_access: None,
        analysis: Analysis {
            score,
            factors,
            recommendations: Vec::new(),
            risk_level,
        },
        source: AssessmentSource::Classifier,
    }
}

/// `round(confidence * 100)` for a confidence already checked to be in `[0, 1]`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn confidence_percent(confidence: f64) -> u8 {
    (confidence.clamp(0.0, 1.0) * 100.0).round() as u8
}
