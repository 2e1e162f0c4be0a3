//! Client for a remote address classifier service.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use netfeas_core::{
    AddressInput, BatchPredictItem, ClassifierPrediction, PredictResponse, TrainRequest,
    TrainResponse,
};

use crate::error::ClientError;
use crate::http::{build_client, join, parse_base_url, send_json, send_json_any_status};

const DEFAULT_USER_AGENT: &str = "netfeas/0.1 (feasibility)";

/// Calls the `/api/v1/classifier/*` routes of a classifier service.
pub struct ClassifierClient {
    client: Client,
    base_url: Url,
}

impl ClassifierClient {
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the `reqwest::Client` cannot be built,
    /// or [`ClientError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Self::with_user_agent(base_url, timeout, DEFAULT_USER_AGENT)
    }

    /// # Errors
    ///
    /// Same as [`ClassifierClient::new`].
    pub fn with_user_agent(
        base_url: &str,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_client(timeout, user_agent)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Predicts one address.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Service`] if the service answers `success: false`
    ///   (untrained model included) or omits the prediction.
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on transport failure.
    /// - [`ClientError::Deserialize`] if the body does not match the envelope.
    pub async fn predict(&self, input: &AddressInput) -> Result<ClassifierPrediction, ClientError> {
        let url = join(&self.base_url, "api/v1/classifier/predict")?;
        let (_, body) =
            send_json_any_status(self.client.post(url).json(input), "classifier predict").await?;
        let response: PredictResponse = decode(body, "classifier predict")?;

        match response {
            PredictResponse {
                success: true,
                prediction: Some(prediction),
                ..
            } => Ok(prediction),
            PredictResponse { error, .. } => Err(ClientError::Service(
                error.unwrap_or_else(|| "prediction missing from response".to_string()),
            )),
        }
    }

    /// Predicts several addresses. Each element carries its own outcome.
    ///
    /// # Errors
    ///
    /// Transport and decoding failures only; per-item failures are reported
    /// in [`BatchPredictItem::error`].
    pub async fn predict_batch(
        &self,
        inputs: &[AddressInput],
    ) -> Result<Vec<BatchPredictItem>, ClientError> {
        let url = join(&self.base_url, "api/v1/classifier/predict/batch")?;
        let body = send_json(self.client.post(url).json(inputs), "classifier batch").await?;
        decode(body, "classifier batch")
    }

    /// Uploads a training table.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Service`] if the service rejects the table.
    /// - [`ClientError::Http`] / [`ClientError::UnexpectedStatus`] on transport failure.
    pub async fn train(&self, content: &str) -> Result<TrainResponse, ClientError> {
        let url = join(&self.base_url, "api/v1/classifier/train")?;
        let request = TrainRequest {
            content: content.to_string(),
        };
        let (_, body) =
            send_json_any_status(self.client.post(url).json(&request), "classifier train").await?;
        let response: TrainResponse = decode(body, "classifier train")?;
        if response.success {
            Ok(response)
        } else {
            Err(ClientError::Service(response.message))
        }
    }
}

fn decode<T: DeserializeOwned>(body: serde_json::Value, context: &str) -> Result<T, ClientError> {
    serde_json::from_value(body).map_err(|e| ClientError::Deserialize {
        context: context.to_string(),
        source: e,
    })
}
