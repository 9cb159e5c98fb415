//! Delivery of lead payloads to the remote intake endpoint.

use crate::model::LeadPayload;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Lead endpoint answered with status {0}")]
    Status(u16),

    #[error("Lead endpoint unreachable: {0}")]
    Network(String),
}

/// Something that can deliver a lead.
#[allow(async_fn_in_trait)]
pub trait LeadTransport {
    async fn send(&self, payload: &LeadPayload) -> Result<(), SubmitError>;
}

/// Posts the payload as JSON to a fixed endpoint.
///
/// One attempt per call: no retry, no timeout, no authentication.
#[derive(Clone)]
pub struct HttpTransport {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(endpoint: &str) -> Result<Self, SubmitError> {
        // reqwest is built without a bundled TLS provider; an earlier install wins
        let _ = rustls::crypto::ring::default_provider().install_default();

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
        })
    }
}

impl LeadTransport for HttpTransport {
    async fn send(&self, payload: &LeadPayload) -> Result<(), SubmitError> {
        tracing::debug!(endpoint = %self.endpoint, lead_type = %payload.lead_type, "Posting lead");

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(status = status.as_u16(), "Lead accepted");
            Ok(())
        } else {
            tracing::warn!(status = status.as_u16(), "Lead rejected");
            Err(SubmitError::Status(status.as_u16()))
        }
    }
}
