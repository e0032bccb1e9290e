//! HTTP client for delivering diagnostic submissions.
//!
//! Wraps a [`SubmissionPayload`] in an envelope carrying a fresh submission id
//! and timestamp, then POSTs it as JSON. Retries are left to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use diagnostic_client::DiagnosticClient;
//!
//! let client = DiagnosticClient::new("https://intake.example.org/diagnostics")
//!     .with_token(token)
//!     .with_timeout(Duration::from_secs(30))?;
//!
//! let receipt = client.submit(&payload).await?;
//! println!("submitted as {}", receipt.submission_id);
//! ```

use std::time::Duration;

use chrono::{DateTime, Utc};
use diagnostic::SubmissionPayload;
use reqwest::header;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Error type for submission delivery
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Submission rejected with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Body sent to the intake endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionEnvelope<'a> {
    pub submission_id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub diagnostic: &'a SubmissionPayload,
}

impl<'a> SubmissionEnvelope<'a> {
    pub fn new(diagnostic: &'a SubmissionPayload) -> Self {
        Self {
            submission_id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            diagnostic,
        }
    }

    pub fn receipt(&self) -> SubmissionReceipt {
        SubmissionReceipt {
            submission_id: self.submission_id,
            submitted_at: self.submitted_at,
        }
    }
}

/// What the caller learns about an accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub submission_id: Uuid,
    pub submitted_at: DateTime<Utc>,
}

/// Client for the diagnostic intake endpoint
#[derive(Clone)]
pub struct DiagnosticClient {
    client: reqwest::Client,
    endpoint: String,
    auth_token: Option<String>,
}

impl DiagnosticClient {
    /// Create a new client posting to `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            auth_token: None,
        }
    }

    /// Send a bearer token with every submission
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Rebuild the HTTP client with a request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, ClientError> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the payload wrapped in a [`SubmissionEnvelope`].
    pub async fn submit(&self, payload: &SubmissionPayload) -> Result<SubmissionReceipt, ClientError> {
        let envelope = SubmissionEnvelope::new(payload);
        let body = serde_json::to_vec(&envelope)?;

        debug!(
            submission_id = %envelope.submission_id,
            endpoint = %self.endpoint,
            bytes = body.len(),
            "Posting diagnostic submission"
        );

        let mut req = self
            .client
            .post(&self.endpoint)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body);

        if let Some(token) = &self.auth_token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = req.send().await.map_err(|e| {
            warn!(error = %e, "Diagnostic submission request failed");
            ClientError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Diagnostic submission rejected");
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        info!(submission_id = %envelope.submission_id, "Diagnostic submission accepted");
        Ok(envelope.receipt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagnostic::testing::{valid_answers, valid_environmental};
    use diagnostic::{EnvironmentalAnswer, FieldStore, Snapshot};

    fn payload() -> SubmissionPayload {
        let store = FieldStore::with_answers(valid_answers(), valid_environmental());
        SubmissionPayload::assemble(&Snapshot::new(store.answers(), store.environmental()))
    }

    #[test]
    fn envelope_wraps_payload_with_id_and_timestamp() {
        let payload = payload();
        let envelope = SubmissionEnvelope::new(&payload);

        let json = serde_json::to_value(&envelope).unwrap();

        let id = json["submissionId"].as_str().unwrap();
        assert_eq!(Uuid::parse_str(id).unwrap().get_version_num(), 4);

        let submitted_at = json["submittedAt"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(submitted_at).is_ok());

        assert_eq!(json["diagnostic"]["razonSocial"], "Curtiembres San Benito S.A.S");
        assert_eq!(json["diagnostic"]["environmentalManagementSystem"], "NO");
        assert!(json["diagnostic"]["attachedDocumentNames"].is_null());
        assert_eq!(payload.environmental_management_system, EnvironmentalAnswer::No);
    }

    #[test]
    fn every_envelope_gets_a_fresh_id() {
        let payload = payload();
        let first = SubmissionEnvelope::new(&payload);
        let second = SubmissionEnvelope::new(&payload);
        assert_ne!(first.submission_id, second.submission_id);
        assert_eq!(first.receipt().submission_id, first.submission_id);
    }

    #[test]
    fn status_error_names_code_and_body() {
        let err = ClientError::Status {
            status: 422,
            body: "missing correo".into(),
        };
        assert_eq!(
            err.to_string(),
            "Submission rejected with status 422: missing correo"
        );
    }

    #[test]
    fn builder_keeps_endpoint_and_token() {
        let client = DiagnosticClient::new("http://localhost:8080/diagnostics")
            .with_token("secret")
            .with_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080/diagnostics");
        assert_eq!(client.auth_token.as_deref(), Some("secret"));
    }

    #[tokio::test]
    async fn malformed_endpoint_surfaces_as_network_error() {
        let client = DiagnosticClient::new("not a url");
        let result = client.submit(&payload()).await;
        assert!(matches!(result, Err(ClientError::Network(_))));
    }
}
