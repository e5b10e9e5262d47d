//! Delivery of contact form submissions.
//!
//! The form controller only knows the [`ContactSubmitter`] trait; this module
//! provides an HTTP implementation and a dry-run one for offline use.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

use crate::form::FormValues;

/// Errors raised while delivering a submission.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// Free-form failure reported by a collaborator.
    #[error("{0}")]
    Failed(String),

    #[error("Contact endpoint returned {status}: {message}")]
    Rejected { status: u16, message: String },

    #[error("Could not reach the contact endpoint: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Asynchronous operation that delivers form values somewhere.
#[async_trait]
pub trait ContactSubmitter: Send + Sync {
    async fn submit(&self, values: &FormValues) -> Result<(), SubmitError>;
}

/// JSON body posted to the contact endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ContactPayload<'a> {
    #[serde(flatten)]
    values: &'a FormValues,
    submitted_at: String,
}

/// Posts submissions as JSON to an HTTP endpoint.
pub struct HttpSubmitter {
    client: Client,
    endpoint: String,
}

impl HttpSubmitter {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, SubmitError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl ContactSubmitter for HttpSubmitter {
    async fn submit(&self, values: &FormValues) -> Result<(), SubmitError> {
        let payload = ContactPayload {
            values,
            submitted_at: chrono::Utc::now().to_rfc3339(),
        };

        tracing::debug!(endpoint = %self.endpoint, fields = values.len(), "Posting contact form");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            tracing::error!(status = %status, error = %message, "Contact endpoint rejected submission");
            return Err(SubmitError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(status = %status, "Contact form delivered");
        Ok(())
    }
}

/// Accepts every submission without sending it anywhere.
#[derive(Debug, Default)]
pub struct DryRunSubmitter;

#[async_trait]
impl ContactSubmitter for DryRunSubmitter {
    async fn submit(&self, values: &FormValues) -> Result<(), SubmitError> {
        tracing::info!(
            email = values.get("email").map(String::as_str).unwrap_or(""),
            subject = values.get("subject").map(String::as_str).unwrap_or(""),
            "Dry run: contact form not sent"
        );
        Ok(())
    }
}
