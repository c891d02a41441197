//! Transactional-email collaborator.
//!
//! The engine only assembles the update payload and hands it to a
//! [`Notifier`]; delivery status beyond success/failure is never
//! inspected here.

#![warn(missing_docs)]

use async_trait::async_trait;
use pacer_core::{Goal, UserProfile};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Result type for notification operations.
pub type Result<T> = std::result::Result<T, NotifyError>;

/// Errors surfaced by the email collaborator.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Transport-level failure
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The delivery endpoint rejected the payload
    #[error("delivery rejected with status {status}")]
    Rejected {
        /// HTTP status returned by the endpoint
        status: u16,
    },
}

/// Update-email payload, camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPayload {
    /// Recipient address
    pub email: String,

    /// Recipient display name
    pub username: String,

    /// Title of the goal the update is about
    pub goal_title: String,

    /// Motivational message body
    pub message: String,

    /// Goal progress, 0-100
    pub progress_percent: u8,
}

impl EmailPayload {
    /// Assemble the daily-update payload for a goal.
    pub fn for_goal(
        profile: &UserProfile,
        goal: &Goal,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            username: profile.name.clone(),
            goal_title: goal.title.clone(),
            message: message.into(),
            progress_percent: goal.progress,
        }
    }
}

/// Delivery abstraction for update emails.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one update email.
    async fn send_update(&self, payload: &EmailPayload) -> Result<()>;
}

/// HTTP notifier posting the payload as JSON to a delivery endpoint.
pub struct HttpNotifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpNotifier {
    /// Create a notifier for the given endpoint and bearer key.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Notifier for HttpNotifier {
    async fn send_update(&self, payload: &EmailPayload) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
            });
        }
        info!("update email sent to {}", payload.email);
        Ok(())
    }
}
