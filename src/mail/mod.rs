pub mod dispatcher;
pub mod templates;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::email::MailMessage;

pub use dispatcher::HttpMailDispatcher;

/// Any failure to hand a message to the provider. Auth, transport and
/// provider rejections all land here without further classification.
#[derive(Debug, Error)]
#[error("mail dispatch failed: {reason}")]
pub struct MailError {
    reason: String,
}

impl MailError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        MailError::new(err.to_string())
    }
}

#[async_trait]
pub trait MailDispatcher: Send + Sync {
    /// Sends one message and waits for the provider to acknowledge it.
    async fn send(&self, message: &MailMessage) -> Result<(), MailError>;
}
