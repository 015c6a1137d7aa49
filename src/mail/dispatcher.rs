use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use crate::config::{ConfigError, MailConfig};
use crate::mail::{MailDispatcher, MailError};
use crate::models::email::MailMessage;

const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Sends mail through a Mailgun-compatible HTTP API:
/// `POST {base}/v3/{account}/messages`, basic auth `api:{token}`, form body.
pub struct HttpMailDispatcher {
    client: Client,
    endpoint: Url,
    api_token: String,
}

impl HttpMailDispatcher {
    pub fn from_config(config: &MailConfig) -> Result<Self, ConfigError> {
        let mut base = config.api_base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let endpoint = base
            .join(&format!("v3/{}/messages", config.account_id))
            .map_err(|e| ConfigError::Invalid {
                key: "MAIL_ACCOUNT_ID",
                reason: e.to_string(),
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            endpoint,
            api_token: config.api_token.clone(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl MailDispatcher for HttpMailDispatcher {
    async fn send(&self, message: &MailMessage) -> Result<(), MailError> {
        let mut form: Vec<(&str, &str)> = vec![
            ("from", message.sender.as_str()),
            ("to", message.recipient.as_str()),
            ("subject", message.subject.as_str()),
            ("text", message.text.as_str()),
        ];
        if let Some(reply_to) = &message.reply_to {
            form.push(("h:Reply-To", reply_to.as_str()));
        }
        if let Some(html) = &message.html {
            form.push(("html", html.as_str()));
        }

        let response = self
            .client
            .post(self.endpoint.clone())
            .basic_auth("api", Some(&self.api_token))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("provider accepted message for {}", message.recipient);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!("provider rejected message with status {}", status);
        Err(MailError::new(format!(
            "provider responded {}: {}",
            status,
            body.trim()
        )))
    }
}
