use std::time::Duration;

use log::{debug, error};
use reqwest::blocking::Client;
use serde::Serialize;

use crate::core::config::Config;
use crate::error::Result;

use super::embed::Embed;

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Wire shape of a webhook POST body.
#[derive(Debug, Serialize)]
pub struct WebhookPayload<'a> {
    pub username: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<&'a str>,
    pub embeds: Vec<&'a Embed>,
}

/// Best-effort blocking webhook transport. Failures are logged and dropped;
/// there is no retry or queuing.
pub struct WebhookNotifier {
    client: Client,
    webhook_url: String,
    username: String,
    avatar_url: Option<String>,
}

impl WebhookNotifier {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(DELIVERY_TIMEOUT).build()?;
        Ok(WebhookNotifier {
            client,
            webhook_url: config.webhook_url.clone(),
            username: config.username.clone(),
            avatar_url: config.avatar_url.clone(),
        })
    }

    /// Build the POST body for one embed.
    pub fn payload<'a>(&'a self, embed: &'a Embed) -> WebhookPayload<'a> {
        WebhookPayload {
            username: &self.username,
            avatar_url: self.avatar_url.as_deref(),
            embeds: vec![embed],
        }
    }

    /// Deliver one embed. Any network error or HTTP status >= 400 is a
    /// logged delivery failure; the cycle continues either way.
    pub fn deliver(&self, embed: &Embed) {
        let payload = self.payload(embed);
        debug!(
            "Webhook payload: {}",
            serde_json::to_string(&payload).unwrap_or_default()
        );

        match self.client.post(&self.webhook_url).json(&payload).send() {
            Err(err) => error!("Failed to send webhook: {err}"),
            Ok(response) if response.status().as_u16() >= 400 => {
                let status = response.status();
                let body = response.text().unwrap_or_default();
                error!("Webhook rejected message with status {status}: {body}");
            }
            Ok(_) => {}
        }
    }
}
