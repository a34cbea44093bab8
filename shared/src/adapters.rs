use crate::{core::WebhookSender, error::DeliveryError, message_card::MessageCard};
use async_trait::async_trait;
use reqwest::{
    header::{CONTENT_LENGTH, CONTENT_TYPE},
    Client, Url,
};

#[derive(Debug, Clone)]
pub struct TeamsWebhookSender {
    http_client: Client,
}

impl TeamsWebhookSender {
    pub fn new(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl WebhookSender for TeamsWebhookSender {
    async fn send(&self, url: &str, payload: &MessageCard) -> Result<(), DeliveryError> {
        let url = Url::parse(url).map_err(|e| DeliveryError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(DeliveryError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let body = serde_json::to_vec(payload)?;
        tracing::debug!(
            "Posting {} byte message card to {}",
            body.len(),
            url.host_str().unwrap_or_default()
        );

        let response = self
            .http_client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, body.len())
            .body(body)
            .send()
            .await
            .map_err(DeliveryError::Transport)?;

        let status = response.status();
        let response_body = response.text().await.map_err(DeliveryError::Transport)?;

        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Status {
                status: status.as_u16(),
                body: response_body,
            })
        }
    }
}
