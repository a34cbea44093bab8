#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("TEAMS_WEBHOOK_URL environment variable is not set.")]
    MissingWebhookUrl,
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("Invalid Teams webhook URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Cannot serialize Teams message: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Teams webhook request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Teams webhook responded with status {status}: {body}")]
    Status { status: u16, body: String },
}

impl DeliveryError {
    /// Status code returned by the webhook, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            DeliveryError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
