use crate::config::Config;
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use shared::{
    core::{Clock, OrderEvent, WebhookSender},
    message_card::build_message,
};

/// Event Grid / CloudEvents style envelope. Only `data` is interpreted, the
/// remaining attributes are kept for the diagnostic dump.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub(crate) struct EventEnvelope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

pub(crate) struct HandlerDeps<S: WebhookSender, C: Clock> {
    pub config: Config,
    pub sender: S,
    pub clock: C,
}

#[tracing::instrument(skip(deps, event), fields(request_id = %event.context.request_id))]
pub(crate) async fn function_handler<S: WebhookSender, C: Clock>(
    deps: &HandlerDeps<S, C>,
    event: LambdaEvent<EventEnvelope>,
) -> Result<(), Error> {
    tracing::info!("OrderCreated function triggered.");

    let webhook_url = deps.config.webhook_url()?;

    let envelope = event.payload;
    tracing::info!(
        "Event received: {}",
        serde_json::to_string_pretty(&envelope)?
    );

    let data = OrderEvent::from_data(envelope.data.as_ref());
    let message = build_message(&data, deps.clock.now());

    tracing::info!("Posting message to Teams channel...");
    if let Err(e) = deps.sender.send(webhook_url, &message).await {
        tracing::error!("Failed to post order {} to Teams: {}", data.order_id(), e);
        return Err(Box::new(e));
    }
    tracing::info!("Message posted successfully.");

    Ok(())
}
