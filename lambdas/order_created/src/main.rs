use crate::config::Config;
use crate::event_handler::HandlerDeps;
use event_handler::function_handler;
use lambda_runtime::{run, service_fn, tracing, Error};
use shared::adapters::TeamsWebhookSender;
use shared::core::SystemClock;

mod config;
mod event_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let config = Config::load()?;
    let http_client = shared::Client::builder().build()?;
    let deps = HandlerDeps {
        config,
        sender: TeamsWebhookSender::new(http_client),
        clock: SystemClock,
    };

    run(service_fn(|event| function_handler(&deps, event))).await
}
