use cfn_notify::{clients::webhook::WebhookClient, config::Config, utils::process_event};
use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .init();

    let config = Config::load()?;
    let webhook_client = WebhookClient::new(&config)?;

    info!("Configuration validated. Waiting for events.");

    let config = &config;
    let webhook_client = &webhook_client;

    run(service_fn(move |event: LambdaEvent<Value>| async move {
        handle_event(event, config, webhook_client).await
    }))
    .await
}

async fn handle_event(
    event: LambdaEvent<Value>,
    config: &Config,
    webhook_client: &WebhookClient,
) -> Result<(), Error> {
    let (payload, context) = event.into_parts();
    let mut rng = StdRng::from_os_rng();

    let outcome = process_event(payload, config, webhook_client, &mut rng).await?;

    info!(request_id = %context.request_id, outcome = ?outcome, "Invocation finished");

    Ok(())
}
