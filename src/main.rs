//! Option Chains fetcher
//!
//! Fetches one option chain snapshot and prints it as JSON.

use chains_client::{Client, Context};
use option_chains::config::Config;
use option_chains::summary::ChainSummary;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for the chain itself
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    let query = config.query.to_query();
    let client = Client::new(config.api.client_config())?;

    info!(
        "Fetching option chains for {} from {}",
        query.symbol,
        client.base_url()
    );

    // Ctrl-C aborts the request in flight
    let (ctx, cancel) = Context::with_cancel();
    let ctx = ctx.with_timeout(config.api.timeout());
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling request");
            cancel.cancel();
        }
    });

    let (chains, response) = client.chains().get_chains(&ctx, &query).await?;
    info!(status = response.status, "{}", ChainSummary::from_chains(&chains));

    println!("{}", serde_json::to_string_pretty(&chains)?);

    Ok(())
}
