use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use endpoint_kit::endpoint::{self, Endpoint};
use endpoint_kit::host::ReqwestHttpClient;
use endpoint_kit::{logging, EndpointConfig, Host};

/// Run the sample integration endpoint over HTTP.
#[derive(Parser)]
#[command(name = "endpoint-kit", version)]
struct Args {
    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Listen address; overrides `server.bind`.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();
    logging::init("info")?;

    let mut config = EndpointConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    let bind = config.server.bind.clone();

    let host = Host::builder(config).http(ReqwestHttpClient::new()).build();
    let endpoint = Arc::new(Endpoint::with_samples(host));

    endpoint::serve(endpoint, &bind, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "could not listen for shutdown signal");
        }
    })
    .await?;
    Ok(())
}
