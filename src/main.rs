use rosetta_asserter::{api::Server, config::Config};
use std::sync::Arc;
use tracing::{error, info};

/// The main entry point for the validation service.
///
/// Initializes logging, loads the configuration, builds the asserter it
/// describes and serves it over JSON-RPC.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load("config/default.toml")?;
    info!("Asserter service starting with config: {:?}", config);

    let asserter = match config.asserter.build() {
        Ok(asserter) => Arc::new(asserter),
        Err(e) => {
            error!("Invalid asserter configuration: {}", e);
            return Err(e.into());
        }
    };

    let server = Server::new(config, asserter);
    server.start().await?;

    Ok(())
}
