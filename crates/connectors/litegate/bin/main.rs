use std::env;
use std::error::Error;
use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use litegate::routes::create_router;
use litegate::state::create_state;
use litegate_configuration as configuration;

#[derive(Parser)]
struct ServerOptions {
    /// Directory holding configuration.json.
    #[arg(long, value_name = "CONFIGURATION_DIR", default_value = ".")]
    configuration_dir: String,
    /// Port to listen on. The PORT environment variable takes precedence.
    #[arg(long, default_value = "9999")]
    port: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let server_options = ServerOptions::parse();

    let parsed = configuration::parse_configuration(&server_options.configuration_dir).await?;
    let runtime = configuration::make_runtime_configuration(parsed)?;
    let state = create_state(runtime)?;

    let router = create_router(state);

    // allow the server port to be set via the PORT env var
    let port = env::var("PORT").unwrap_or(server_options.port);
    let address: SocketAddr = format!("0.0.0.0:{port}").parse()?;

    tracing::info!("Starting server on {address}");

    axum::Server::bind(&address)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}
