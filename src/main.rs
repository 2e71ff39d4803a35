use tally::config::Config;
use tally::server;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    tracing::info!("Starting Tally {} on {}", tally::VERSION, config.address());

    let (_state, app) = server::build_app(&config)?;
    let (port, handle) = server::serve(app, &config.host, config.port).await?;

    tracing::info!("Listening on http://{}:{port}", config.host);

    handle.await?;
    Ok(())
}
