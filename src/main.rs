use tracing_subscriber::EnvFilter;

use waiter::config::Config;
use waiter::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load();
    tracing::info!("Serving files from {}", cfg.directory.display());

    tokio::select! {
        res = server::listener::run(&cfg.listen_addr, cfg.directory.clone()) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
