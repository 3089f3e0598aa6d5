mod bot;
mod commands;
mod components;
mod config;
mod events;
mod handlers;
mod utils;

#[cfg(test)]
mod tests;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(e) = bot::init::start_bot().await {
        tracing::error!("[INIT] {:#}", e);
        return Err(e);
    }

    Ok(())
}
