//! Chorewheel binary: one run of the weekly chore automation.
//!
//! Takes no arguments. Exit code 0 means the run completed (even with
//! per-record failures); 1 means missing configuration or a fatal fetch
//! error.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use chorewheel::{Config, NotionClient, NotionConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go through tracing; user-facing lines use println.
    // Override with RUST_LOG=debug to see request-level detail.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chorewheel=info")),
        )
        .init();

    println!("Starting chores automation...");

    let config = Config::from_env()?;
    let client = NotionClient::new(NotionConfig::new(config.token.clone()))
        .context("failed to build Notion client")?;

    let today = chrono::Local::now().date_naive();
    chorewheel::run(&client, &config, today)
        .await
        .context("chore run failed")?;

    Ok(())
}
