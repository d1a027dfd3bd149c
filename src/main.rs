//! Prints the current Hacker News top stories as Alfred script filter JSON.
//!
//! Logs go to stderr; stdout carries only the JSON document. Any failure exits
//! non-zero without printing JSON.

use hn_hot::{AlfredOutput, Config, HotFetcher};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run() -> hn_hot::Result<AlfredOutput> {
    let fetcher = HotFetcher::new(Config::default())?;
    fetcher.run().await
}

#[tokio::main]
async fn main() -> hn_hot::Result<()> {
    init_tracing();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting hn hot fetcher");

    let output = run()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "fetch failed"))?;

    println!("{}", output.to_json()?);
    Ok(())
}
