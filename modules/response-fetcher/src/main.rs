use anyhow::Result;
use tracing_subscriber::EnvFilter;

use response_fetcher::{FetcherConfig, ResponseFetcher, StdoutOutput};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs on stderr; stdout carries only the rendered response.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("response_fetcher=info".parse()?),
        )
        .init();

    let config = FetcherConfig::from_env()?;
    let fetcher = ResponseFetcher::new(&config);
    tracing::info!(endpoint = fetcher.endpoint(), "Calling backend");

    let outcome = fetcher.call_backend(&StdoutOutput).await;
    if !outcome.is_success() {
        std::process::exit(1);
    }

    Ok(())
}
