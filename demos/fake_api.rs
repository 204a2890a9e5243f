//! Run the in-memory order API
//!
//! ```sh
//! cargo run --example fake_api -- [config.yaml]
//! ```

use order_client::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args().nth(1);
    let config = AppConfig::load(path.as_deref())?;

    FakeApiServer::new(config.fake_api).serve().await
}
