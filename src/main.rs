//! Invoicer server binary
//!
//! Usage: `invoicer [config.yaml]`. Without an argument the file named by
//! `INVOICER_CONFIG` is used, and without either the built-in defaults.

use anyhow::Result;
use invoicer::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load(std::env::args().nth(1))?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    tracing::info!(
        data_dir = %config.data_dir,
        static_dir = %config.static_dir,
        "starting invoicer v{}",
        env!("CARGO_PKG_VERSION")
    );

    let ledger = Ledger::open(
        JsonFileStorage::new(&config.data_dir),
        config.default_settings(),
    );

    ServerBuilder::new()
        .with_ledger(ledger)
        .with_static_dir(&config.static_dir)
        .serve(&config.bind_addr)
        .await
}
