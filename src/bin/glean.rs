//! CLI front end: fetch one URL, extract, persist, and print the report.
//!
//! Usage: `glean <url>`
//!
//! Configuration comes from `GLEAN_*` environment variables (see
//! `article_glean::Config`); logging verbosity from `RUST_LOG`.

use anyhow::{bail, Result};
use article_glean::{Config, Pipeline};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = env::args().skip(1);
    let Some(url) = args.next() else {
        bail!("usage: glean <url>");
    };

    let config = Config::from_env();
    let snapshot_path = config.snapshot_path.clone();
    let pipeline = Pipeline::new(config).await?;

    let report = pipeline.process(&url).await;
    print!("{}", report.render_text());
    eprintln!("Snapshot written to {snapshot_path}");

    Ok(())
}
