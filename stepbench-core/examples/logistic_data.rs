//! Write a synthetic classification problem as `X.txt` / `y.txt`.
//!
//! Usage: `cargo run --example logistic_data [out_dir] [config.json]`

use std::path::PathBuf;

use stepbench::{HarnessConfig, LogisticDataset};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".into()));
    let config = match args.next() {
        Some(path) => HarnessConfig::from_path(path)?,
        None => HarnessConfig::logistic(),
    };

    let data = LogisticDataset::generate(config.n_samples, config.n_features, config.seed);
    std::fs::create_dir_all(&out_dir)?;
    data.write(out_dir.join("X.txt"), out_dir.join("y.txt"))?;
    Ok(())
}
