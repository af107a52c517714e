//! Time Adam fitting a logistic model to `X.txt` / `y.txt`.
//!
//! Usage: `cargo run --release --example logistic_performance [data_dir] [config.json]`

use std::path::PathBuf;

use stepbench::{
    Adam, AutodiffBackend, HarnessConfig, IterativeOptimizationHarness, LogisticDataset,
    LogisticRegression, Objective, ParameterState,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = std::env::args().skip(1);
    let data_dir = PathBuf::from(args.next().unwrap_or_else(|| ".".into()));
    let config = match args.next() {
        Some(path) => HarnessConfig::from_path(path)?,
        None => HarnessConfig::logistic(),
    };

    let data = LogisticDataset::read(data_dir.join("X.txt"), data_dir.join("y.txt"))?;
    let objective = LogisticRegression::from_dataset(data);
    let w0 = ParameterState::zeros(objective.n_features());
    let initial_loss = objective.value(w0.as_slice());

    let mut backend = AutodiffBackend::new(Adam::with_schedule(config.learning_rate_schedule));
    let report =
        IterativeOptimizationHarness::from_config(&config).run(&objective, w0, &mut backend)?;

    info!(
        initial_loss,
        final_loss = objective.value(report.state.as_slice()),
        accuracy = objective.accuracy(report.state.as_slice()),
        "fit finished"
    );
    println!("{}", report.state);
    println!("{}s", report.elapsed_secs());
    Ok(())
}
