//! Time Adam on Rosenbrock from (-10, 10).
//!
//! Usage: `cargo run --release --example rosenbrock_performance [config.json]`

use stepbench::{
    Adam, AutodiffBackend, HarnessConfig, IterativeOptimizationHarness, ParameterState, Rosenbrock,
};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => HarnessConfig::from_path(path)?,
        None => HarnessConfig::rosenbrock(),
    };

    let objective = Rosenbrock::default();
    let mut backend = AutodiffBackend::new(Adam::with_schedule(config.learning_rate_schedule));
    let report = IterativeOptimizationHarness::from_config(&config).run(
        &objective,
        ParameterState::new(vec![-10.0, 10.0]),
        &mut backend,
    )?;

    println!("{}", report.state);
    println!("{}s", report.elapsed_secs());
    Ok(())
}
