use stepbench::{
    Adam, AnalyticBackend, AutodiffBackend, HarnessConfig, IterationContract,
    IterativeOptimizationHarness, LearningRateSchedule, Objective, ParameterState, Rosenbrock,
};

fn converging_adam() -> Adam {
    Adam::with_schedule(LearningRateSchedule::Exponential {
        initial: 0.3,
        gamma: 0.9998,
    })
}

#[test]
fn adam_reaches_minimum_from_far_start() {
    let f = Rosenbrock::default();
    for contract in [IterationContract::Exact, IterationContract::SkipFirstIndex] {
        let mut backend = AutodiffBackend::new(converging_adam());
        let report = IterativeOptimizationHarness::new(20_000)
            .contract(contract)
            .run(&f, vec![-10.0, 10.0].into(), &mut backend)
            .unwrap();

        let [x, y] = [report.state[0], report.state[1]];
        assert!((x - 1.0).abs() < 1e-2, "{contract:?}: x = {x}");
        assert!((y - 1.0).abs() < 1e-2, "{contract:?}: y = {y}");
        assert!(f.value(report.state.as_slice()) < 1e-3);
    }
}

#[test]
fn default_step_size_only_makes_progress() {
    // lr = 1e-3 moves each coordinate by about 1e-3 per update, far too
    // little to cross from (-10, 10) to (1, 1) in the default budget.
    let f = Rosenbrock::default();
    let config = HarnessConfig::rosenbrock();
    let mut backend = AutodiffBackend::new(Adam::with_schedule(config.learning_rate_schedule));
    let x0 = ParameterState::new(vec![-10.0, 10.0]);
    let f0 = f.value(x0.as_slice());

    let report = IterativeOptimizationHarness::from_config(&config)
        .run(&f, x0, &mut backend)
        .unwrap();

    assert_eq!(report.updates, 10_000);
    assert!(f.value(report.state.as_slice()) < f0);
    assert!(report.state[0] > -10.0);
}

#[test]
fn autodiff_and_analytic_backends_agree() {
    let f = Rosenbrock::default();
    let harness = IterativeOptimizationHarness::new(500);

    let mut tape = AutodiffBackend::new(Adam::new(0.05));
    let mut analytic = AnalyticBackend::new(Adam::new(0.05));
    let a = harness.run(&f, vec![-1.2, 1.0].into(), &mut tape).unwrap();
    let b = harness.run(&f, vec![-1.2, 1.0].into(), &mut analytic).unwrap();

    for i in 0..2 {
        assert!(
            (a.state[i] - b.state[i]).abs() < 1e-6,
            "coordinate {i}: {} vs {}",
            a.state[i],
            b.state[i]
        );
    }
}
