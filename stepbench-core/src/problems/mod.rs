pub mod logistic;
pub mod objective;
pub mod test_functions;

pub use logistic::{LogisticRegression, Reduction};
pub use objective::{AnalyticObjective, Objective};
pub use test_functions::{Quadratic, Rosenbrock};
