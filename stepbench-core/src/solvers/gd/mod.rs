mod types;
mod update;

pub use types::GradientDescent;
