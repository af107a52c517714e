//! Reverse-mode automatic differentiation on a flat tape.

mod tape;
mod var;

pub use tape::{Gradient, Tape};
pub use var::Var;

pub(crate) use var::{sigmoid, softplus};
