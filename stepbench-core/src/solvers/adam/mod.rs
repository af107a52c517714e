mod types;
mod update;

pub use types::Adam;
