//! Numeric tables on disk and synthetic datasets.

pub mod synth;
pub mod table;

pub use synth::{binarize_at_median, make_regression, LogisticDataset};
pub use table::{read_vector, write_vector, Table};
