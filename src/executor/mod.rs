mod extract;
mod runner;

pub use extract::{extract, Extracted};
pub use runner::{Execution, Executor};
