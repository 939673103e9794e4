mod classifier;
mod precheck;

pub use classifier::{classify, CellKind};
pub use precheck::{precheck, Rejection, KERNEL_STATUS_PREFIX};
