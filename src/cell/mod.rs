mod store;
mod types;

pub use store::CellStore;
pub use types::{Cell, Fragment};
