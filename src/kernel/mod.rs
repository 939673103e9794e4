mod phase;
mod reply;
mod session;

pub use phase::Phase;
pub use reply::{Outcome, Reply};
pub use session::Kernel;
