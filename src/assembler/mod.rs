mod markers;
mod program;

pub use markers::{print_statement, CLOSE_MARKER, OPEN_MARKER};
pub use program::{assemble, ProgramImage};
