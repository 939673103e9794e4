//! Execution backend for Go notebooks.
//!
//! Each submitted cell is merged with the cells seen before it into one
//! Go program. The program is run, and only the output of the submitted
//! cell is returned.

pub mod assembler;
pub mod cell;
pub mod config;
pub mod error;
pub mod executor;
pub mod kernel;
pub mod server;
pub mod source;
pub mod toolchain;

pub use cell::{Cell, CellStore, Fragment};
pub use config::{KernelConfig, ToolchainConfig};
pub use error::{KernelError, ToolchainError};
pub use kernel::{Kernel, Outcome, Reply};
