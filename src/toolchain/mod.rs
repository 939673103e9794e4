mod go;

pub use go::GoToolchain;

use crate::error::ToolchainError;
use std::path::Path;
use std::process::ExitStatus;

/// Result of a tool that ran to completion, successfully or not.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Combined stdout and stderr, in the order the tool wrote them.
    pub output: Vec<u8>,
    pub success: bool,
    /// Human-readable exit description, e.g. `exit status 2`.
    pub status: String,
}

impl ToolOutput {
    pub fn success(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            success: true,
            status: "exit status 0".to_string(),
        }
    }

    pub fn failure(code: i32, output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: output.into(),
            success: false,
            status: format!("exit status {}", code),
        }
    }

    pub fn from_status(status: ExitStatus, output: Vec<u8>) -> Self {
        let description = match status.code() {
            Some(code) => format!("exit status {}", code),
            None => status.to_string(),
        };
        Self {
            output,
            success: status.success(),
            status: description,
        }
    }
}

/// The language toolchain the kernel drives.
///
/// `Err` means the environment is broken and the user's cell is not to
/// blame. A tool that ran and rejected the program returns `Ok` with
/// `success == false`.
pub trait Toolchain: Send + Sync {
    /// Add missing imports and drop unused ones, rewriting the file in place.
    fn fix_imports(&self, path: &Path) -> Result<ToolOutput, ToolchainError>;

    /// Build and run the program.
    fn run(&self, path: &Path) -> Result<ToolOutput, ToolchainError>;

    /// Reformat the file for human readers. Best effort.
    fn format(&self, path: &Path) -> Result<(), ToolchainError>;
}
