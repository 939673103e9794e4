use std::io;
use std::path::PathBuf;

/// Failures raised by the toolchain adapter.
#[derive(Debug, thiserror::Error)]
pub enum ToolchainError {
    /// The Go environment is missing or misconfigured (binary not found,
    /// GOPATH lookup failed, gopls refused to run).
    #[error("{0}")]
    Environment(String),

    #[error("toolchain I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ToolchainError {
    pub fn environment(msg: impl Into<String>) -> Self {
        ToolchainError::Environment(msg.into())
    }
}

/// Failures of one submission after it passed the pre-check.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("{source}\nMake sure the directory exists and you have permission to write there")]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Toolchain(#[from] ToolchainError),
}
