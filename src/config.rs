use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_LISTEN: &str = "127.0.0.1:5250";
pub const DEFAULT_PROGRAM_FILE: &str = "main.go";

/// How the Go tools are invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainConfig {
    /// `go` binary used for `go env GOPATH`.
    pub go: String,
    /// Explicit gopls path; looked up under `$GOPATH/bin` when unset.
    pub gopls: Option<PathBuf>,
    /// Command line the program path is appended to for a run.
    pub run_command: Vec<String>,
    /// Command line the program path is appended to for formatting.
    pub format_command: Vec<String>,
}

impl Default for ToolchainConfig {
    fn default() -> Self {
        Self {
            go: "go".to_string(),
            gopls: None,
            run_command: vec!["go".to_string(), "run".to_string()],
            format_command: vec!["go".to_string(), "fmt".to_string()],
        }
    }
}

impl ToolchainConfig {
    /// Parse a shell-style command line such as `"go run -race"`.
    pub fn parse_command(line: &str) -> Option<Vec<String>> {
        match shlex::split(line) {
            Some(parts) if !parts.is_empty() => Some(parts),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    pub listen: SocketAddr,
    /// Stable location of the generated program, kept for inspection.
    pub program_path: PathBuf,
    pub toolchain: ToolchainConfig,
}

pub fn default_program_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_PROGRAM_FILE)
}
