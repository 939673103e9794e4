use super::{ToolOutput, Toolchain};
use crate::config::ToolchainConfig;
use crate::error::ToolchainError;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

// sh exit code when the command itself could not be found.
const COMMAND_NOT_FOUND: i32 = 127;

/// Drives the local Go installation: `gopls imports`, `go run`, `go fmt`.
pub struct GoToolchain {
    config: ToolchainConfig,
}

impl GoToolchain {
    pub fn new(config: ToolchainConfig) -> Self {
        Self { config }
    }

    /// Locate gopls, asking `go env GOPATH` unless a path was configured.
    pub fn gopls_path(&self) -> Result<PathBuf, ToolchainError> {
        if let Some(path) = &self.config.gopls {
            return Ok(path.clone());
        }

        let out = Command::new(&self.config.go)
            .args(["env", "GOPATH"])
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                ToolchainError::environment(format!(
                    "cannot run `{} env GOPATH`: {}",
                    self.config.go, e
                ))
            })?;

        if !out.status.success() {
            return Err(ToolchainError::environment(format!(
                "`{} env GOPATH` failed: {}",
                self.config.go,
                String::from_utf8_lossy(&out.stderr).trim()
            )));
        }

        let gopath = String::from_utf8_lossy(&out.stdout).trim().to_string();
        if gopath.is_empty() {
            return Err(ToolchainError::environment("GOPATH is empty"));
        }

        // GOPATH may list several roots; gopls is installed under the first.
        let first = std::env::split_paths(&gopath)
            .next()
            .ok_or_else(|| ToolchainError::environment("GOPATH is empty"))?;
        Ok(first.join("bin").join("gopls"))
    }

    /// `<command...> <path> 2>&1`, quoted for `sh -c`.
    fn shell_line(command: &[String], path: &Path) -> Result<String, ToolchainError> {
        let path_str = path.to_str().ok_or_else(|| {
            ToolchainError::environment(format!(
                "program path is not valid UTF-8: {}",
                path.display()
            ))
        })?;

        let mut words: Vec<&str> = command.iter().map(String::as_str).collect();
        words.push(path_str);

        let joined = shlex::try_join(words)
            .map_err(|e| ToolchainError::environment(format!("cannot quote command: {}", e)))?;
        Ok(format!("{} 2>&1", joined))
    }

    /// Run through the shell so stdout and stderr share one pipe and keep
    /// their relative order.
    fn run_combined(&self, command: &[String], path: &Path) -> Result<ToolOutput, ToolchainError> {
        if command.is_empty() {
            return Err(ToolchainError::environment("empty toolchain command"));
        }

        let line = Self::shell_line(command, path)?;
        debug!(command = %line, "invoking toolchain");

        let out = Command::new("sh")
            .arg("-c")
            .arg(&line)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ToolchainError::environment(format!("cannot spawn sh: {}", e)))?;

        if out.status.code() == Some(COMMAND_NOT_FOUND) {
            let mut msg = String::from_utf8_lossy(&out.stdout).trim().to_string();
            let stderr = String::from_utf8_lossy(&out.stderr);
            if !stderr.trim().is_empty() {
                msg.push_str(stderr.trim());
            }
            return Err(ToolchainError::environment(format!(
                "`{}` not found: {}",
                command[0], msg
            )));
        }

        let mut output = out.stdout;
        output.extend_from_slice(&out.stderr);
        Ok(ToolOutput::from_status(out.status, output))
    }
}

impl Toolchain for GoToolchain {
    fn fix_imports(&self, path: &Path) -> Result<ToolOutput, ToolchainError> {
        let gopls = self.gopls_path()?;
        let out = Command::new(&gopls)
            .args(["imports", "-w"])
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                ToolchainError::environment(format!("cannot run {}: {}", gopls.display(), e))
            })?;

        let mut output = out.stdout;
        output.extend_from_slice(&out.stderr);
        Ok(ToolOutput::from_status(out.status, output))
    }

    fn run(&self, path: &Path) -> Result<ToolOutput, ToolchainError> {
        self.run_combined(&self.config.run_command, path)
    }

    fn format(&self, path: &Path) -> Result<(), ToolchainError> {
        let result = self.run_combined(&self.config.format_command, path)?;
        if result.success {
            Ok(())
        } else {
            Err(ToolchainError::environment(format!(
                "{}: {}",
                result.status,
                String::from_utf8_lossy(&result.output).trim()
            )))
        }
    }
}
