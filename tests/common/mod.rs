// Shared helpers: a scripted stand-in for the Go toolchain.

#![allow(dead_code)]

use gobook_kernel::error::ToolchainError;
use gobook_kernel::toolchain::{ToolOutput, Toolchain};
use gobook_kernel::{Cell, Kernel};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

/// Statement lines containing this fail to "compile".
pub const BROKEN: &str = "undefined_symbol";

/// Interprets the generated `main` line by line: `println("x")` prints
/// `x`, statements listed in `outputs` print their canned output, anything
/// mentioning [`BROKEN`] fails the run.
#[derive(Default)]
pub struct FakeToolchain {
    outputs: HashMap<String, String>,
    env_broken: AtomicBool,
    imports_rejected: AtomicBool,
    pub fixes: AtomicUsize,
    pub runs: AtomicUsize,
    pub formats: AtomicUsize,
    pub last_program: Mutex<String>,
}

impl FakeToolchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output(mut self, statement: &str, output: &str) -> Self {
        self.outputs.insert(statement.to_string(), output.to_string());
        self
    }

    pub fn break_environment(&self, broken: bool) {
        self.env_broken.store(broken, Ordering::SeqCst);
    }

    /// gopls runs but refuses the file, as it does on a syntax error.
    pub fn reject_imports(&self, rejected: bool) {
        self.imports_rejected.store(rejected, Ordering::SeqCst);
    }

    pub fn runs(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    pub fn formats(&self) -> usize {
        self.formats.load(Ordering::SeqCst)
    }

    pub fn last_program(&self) -> String {
        self.last_program.lock().unwrap().clone()
    }
}

impl Toolchain for FakeToolchain {
    fn fix_imports(&self, _path: &Path) -> Result<ToolOutput, ToolchainError> {
        self.fixes.fetch_add(1, Ordering::SeqCst);
        if self.env_broken.load(Ordering::SeqCst) {
            return Err(ToolchainError::environment("gopls: no such file or directory"));
        }
        if self.imports_rejected.load(Ordering::SeqCst) {
            return Ok(ToolOutput::failure(
                2,
                "main.go:7:1: expected statement, found '}'\n",
            ));
        }
        Ok(ToolOutput::success(Vec::new()))
    }

    fn run(&self, path: &Path) -> Result<ToolOutput, ToolchainError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if self.env_broken.load(Ordering::SeqCst) {
            return Err(ToolchainError::environment("go: command not found"));
        }

        let program = fs::read_to_string(path)?;
        *self.last_program.lock().unwrap() = program.clone();

        let body = program
            .split_once("func main() {")
            .map(|(_, body)| body)
            .unwrap_or("");

        let mut out = String::new();
        for line in body.lines() {
            let stmt = line.trim();
            if stmt.is_empty() || stmt == "}" {
                continue;
            }
            if stmt.contains(BROKEN) {
                return Ok(ToolOutput::failure(
                    1,
                    format!("# command-line-arguments\n./main.go: undefined: {}\n", BROKEN),
                ));
            }
            if let Some(text) = stmt
                .strip_prefix("println(\"")
                .and_then(|rest| rest.strip_suffix("\")"))
            {
                out.push_str(text);
                out.push('\n');
                continue;
            }
            if let Some(canned) = self.outputs.get(stmt) {
                out.push_str(canned);
            }
        }

        Ok(ToolOutput::success(out.into_bytes()))
    }

    fn format(&self, _path: &Path) -> Result<(), ToolchainError> {
        self.formats.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Kernel writing into a fresh temp dir. Keep the `TempDir` alive.
pub fn kernel_with(toolchain: Arc<FakeToolchain>) -> (Kernel, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let kernel = Kernel::new(dir.path().join("main.go"), toolchain);
    (kernel, dir)
}

pub fn cell(fragment: i64, position: i64, content: &str) -> Cell {
    Cell::new(fragment, position, content).with_document("test.md")
}
