use super::extract::{extract, Extracted};
use crate::cell::{CellStore, Fragment};
use crate::error::ToolchainError;
use crate::toolchain::{ToolOutput, Toolchain};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// How one run of the assembled program ended.
#[derive(Debug)]
pub enum Execution {
    /// The program ran; holds the executing cell's share of the output.
    Completed(Extracted),
    /// The toolchain rejected the program or it exited non-zero. The
    /// executing cell's content has been cleared.
    Failed(ToolOutput),
    /// The toolchain could not be used at all. Cell state is untouched.
    Environment(ToolchainError),
}

/// Runs the persisted program through a [`Toolchain`].
pub struct Executor {
    toolchain: Arc<dyn Toolchain>,
    background: Option<JoinHandle<()>>,
}

impl Executor {
    pub fn new(toolchain: Arc<dyn Toolchain>) -> Self {
        Self {
            toolchain,
            background: None,
        }
    }

    /// Fix imports, run, and slice out the executing cell's output.
    ///
    /// A cell that breaks the build or the run is wiped from `store` so the
    /// next submission assembles without it.
    pub fn execute(&mut self, path: &Path, fragment: Fragment, store: &mut CellStore) -> Execution {
        match self.toolchain.fix_imports(path) {
            Err(e) => {
                warn!(error = %e, "import fixing unavailable");
                return Execution::Environment(e);
            }
            Ok(out) if !out.success => {
                info!(fragment, status = %out.status, "imports rejected, clearing cell");
                store.clear_content(fragment);
                return Execution::Failed(out);
            }
            Ok(_) => {}
        }

        let result = self.toolchain.run(path);
        self.dispatch_format(path);

        match result {
            Err(e) => {
                warn!(error = %e, "run unavailable");
                Execution::Environment(e)
            }
            Ok(out) if !out.success => {
                info!(fragment, status = %out.status, "run failed, clearing cell");
                store.clear_content(fragment);
                Execution::Failed(out)
            }
            Ok(out) => {
                let extracted = extract(&out.output);
                debug!(
                    fragment,
                    found = extracted.found,
                    bytes = extracted.bytes.len(),
                    "run completed"
                );
                Execution::Completed(extracted)
            }
        }
    }

    /// Reformat the file on a helper thread; failures only reach the log.
    fn dispatch_format(&mut self, path: &Path) {
        self.wait_for_background();

        let toolchain = Arc::clone(&self.toolchain);
        let path: PathBuf = path.to_path_buf();
        let spawned = thread::Builder::new()
            .name("gobook-format".to_string())
            .spawn(move || {
                if let Err(e) = toolchain.format(&path) {
                    warn!(error = %e, path = %path.display(), "formatting failed");
                }
            });

        match spawned {
            Ok(handle) => self.background = Some(handle),
            Err(e) => warn!(error = %e, "cannot spawn format thread"),
        }
    }

    /// Block until the last background format has finished.
    pub fn wait_for_background(&mut self) {
        if let Some(handle) = self.background.take() {
            if handle.join().is_err() {
                warn!("format thread panicked");
            }
        }
    }
}
