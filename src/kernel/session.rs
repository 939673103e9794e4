use super::phase::Phase;
use super::reply::Reply;
use crate::assembler::{assemble, ProgramImage};
use crate::cell::{Cell, CellStore};
use crate::config::KernelConfig;
use crate::error::KernelError;
use crate::executor::{Execution, Executor};
use crate::source::precheck;
use crate::toolchain::{GoToolchain, Toolchain};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Notebook kernel state: the cells of one document and the program file.
///
/// Callers must feed submissions one at a time.
pub struct Kernel {
    store: CellStore,
    executor: Executor,
    program_path: PathBuf,
    last_document: String,
    phase: Phase,
}

impl Kernel {
    pub fn new(program_path: impl Into<PathBuf>, toolchain: Arc<dyn Toolchain>) -> Self {
        Self {
            store: CellStore::new(),
            executor: Executor::new(toolchain),
            program_path: program_path.into(),
            last_document: String::new(),
            phase: Phase::Idle,
        }
    }

    pub fn from_config(config: &KernelConfig) -> Self {
        let toolchain = GoToolchain::new(config.toolchain.clone());
        Self::new(config.program_path.clone(), Arc::new(toolchain))
    }

    pub fn store(&self) -> &CellStore {
        &self.store
    }

    pub fn program_path(&self) -> &Path {
        &self.program_path
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn set_phase(&mut self, phase: Phase) {
        trace!(from = %self.phase, to = %phase, "phase");
        self.phase = phase;
    }

    /// Decode a raw request body and submit it.
    pub fn handle(&mut self, body: &[u8]) -> Reply {
        self.submit(Cell::decode(body))
    }

    /// Run one cell and return the output it produced.
    pub fn submit(&mut self, mut cell: Cell) -> Reply {
        // The formatter of the previous run may still be rewriting the file.
        self.executor.wait_for_background();

        self.switch_document(&cell.document);

        if let Err(rejection) = precheck(&cell.content) {
            info!(fragment = cell.fragment, %rejection, "cell rejected");
            return Reply::rejected(rejection);
        }

        self.set_phase(Phase::Classifying);
        let fragment = cell.fragment;
        self.store.clear_executing();
        cell.executing = true;
        self.store.put(cell);

        self.set_phase(Phase::Assembling);
        let image = assemble(&mut self.store, fragment);
        debug!(
            fragment,
            cells = self.store.len(),
            bounded = image.bounded,
            "program assembled"
        );

        if let Err(e) = self.persist(&image) {
            warn!(error = %e, path = %self.program_path.display(), "cannot write program");
            self.set_phase(Phase::Failed);
            self.set_phase(Phase::Idle);
            return Reply::persist_failed(&e);
        }

        self.set_phase(Phase::Executing);
        let execution = self
            .executor
            .execute(&self.program_path, fragment, &mut self.store);

        let reply = match execution {
            Execution::Completed(extracted) => {
                self.set_phase(Phase::Extracting);
                Reply::output(extracted.bytes, extracted.found)
            }
            Execution::Failed(out) => {
                self.set_phase(Phase::Failed);
                Reply::run_failed(out)
            }
            Execution::Environment(e) => {
                self.set_phase(Phase::Failed);
                Reply::environment_failed(&KernelError::from(e))
            }
        };

        self.set_phase(Phase::Idle);
        reply
    }

    /// Drop every cell when the editor switched to another document.
    ///
    /// A submission without a document, such as one that failed to decode,
    /// names no other document and leaves the notebook alone.
    fn switch_document(&mut self, document: &str) {
        if document.is_empty() {
            debug!("submission without a document, keeping cells");
            return;
        }
        if !self.last_document.is_empty() && self.last_document != document {
            info!(
                from = %self.last_document,
                to = %document,
                "new document detected, resetting cells"
            );
            self.store.reset();
        }
        self.last_document = document.to_string();
    }

    /// Write the program to its stable path.
    pub fn persist(&self, image: &ProgramImage) -> Result<(), KernelError> {
        write_private(&self.program_path, image.render().as_bytes()).map_err(|source| {
            KernelError::Persist {
                path: self.program_path.clone(),
                source,
            }
        })
    }

    /// Wait for the background formatter, e.g. before shutdown.
    pub fn wait_for_background(&mut self) {
        self.executor.wait_for_background();
    }
}

fn write_private(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(bytes)?;
    file.flush()
}
