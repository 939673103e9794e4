use crate::error::KernelError;
use crate::source::{Rejection, KERNEL_STATUS_PREFIX};
use crate::toolchain::ToolOutput;

/// Why a reply has the body it has.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The program ran. `found` is false when no bounded output was
    /// produced, e.g. for a declaration cell.
    Output { found: bool },
    Rejected(Rejection),
    PersistFailed,
    EnvironmentFailed,
    RunFailed,
}

/// What goes back to the editor for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub body: Vec<u8>,
    pub outcome: Outcome,
}

impl Reply {
    pub fn output(bytes: Vec<u8>, found: bool) -> Self {
        Self {
            body: bytes,
            outcome: Outcome::Output { found },
        }
    }

    pub fn rejected(rejection: Rejection) -> Self {
        Self {
            body: rejection.reply().into_bytes(),
            outcome: Outcome::Rejected(rejection),
        }
    }

    pub fn persist_failed(err: &KernelError) -> Self {
        Self {
            body: format!("{}{}", KERNEL_STATUS_PREFIX, err).into_bytes(),
            outcome: Outcome::PersistFailed,
        }
    }

    pub fn environment_failed(err: &KernelError) -> Self {
        Self {
            body: err.to_string().into_bytes(),
            outcome: Outcome::EnvironmentFailed,
        }
    }

    /// Exit status line followed by the raw toolchain output.
    pub fn run_failed(out: ToolOutput) -> Self {
        let mut body = out.status.into_bytes();
        body.push(b'\n');
        body.extend_from_slice(&out.output);
        Self {
            body,
            outcome: Outcome::RunFailed,
        }
    }

    pub fn body_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
