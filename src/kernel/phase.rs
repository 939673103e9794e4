use std::fmt;

/// Where the kernel is within one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Classifying,
    Assembling,
    Executing,
    Extracting,
    /// A persistence or toolchain failure; always followed by `Idle`.
    Failed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Classifying => "classifying",
            Phase::Assembling => "assembling",
            Phase::Executing => "executing",
            Phase::Extracting => "extracting",
            Phase::Failed => "failed",
        };
        f.write_str(name)
    }
}
