use regex::Regex;
use std::sync::LazyLock;

/// Prefix the editor extension uses to recognise kernel-side failures.
pub const KERNEL_STATUS_PREFIX: &str = "exit status 3\n";

static ENTRY_POINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*func\s+main\s*\(\s*\)").expect("entry point regex is valid")
});

static IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^\s*import\s*[("]"#).expect("import regex is valid"));

static PACKAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*package\s+\w+").expect("package regex is valid"));

/// Cell content the kernel generates itself and refuses from the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Main function is generated automatically. Please remove func main()")]
    EntryPoint,
    #[error("Imports are done automatically. Please remove import statement")]
    Import,
    #[error("Package is generated automatically. Please remove package statement")]
    Package,
}

impl Rejection {
    /// Reply body sent back to the editor.
    pub fn reply(&self) -> String {
        format!("{}{}", KERNEL_STATUS_PREFIX, self)
    }
}

/// Check a cell before it is stored. Entry point wins over import, import over package.
pub fn precheck(content: &str) -> Result<(), Rejection> {
    if ENTRY_POINT.is_match(content) {
        return Err(Rejection::EntryPoint);
    }
    if IMPORT.is_match(content) {
        return Err(Rejection::Import);
    }
    if PACKAGE.is_match(content) {
        return Err(Rejection::Package);
    }
    Ok(())
}
