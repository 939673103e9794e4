use regex::Regex;
use std::sync::LazyLock;

static FUNC_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^func\s+\w+\s*(\[[^\]]*\])?\s*\(").expect("func regex is valid")
});

// func (r *Recv) Name(
static METHOD_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^func\s*\([^)]*\)\s*\w+\s*(\[[^\]]*\])?\s*\(").expect("method regex is valid")
});

static TYPE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^type(\s+\w+|\s*\()").expect("type regex is valid"));

/// Where a cell lands in the assembled program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// Top-level definition, placed outside `main`.
    Declaration,
    /// Runs in sequence inside `main`.
    Statement,
}

/// Skip whitespace, `//` line comments and `/* */` blocks ahead of the
/// first construct. An unterminated block comment swallows the rest.
fn skip_leading_comments(content: &str) -> &str {
    let mut text = content.trim_start();
    loop {
        if let Some(rest) = text.strip_prefix("//") {
            text = rest.split_once('\n').map_or("", |(_, after)| after).trim_start();
        } else if let Some(rest) = text.strip_prefix("/*") {
            text = rest.split_once("*/").map_or("", |(_, after)| after).trim_start();
        } else {
            return text;
        }
    }
}

/// Classify a cell by its leading construct.
///
/// Only the start of the text after any leading comments is inspected,
/// so a cell that opens with a definition and continues with statements
/// is still a declaration as a whole.
pub fn classify(content: &str) -> CellKind {
    let text = skip_leading_comments(content);
    if FUNC_DECL.is_match(text) || METHOD_DECL.is_match(text) || TYPE_DECL.is_match(text) {
        CellKind::Declaration
    } else {
        CellKind::Statement
    }
}
