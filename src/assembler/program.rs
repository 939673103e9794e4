use super::markers::{print_statement, CLOSE_MARKER, OPEN_MARKER};
use crate::cell::{CellStore, Fragment};
use crate::source::{classify, CellKind};
use std::fmt;
use tracing::trace;

const PROGRAM_HEADER: &str = "package main\n\n";

/// The generated Go program, split into its two regions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramImage {
    /// Functions, methods and types, outside `main`.
    pub declarations: String,
    /// Statement cells in notebook order, inside `main`.
    pub statements: String,
    /// Whether the executing cell was wrapped with boundary markers.
    pub bounded: bool,
}

impl ProgramImage {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProgramImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}\n\nfunc main() {{{}\n}}\n",
            PROGRAM_HEADER, self.declarations, self.statements
        )
    }
}

/// Rebuild the whole program from the store.
///
/// Both regions are recomputed from scratch on every call. The statement
/// whose fragment is `executing` is wrapped with the boundary markers;
/// declarations never are. When this returns no cell is flagged as
/// executing.
pub fn assemble(store: &mut CellStore, executing: Fragment) -> ProgramImage {
    let mut image = ProgramImage::default();
    let mut demoted: Vec<Fragment> = Vec::new();

    for cell in store.snapshot() {
        match classify(&cell.content) {
            CellKind::Declaration => {
                trace!(fragment = cell.fragment, "declaration");
                image.declarations.push('\n');
                image.declarations.push_str(&cell.content);
                if cell.executing {
                    demoted.push(cell.fragment);
                }
            }
            CellKind::Statement => {
                let wrap = cell.fragment == executing;
                trace!(fragment = cell.fragment, wrap, "statement");
                if wrap {
                    image.statements.push('\n');
                    image.statements.push_str(&print_statement(OPEN_MARKER));
                    image.bounded = true;
                }
                image.statements.push('\n');
                image.statements.push_str(&cell.content);
                image.statements.push('\n');
                if wrap {
                    image.statements.push_str(&print_statement(CLOSE_MARKER));
                    image.statements.push('\n');
                }
            }
        }
    }

    for fragment in demoted {
        store.set_executing(fragment, false);
    }
    store.set_executing(executing, false);

    image
}
