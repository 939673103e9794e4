/// Printed on its own line right before the executing cell runs.
pub const OPEN_MARKER: &str = "gobook-output-start";
/// Printed on its own line right after the executing cell finishes.
pub const CLOSE_MARKER: &str = "gobook-output-end";

/// Go statement that prints `marker` on its own line.
///
/// `println` writes to stderr and needs no import, so the wrapper never
/// changes the import set of the generated file.
pub fn print_statement(marker: &str) -> String {
    format!("println(\"{}\")", marker)
}
