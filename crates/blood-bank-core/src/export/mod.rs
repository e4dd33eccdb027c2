//! Export functionality for inventory and roster reports.

mod inventory;
mod roster;

pub use inventory::*;
pub use roster::*;

/// Quote a CSV field if it contains a delimiter, quote or newline.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
