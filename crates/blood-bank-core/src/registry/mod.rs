//! Donor registry and hospital ledger.

mod donors;
mod hospitals;

pub use donors::*;
pub use hospitals::*;

/// Monotonic identifier generator owned by a single registry.
///
/// Produces `<prefix><n>` for n = start, start + 1, ... and never repeats.
/// The counter is 64 bits wide, so any `u32` start leaves room for more ids
/// than a registry can hold.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: char,
    next: u64,
}

impl IdSequence {
    pub fn new(prefix: char, start: u32) -> Self {
        Self {
            prefix,
            next: u64::from(start),
        }
    }

    /// Take the next identifier.
    pub fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}
