//! Sequential id allocation

use super::model::RecordId;

/// Monotonic id counter with a floor of 1
///
/// The counter is only touched while the ledger lock is held. The value is
/// persisted with the next full save, so a crash between `next()` and that
/// save hands out the same id again after restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSequence {
    next: RecordId,
}

impl IdSequence {
    /// Start from a loaded counter value; 0 is coerced to 1
    pub fn starting_at(next: RecordId) -> Self {
        Self { next: next.max(1) }
    }

    /// Return the current value and advance the counter
    pub fn next(&mut self) -> RecordId {
        if self.next == 0 {
            self.next = 1;
        }
        let id = self.next;
        self.next += 1;
        id
    }

    /// Value the next call to `next()` will return
    pub fn peek(&self) -> RecordId {
        self.next.max(1)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::starting_at(1)
    }
}
