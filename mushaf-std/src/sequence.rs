//! Latest-wins ordering for asynchronous work started by handlers.
//!
//! Dispatch never waits for the work its handlers start, and nothing cancels
//! that work. Two quick dispatches can therefore race, and the slower
//! response would overwrite the newer one. A [`RequestSequencer`] hands out a
//! [`Ticket`] when the work starts; whoever applies the result checks
//! [`RequestSequencer::is_current`] first and drops stale results.

use std::sync::atomic::{AtomicU64, Ordering};

/// A request sequence number. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    /// The raw sequence number.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Monotonic ticket source. Only the most recently issued ticket is current.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    /// Create a sequencer that has not issued any ticket yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Whether `ticket` is still the most recently issued one.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::Acquire) == ticket.0
    }

    /// The most recently issued ticket, if any.
    pub fn latest(&self) -> Option<Ticket> {
        match self.latest.load(Ordering::Acquire) {
            0 => None,
            n => Some(Ticket(n)),
        }
    }
}
