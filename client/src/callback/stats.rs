//! Callback counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Running totals for one dispatcher; cheap to read from any task
#[derive(Debug, Default)]
pub struct DispatchStats {
    accepted: AtomicU64,
    rejected: AtomicU64,
    undecodable: AtomicU64,
    dispatched: AtomicU64,
    overflowed: AtomicU64,
    handler_failures: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Callbacks whose signature verified
    pub accepted: u64,
    /// Callbacks answered with 400
    pub rejected: u64,
    /// Verified callbacks whose body did not decode
    pub undecodable: u64,
    /// Updates queued for the handler
    pub dispatched: u64,
    /// Updates dropped because the queue was full
    pub overflowed: u64,
    /// Handler invocations that returned an error or panicked
    pub handler_failures: u64,
}

impl DispatchStats {
    pub(crate) fn record_accepted(&self) {
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_undecodable(&self) {
        self.undecodable.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_overflowed(&self) {
        self.overflowed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_handler_failure(&self) {
        self.handler_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            accepted: self.accepted.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            undecodable: self.undecodable.load(Ordering::Relaxed),
            dispatched: self.dispatched.load(Ordering::Relaxed),
            overflowed: self.overflowed.load(Ordering::Relaxed),
            handler_failures: self.handler_failures.load(Ordering::Relaxed),
        }
    }
}
