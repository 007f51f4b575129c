use std::time::Instant;

/// Table of forwarded queries still waiting for an upstream reply.
pub trait PendingExchangePort: Send + Sync {
    /// Removes every exchange whose deadline is at or before `now` and returns
    /// how many were removed.
    fn sweep_expired(&self, now: Instant) -> usize;

    fn pending_count(&self) -> usize;
}
