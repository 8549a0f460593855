//! Debouncing and stale-result suppression.
//!
//! Every trigger takes a ticket. Only the newest ticket is current; work
//! holding an older ticket must drop its result rather than publish it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Identifies one trigger. Compare against [`QueryTracker::is_current`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

/// Hands out tickets and remembers which one is newest.
#[derive(Debug, Default)]
pub struct QueryTracker {
    latest: AtomicU64,
}

impl QueryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every earlier one.
    pub fn issue(&self) -> QueryTicket {
        QueryTicket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Supersede all outstanding tickets without issuing a usable one.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

/// Coalesces bursts of triggers into one, after a quiet window.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    tracker: Arc<QueryTracker>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            tracker: Arc::new(QueryTracker::new()),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Register a trigger, superseding every earlier one.
    pub fn trigger(&self) -> QueryTicket {
        self.tracker.issue()
    }

    /// Wait out the window for `ticket`.
    ///
    /// Returns the ticket if no newer trigger arrived meanwhile, `None` if
    /// it was superseded or cancelled.
    pub async fn settle(&self, ticket: QueryTicket) -> Option<QueryTicket> {
        tokio::time::sleep(self.delay).await;
        self.tracker.is_current(ticket).then_some(ticket)
    }

    /// Whether work started under `ticket` may still publish.
    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        self.tracker.is_current(ticket)
    }

    /// Drop any pending or in-flight work.
    pub fn cancel(&self) {
        self.tracker.invalidate();
    }
}
