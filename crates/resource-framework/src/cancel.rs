//! # Stale Request Detection
//!
//! Requests are never aborted on the wire when a caller loses interest. Two tools
//! let callers cope with that:
//!
//! - a [`CancellationToken`](tokio_util::sync::CancellationToken) passed through
//!   [`RequestOptions::cancel`](crate::RequestOptions::cancel) resolves the call early;
//! - a [`RequestGeneration`] counter tags each request so a result that arrives after
//!   a newer request was issued can be recognized and dropped.
//!
//! ```rust
//! use resource_framework::RequestGeneration;
//!
//! let generation = RequestGeneration::new();
//! let first = generation.next();
//! let second = generation.next();
//! assert!(!generation.is_current(first));
//! assert!(generation.is_current(second));
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Identifies one issued request within a [`RequestGeneration`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Monotonic counter shared by everything that writes to the same state slot.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration {
    current: Arc<AtomicU64>,
}

impl RequestGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new generation; every earlier ticket becomes stale.
    pub fn next(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Ticket of the latest generation without starting a new one.
    pub fn current(&self) -> Ticket {
        Ticket(self.current.load(Ordering::SeqCst))
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.0
    }

    /// Marks every outstanding ticket stale without issuing a new one to anybody.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }
}
