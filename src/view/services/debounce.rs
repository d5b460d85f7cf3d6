//! Debounce gate delaying propagation of rapid filter edits.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Token identifying one armed debounce window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Gate that lets a burst of edits collapse into a single fetch.
///
/// Every edit arms the gate and receives a ticket; waiting out the quiet
/// period only succeeds for the ticket that was armed last. Earlier tickets
/// observe that they were superseded and resolve without fetching, which is
/// the cancel-and-restart timer semantics of the original client expressed
/// without shared timer handles.
#[derive(Debug)]
pub struct DebounceGate {
    quiet: Duration,
    generation: AtomicU64,
}

impl DebounceGate {
    /// Quiet period the view uses unless configured otherwise.
    pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

    /// Creates a gate with the given quiet period.
    #[must_use]
    pub const fn new(quiet: Duration) -> Self {
        Self {
            quiet,
            generation: AtomicU64::new(0),
        }
    }

    /// Registers a new edit, superseding any pending one.
    #[must_use]
    pub fn arm(&self) -> DebounceTicket {
        DebounceTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Waits out the quiet period. Returns `true` when the ticket is still
    /// the most recent edit afterwards, `false` when a later edit (or a
    /// teardown) superseded it.
    pub async fn settled(&self, ticket: DebounceTicket) -> bool {
        tokio::time::sleep(self.quiet).await;
        self.generation.load(Ordering::SeqCst) == ticket.0
    }

    /// Supersedes any pending window without arming a new one. Used on
    /// component teardown.
    pub fn cancel_pending(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns the configured quiet period.
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(Self::DEFAULT_QUIET_PERIOD)
    }
}
