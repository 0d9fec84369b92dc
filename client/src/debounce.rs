//! Timer abstraction and a generation-counting debouncer.

use std::{cell::Cell, future::Future, time::Duration};


/// Source of delays. The browser build sleeps on `setTimeout`; tests use
/// tokio's paused clock.
pub trait Timer {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceTicket(u64);

/// Every `arm` supersedes the tickets handed out before it. A caller arms,
/// sleeps for the quiet period and only acts if its ticket is still current.
#[derive(Debug, Default)]
pub struct Debouncer {
    generation: Cell<u64>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm(&self) -> DebounceTicket {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        DebounceTicket(next)
    }

    /// Invalidates every outstanding ticket.
    pub fn cancel(&self) {
        self.generation.set(self.generation.get() + 1);
    }

    pub fn is_current(&self, ticket: DebounceTicket) -> bool {
        self.generation.get() == ticket.0
    }

    /// Sleeps for `quiet` and reports whether no newer `arm` happened meanwhile.
    pub async fn settle<T: Timer>(&self, timer: &T, quiet: Duration) -> bool {
        let ticket = self.arm();
        timer.sleep(quiet).await;
        self.is_current(ticket)
    }
}
