//! Selection observer: turns bursts of raw selection events into one settle.
//!
//! Two states, `Idle` and `PendingSettle`. The pending slot holds a single
//! timer; every new event cancels it and arms a fresh one, so only the last
//! event of a burst produces a settle. Time is passed in by the caller, which
//! keeps the state machine deterministic under test.

use std::time::{Duration, Instant};
use tracing::trace;

/// What told us the selection may have moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCause {
    PointerUp,
    KeyUp,
    Programmatic,
}

/// Emitted once per burst when the pending timer expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settle {
    pub generation: u64,
    pub cause: SelectionCause,
    /// Raw events folded into this settle.
    pub coalesced: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObserverState {
    Idle,
    PendingSettle {
        generation: u64,
        deadline: Instant,
        cause: SelectionCause,
        coalesced: usize,
    },
}

#[derive(Debug)]
pub struct SelectionObserver {
    window: Duration,
    state: ObserverState,
    generation: u64,
}

impl SelectionObserver {
    /// `window` is the minimum quiet time before a settle. Zero fires on the
    /// next poll.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: ObserverState::Idle,
            generation: 0,
        }
    }

    /// Record a selection-change event, replacing any pending timer.
    pub fn notify(&mut self, now: Instant, cause: SelectionCause) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        let coalesced = match self.state {
            ObserverState::PendingSettle { coalesced, .. } => coalesced + 1,
            ObserverState::Idle => 1,
        };
        self.state = ObserverState::PendingSettle {
            generation: self.generation,
            deadline: now + self.window,
            cause,
            coalesced,
        };
        trace!(generation = self.generation, ?cause, "selection settle armed");
        self.generation
    }

    /// Fire the pending settle if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Settle> {
        match self.state {
            ObserverState::PendingSettle {
                generation,
                deadline,
                cause,
                coalesced,
            } if now >= deadline => {
                self.state = ObserverState::Idle;
                Some(Settle {
                    generation,
                    cause,
                    coalesced,
                })
            }
            _ => None,
        }
    }

    /// Drop the pending timer. Returns whether one was armed.
    pub fn cancel(&mut self) -> bool {
        let was_pending = self.is_pending();
        self.state = ObserverState::Idle;
        was_pending
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, ObserverState::PendingSettle { .. })
    }

    pub fn deadline(&self) -> Option<Instant> {
        match self.state {
            ObserverState::PendingSettle { deadline, .. } => Some(deadline),
            ObserverState::Idle => None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }
}
