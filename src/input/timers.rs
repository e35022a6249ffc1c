//! Deterministic one-shot timers.
//!
//! Long-press, deferred single-tap, highlight and debounce timers are entries
//! in a `TimerQueue` polled with the current `Instant`. Each entry carries a
//! liveness flag shared with its `TimerHandle`; cancelling clears the flag and
//! a fired entry whose flag is cleared is dropped without being reported.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Cancellation handle for a scheduled timer.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    live: Rc<Cell<bool>>,
}

impl TimerHandle {
    pub fn cancel(&self) {
        self.live.set(false);
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }
}

impl PartialEq for TimerHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.live, &other.live)
    }
}

#[derive(Debug)]
struct TimerEntry<T> {
    due: Instant,
    seq: u64,
    live: Rc<Cell<bool>>,
    payload: T,
}

/// One-shot timers ordered by due time, then by schedule order.
#[derive(Debug)]
pub struct TimerQueue<T> {
    entries: Vec<TimerEntry<T>>,
    next_seq: u64,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) -> TimerHandle {
        let live = Rc::new(Cell::new(true));
        self.entries.push(TimerEntry {
            due: now + delay,
            seq: self.next_seq,
            live: Rc::clone(&live),
            payload,
        });
        self.next_seq += 1;
        TimerHandle { live }
    }

    /// Remove and return every live timer due at or before `now`, in firing order.
    pub fn drain_due(&mut self, now: Instant) -> Vec<T> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .filter(|entry| entry.live.get())
            .partition(|entry| entry.due <= now);
        self.entries = pending;

        due.sort_by_key(|entry| (entry.due, entry.seq));
        due.into_iter()
            .map(|entry| {
                entry.live.set(false);
                entry.payload
            })
            .collect()
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        for entry in self.entries.drain(..) {
            entry.live.set(false);
        }
    }

    /// Number of live timers still waiting.
    pub fn pending(&self) -> usize {
        self.entries.iter().filter(|entry| entry.live.get()).count()
    }

    /// Earliest due time among live timers.
    pub fn next_due(&self) -> Option<Instant> {
        self.entries
            .iter()
            .filter(|entry| entry.live.get())
            .map(|entry| entry.due)
            .min()
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
