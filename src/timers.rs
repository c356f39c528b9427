//! One-shot task scheduling on a virtual clock.
//!
//! Tasks cannot be cancelled. The owner advances the clock explicitly (the
//! preview shell feeds real frame time, tests feed exact durations) and runs
//! whatever [`Scheduler::pop_due`] hands back. Tasks that share a due time run
//! in scheduling order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

#[derive(Debug)]
struct Scheduled<T> {
    due: Duration,
    seq: u64,
    task: T,
}

impl<T> PartialEq for Scheduled<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl<T> Eq for Scheduled<T> {}

impl<T> PartialOrd for Scheduled<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Scheduled<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

/// Queue of one-shot tasks ordered by due time.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_seq: u64,
    queue: BinaryHeap<Reverse<Scheduled<T>>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_seq: 0,
            queue: BinaryHeap::new(),
        }
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks not yet run.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Due time of the earliest pending task.
    pub fn next_due(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(s)| s.due)
    }

    /// Schedules `task` to run `delay` after the current clock value.
    pub fn schedule_in(&mut self, delay: Duration, task: T) {
        let scheduled = Scheduled {
            due: self.now + delay,
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        self.queue.push(Reverse(scheduled));
    }

    /// Pops the earliest task due at or before `until`, moving the clock to its
    /// due time. Tasks scheduled while draining are picked up by later calls
    /// if they fall inside the window.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        match self.queue.peek() {
            Some(Reverse(next)) if next.due <= until => {}
            _ => return None,
        }
        let Reverse(scheduled) = self.queue.pop()?;
        self.now = self.now.max(scheduled.due);
        Some(scheduled.task)
    }

    /// Moves the clock forward to `until` once due tasks are drained.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}
